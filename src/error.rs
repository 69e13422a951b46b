use thiserror::Error;

use crate::tree::MAX_DIM;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
pub enum KdSliceError {
    /// The point dimensionality is outside the supported `1..=MAX_DIM` range.
    #[error("Unsupported dimension {0}: expected 1..={MAX_DIM}.")]
    InvalidDimension(usize),

    /// The input slice cannot be put into k-d order.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, KdSliceError>;
