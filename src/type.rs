use std::fmt::Debug;

use num_traits::{Bounded, Num, NumCast, ToPrimitive};

/// A coordinate type usable in a k-d layout.
///
/// Comparisons over the stored values must form a strict weak order, which is
/// why float `NaN` is rejected at the crate boundary rather than handled
/// here.
pub trait KdNum:
    Num + NumCast + ToPrimitive + PartialOrd + Copy + Debug + Send + Sync + Bounded
{
}

impl<T> KdNum for T where
    T: Num + NumCast + ToPrimitive + PartialOrd + Copy + Debug + Send + Sync + Bounded
{
}
