//! An in-place k-d tree layout over a caller-owned slice of points.
//!
//! The slice stays where the caller put it; [`kd_sort`] (or
//! [`KdSlice::build`]) reorders it into implicit-tree order, after which the
//! ordered-lookup, nearest-neighbor and orthogonal-range queries run in
//! expected `O(log n)` without any auxiliary structure.
//!
//! ## Creation
//!
//! Use [`KdSlice::build`] (or [`KdSlice::build_parallel`] for large inputs)
//! to sort a mutable slice and obtain a query view. A slice that is already
//! in k-d order can be wrapped with [`KdSlice::try_new`].
//!
//! ## Search
//!
//! [`KdSlice::nearest`], [`KdSlice::knn`] and [`KdSlice::nearest_approx`]
//! answer Euclidean nearest-neighbor queries. [`KdSlice::range`] enumerates
//! a componentwise half-open window. [`KdSlice::lower_bound`],
//! [`KdSlice::upper_bound`], [`KdSlice::equal_range`] and
//! [`KdSlice::contains_point`] perform ordered lookup under the
//! componentwise partial order.
//!
//! All queries return positions into the sorted slice.
//!
//! ## Coordinate types
//!
//! Coordinates implement [`KdNum`]. Float `NaN` breaks the comparison order
//! the layout relies on, so `build` and `try_new` reject it up front.
//!
//! ## Example
//!
//! ```
//! use kd_slice::KdSlice;
//!
//! let mut points = vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
//! let tree = KdSlice::build(&mut points).unwrap();
//!
//! let nearest = tree.nearest(&[1.2, 0.9]).unwrap();
//! assert_eq!(tree.points()[nearest], [1.0, 1.0]);
//!
//! let mut hits = tree.range(&[0.5, 0.5], &[2.5, 2.5]);
//! hits.sort();
//! assert_eq!(hits, vec![1, 2]);
//! ```

pub mod cmp;
mod error;
mod lookup;
mod nearest;
mod range;
pub mod sort;
mod tree;
pub mod r#type;

pub use error::{KdSliceError, Result};
pub use r#type::KdNum;
pub use sort::{
    kd_sort, kd_sort_by, kd_sort_parallel, kd_sort_parallel_with_threads, lex_sort, lex_sort_by,
};
pub use tree::{KdSlice, MAX_DIM};
