use crate::error::{KdSliceError, Result};
use crate::r#type::KdNum;
use crate::{lookup, nearest, range, sort};

/// The largest supported point dimensionality.
pub const MAX_DIM: usize = 9;

/// A read-only view over a slice in k-d tree order; the query entry point.
///
/// The underlying storage stays with the caller. [`KdSlice::build`] sorts a
/// mutable slice in place and returns the view; all queries return positions
/// into [`points`][KdSlice::points]. Mutating the slice afterwards (through
/// another handle) invalidates the layout and every position handed out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KdSlice<'a, N: KdNum, const K: usize> {
    points: &'a [[N; K]],
}

impl<'a, N: KdNum, const K: usize> KdSlice<'a, N, K> {
    /// Sort `points` into k-d order and return the query view.
    ///
    /// ## Errors
    ///
    /// - `InvalidDimension` if `K` is zero or above [`MAX_DIM`].
    /// - `InvalidInput` if any coordinate is NaN.
    pub fn build(points: &'a mut [[N; K]]) -> Result<Self> {
        validate(points)?;
        sort::kd_sort(points);
        let points: &'a [[N; K]] = points;
        Ok(Self { points })
    }

    /// [`build`][KdSlice::build] over the fork-join parallel sort.
    pub fn build_parallel(points: &'a mut [[N; K]]) -> Result<Self> {
        validate(points)?;
        sort::kd_sort_parallel(points);
        let points: &'a [[N; K]] = points;
        Ok(Self { points })
    }

    /// [`build_parallel`][KdSlice::build_parallel] with an explicit worker
    /// cap.
    pub fn build_parallel_with_threads(
        points: &'a mut [[N; K]],
        max_threads: usize,
    ) -> Result<Self> {
        validate(points)?;
        sort::kd_sort_parallel_with_threads(points, max_threads);
        let points: &'a [[N; K]] = points;
        Ok(Self { points })
    }

    /// Wrap a slice that is already in k-d order (for example one sorted
    /// earlier via [`kd_sort`][crate::kd_sort]).
    ///
    /// Validates dimensionality and coordinates; the layout itself is the
    /// caller's contract. Queries over a slice that is not actually in k-d
    /// order return arbitrary results.
    pub fn try_new(points: &'a [[N; K]]) -> Result<Self> {
        validate(points)?;
        Ok(Self { points })
    }

    /// The underlying points, in k-d order.
    pub fn points(&self) -> &'a [[N; K]] {
        self.points
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the slice is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first position in slice order whose point is componentwise `>=
    /// value`, or `None` if no point is.
    pub fn lower_bound(&self, value: &[N; K]) -> Option<usize> {
        lookup::lower_bound(self.points, value)
    }

    /// The first position in slice order whose point is componentwise
    /// strictly `> value` on every axis, or `None` if no point is.
    pub fn upper_bound(&self, value: &[N; K]) -> Option<usize> {
        lookup::upper_bound(self.points, value)
    }

    /// Whether a point equal to `value` on every axis is present.
    pub fn contains_point(&self, value: &[N; K]) -> bool {
        lookup::binary_search(self.points, value)
    }

    /// The `(lower_bound, upper_bound)` pair for `value`.
    ///
    /// Equal points are not contiguous in k-d order, so the pair is a pair
    /// of componentwise thresholds, not a subrange: positions between the
    /// two are not necessarily matches.
    pub fn equal_range(&self, value: &[N; K]) -> (Option<usize>, Option<usize>) {
        lookup::equal_range(self.points, value)
    }

    /// The position of the point with minimum L2 distance to `value`;
    /// `None` only when the slice is empty. Ties go to whichever tied point
    /// the descent visits first.
    pub fn nearest(&self, value: &[N; K]) -> Option<usize> {
        nearest::nearest(self.points, value)
    }

    /// Approximate nearest neighbor: any point closer than `eps` may be
    /// returned as soon as it is visited, and the far half of a subrange is
    /// skipped once it cannot improve the best distance by more than `eps`.
    ///
    /// The returned distance `d` satisfies `d < eps` or `d <= true_min +
    /// eps`; with `eps = 0.0` this is exactly [`nearest`][KdSlice::nearest].
    pub fn nearest_approx(&self, value: &[N; K], eps: f64) -> Option<usize> {
        nearest::nearest_approx(self.points, value, eps)
    }

    /// The positions of the `min(n, len)` points closest to `value` in L2
    /// distance, worst-to-best (heap pop order).
    pub fn knn(&self, value: &[N; K], n: usize) -> Vec<usize> {
        nearest::knn(self.points, value, n)
    }

    /// All positions whose point lies in the componentwise half-open box
    /// `[lo, hi)`, in traversal order. Duplicates are reported once per
    /// position.
    pub fn range(&self, lo: &[N; K], hi: &[N; K]) -> Vec<usize> {
        range::range(self.points, lo, hi)
    }
}

fn validate<N: KdNum, const K: usize>(points: &[[N; K]]) -> Result<()> {
    if K == 0 || K > MAX_DIM {
        return Err(KdSliceError::InvalidDimension(K));
    }
    for (i, point) in points.iter().enumerate() {
        for c in point {
            // NaN is the only value unordered against itself
            if c.partial_cmp(c).is_none() {
                return Err(KdSliceError::InvalidInput(format!(
                    "NaN coordinate in point at index {i}"
                )));
            }
        }
    }
    Ok(())
}
