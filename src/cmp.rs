//! Point comparators and boundary predicates.
//!
//! The layout and the queries never compare whole points directly; they go
//! through the single-axis comparison [`axis_less`], the axis-cycling order
//! [`cyclic_cmp`], and the componentwise predicates [`all_less`] /
//! [`none_less`] / [`contains`] defined here.

use std::cmp::Ordering;

use crate::r#type::KdNum;

/// Compare two points on a single axis: `a[axis] < b[axis]`.
#[inline]
pub fn axis_less<N: KdNum, const K: usize>(axis: usize, a: &[N; K], b: &[N; K]) -> bool {
    a[axis] < b[axis]
}

/// Axis-cycling comparison starting at `axis`.
///
/// Compares on `axis` first; ties advance to `(axis + 1) % K`, visiting each
/// axis exactly once. Two points are `Equal` only when every coordinate is.
/// This is a strict weak order as long as the coordinates themselves are
/// totally ordered (no `NaN`).
#[inline]
pub fn cyclic_cmp<N: KdNum, const K: usize>(axis: usize, a: &[N; K], b: &[N; K]) -> Ordering {
    let mut axis = axis;
    for _ in 0..K {
        match a[axis].partial_cmp(&b[axis]).unwrap_or(Ordering::Equal) {
            Ordering::Equal => axis = (axis + 1) % K,
            ord => return ord,
        }
    }
    Ordering::Equal
}

/// The `Less` projection of [`cyclic_cmp`].
#[inline]
pub fn cyclic_less<N: KdNum, const K: usize>(axis: usize, a: &[N; K], b: &[N; K]) -> bool {
    cyclic_cmp(axis, a, b) == Ordering::Less
}

/// [`cyclic_cmp`] parameterised by a caller-supplied coordinate comparator.
///
/// The comparator decides both order and equality per axis; the cyclic
/// tie-break structure is the same as [`cyclic_cmp`].
#[inline]
pub fn cyclic_cmp_by<N, const K: usize, F>(axis: usize, a: &[N; K], b: &[N; K], cmp: &F) -> Ordering
where
    F: Fn(&N, &N) -> Ordering,
{
    let mut axis = axis;
    for _ in 0..K {
        match cmp(&a[axis], &b[axis]) {
            Ordering::Equal => axis = (axis + 1) % K,
            ord => return ord,
        }
    }
    Ordering::Equal
}

/// `true` iff `a[i] < b[i]` for every axis.
#[inline]
pub fn all_less<N: KdNum, const K: usize>(a: &[N; K], b: &[N; K]) -> bool {
    (0..K).all(|i| a[i] < b[i])
}

/// `true` iff `a[i] >= b[i]` for every axis.
#[inline]
pub fn none_less<N: KdNum, const K: usize>(a: &[N; K], b: &[N; K]) -> bool {
    (0..K).all(|i| a[i] >= b[i])
}

/// `true` iff `v` lies in the componentwise half-open box `[lo, hi)`.
#[inline]
pub fn contains<N: KdNum, const K: usize>(v: &[N; K], lo: &[N; K], hi: &[N; K]) -> bool {
    none_less(v, lo) && all_less(v, hi)
}

/// Squared Euclidean distance, computed in `f64` regardless of the
/// coordinate type.
#[inline]
pub fn sq_dist<N: KdNum, const K: usize>(a: &[N; K], b: &[N; K]) -> f64 {
    let mut acc = 0.0;
    for i in 0..K {
        let d = to_f64(a[i]) - to_f64(b[i]);
        acc += d * d;
    }
    acc
}

/// Euclidean (L2) distance.
#[inline]
pub fn l2_dist<N: KdNum, const K: usize>(a: &[N; K], b: &[N; K]) -> f64 {
    sq_dist(a, b).sqrt()
}

/// Absolute distance between two points on one axis.
#[inline]
pub(crate) fn axis_dist<N: KdNum>(a: N, b: N) -> f64 {
    (to_f64(a) - to_f64(b)).abs()
}

#[inline]
pub(crate) fn to_f64<N: KdNum>(n: N) -> f64 {
    n.to_f64().unwrap_or(f64::NAN)
}
