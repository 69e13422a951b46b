//! Ordered lookup under the componentwise partial order.
//!
//! `lower_bound` and `upper_bound` descend the implicit tree, pruning a half
//! whenever the pivot alone decides it cannot hold an earlier match. Both
//! return the first position in slice order whose point satisfies the
//! respective predicate, which is what the linear scan would return.

use crate::cmp::{all_less, none_less};
use crate::r#type::KdNum;

pub(crate) fn lower_bound<N: KdNum, const K: usize>(
    points: &[[N; K]],
    value: &[N; K],
) -> Option<usize> {
    lower_bound_recurse(points, value, 0, points.len(), 0)
}

pub(crate) fn upper_bound<N: KdNum, const K: usize>(
    points: &[[N; K]],
    value: &[N; K],
) -> Option<usize> {
    upper_bound_recurse(points, value, 0, points.len(), 0)
}

pub(crate) fn binary_search<N: KdNum, const K: usize>(points: &[[N; K]], value: &[N; K]) -> bool {
    lower_bound(points, value).map_or(false, |i| none_less(value, &points[i]))
}

pub(crate) fn equal_range<N: KdNum, const K: usize>(
    points: &[[N; K]],
    value: &[N; K],
) -> (Option<usize>, Option<usize>) {
    (lower_bound(points, value), upper_bound(points, value))
}

fn lower_bound_recurse<N: KdNum, const K: usize>(
    points: &[[N; K]],
    value: &[N; K],
    first: usize,
    last: usize,
    axis: usize,
) -> Option<usize> {
    let len = last - first;
    if len == 0 {
        return None;
    }
    if len == 1 {
        return none_less(&points[first], value).then_some(first);
    }

    let mid = first + len / 2;
    let next = (axis + 1) % K;
    let pivot = &points[mid];

    if none_less(pivot, value) {
        // the pivot matches; anything right of it comes later in slice order
        return lower_bound_recurse(points, value, first, mid, next).or(Some(mid));
    }
    if all_less(pivot, value) {
        // everything at or left of the pivot is below `value` on this axis
        return lower_bound_recurse(points, value, mid + 1, last, next);
    }
    lower_bound_recurse(points, value, first, mid, next)
        .or_else(|| lower_bound_recurse(points, value, mid + 1, last, next))
}

fn upper_bound_recurse<N: KdNum, const K: usize>(
    points: &[[N; K]],
    value: &[N; K],
    first: usize,
    last: usize,
    axis: usize,
) -> Option<usize> {
    let len = last - first;
    if len == 0 {
        return None;
    }
    if len == 1 {
        return all_less(value, &points[first]).then_some(first);
    }

    let mid = first + len / 2;
    let next = (axis + 1) % K;
    let pivot = &points[mid];

    if all_less(value, pivot) {
        return upper_bound_recurse(points, value, first, mid, next).or(Some(mid));
    }
    if none_less(value, pivot) {
        return upper_bound_recurse(points, value, mid + 1, last, next);
    }
    upper_bound_recurse(points, value, first, mid, next)
        .or_else(|| upper_bound_recurse(points, value, mid + 1, last, next))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sort::kd_sort;

    #[test]
    fn bounds_on_a_small_set() {
        let mut points = vec![[2.0, 2.0], [0.0, 0.0], [1.0, 1.0]];
        kd_sort(&mut points);

        let lb = lower_bound(&points, &[1.0, 1.0]).unwrap();
        assert_eq!(points[lb], [1.0, 1.0]);

        let ub = upper_bound(&points, &[1.0, 1.0]).unwrap();
        assert_eq!(points[ub], [2.0, 2.0]);

        assert_eq!(upper_bound(&points, &[2.0, 2.0]), None);
        assert_eq!(lower_bound(&points, &[3.0, 0.0]), None);

        assert!(binary_search(&points, &[1.0, 1.0]));
        assert!(!binary_search(&points, &[1.0, 1.5]));
    }

    #[test]
    fn equal_range_returns_both_thresholds() {
        let mut points = vec![[1.0, 1.0], [1.0, 1.0], [2.0, 2.0]];
        kd_sort(&mut points);

        let (lo, hi) = equal_range(&points, &[1.0, 1.0]);
        assert_eq!(points[lo.unwrap()], [1.0, 1.0]);
        assert_eq!(points[hi.unwrap()], [2.0, 2.0]);

        let (lo, hi) = equal_range(&points, &[5.0, 5.0]);
        assert_eq!(lo, None);
        assert_eq!(hi, None);
    }
}
