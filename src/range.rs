//! Orthogonal (axis-aligned window) queries.

use tinyvec::TinyVec;

use crate::cmp::{axis_less, contains};
use crate::r#type::KdNum;

/// All positions whose point lies in the componentwise half-open box
/// `[lo, hi)`, in traversal order.
pub(crate) fn range<N: KdNum, const K: usize>(
    points: &[[N; K]],
    lo: &[N; K],
    hi: &[N; K],
) -> Vec<usize> {
    let mut result = vec![];
    if points.is_empty() {
        return result;
    }

    // Use TinyVec to avoid heap allocations; frames are (first, last, axis)
    let mut stack: TinyVec<[usize; 33]> = TinyVec::new();
    stack.push(0);
    stack.push(points.len());
    stack.push(0);

    while !stack.is_empty() {
        let axis = stack.pop().unwrap_or(0);
        let last = stack.pop().unwrap_or(0);
        let first = stack.pop().unwrap_or(0);

        match last - first {
            0 => continue,
            1 => {
                if contains(&points[first], lo, hi) {
                    result.push(first);
                }
                continue;
            }
            _ => {}
        }

        let mid = first + (last - first) / 2;
        let pivot = &points[mid];
        if contains(pivot, lo, hi) {
            result.push(mid);
        }

        let next = (axis + 1) % K;

        // the left half only holds points at or below the pivot on this axis
        if !axis_less(axis, pivot, lo) {
            stack.push(first);
            stack.push(mid);
            stack.push(next);
        }

        // the right half only holds points at or above the pivot on this axis
        if axis_less(axis, pivot, hi) {
            stack.push(mid + 1);
            stack.push(last);
            stack.push(next);
        }
    }

    result
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sort::kd_sort;

    #[test]
    fn window_is_half_open() {
        let mut points = vec![
            [0.0, 0.0],
            [1.0, 1.0],
            [2.0, 2.0],
            [3.0, 3.0],
            [4.0, 4.0],
        ];
        kd_sort(&mut points);

        let mut hits: Vec<[f64; 2]> = range(&points, &[1.0, 1.0], &[4.0, 4.0])
            .into_iter()
            .map(|i| points[i])
            .collect();
        hits.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(hits, vec![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]);
    }

    #[test]
    fn duplicates_are_all_reported() {
        let mut points = vec![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0], [5.0, 5.0]];
        kd_sort(&mut points);

        let hits = range(&points, &[0.0, 0.0], &[2.0, 2.0]);
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn empty_and_singleton_inputs() {
        let empty: Vec<[f64; 2]> = vec![];
        assert!(range(&empty, &[0.0, 0.0], &[1.0, 1.0]).is_empty());

        let single = vec![[0.5, 0.5]];
        assert_eq!(range(&single, &[0.0, 0.0], &[1.0, 1.0]), vec![0]);
        assert!(range(&single, &[0.6, 0.0], &[1.0, 1.0]).is_empty());
    }
}
