//! In-place construction of the k-d tree layout.
//!
//! [`kd_sort`] reorders a slice so that every recursive subrange is split at
//! its positional midpoint: elements before the midpoint compare `<=` to it
//! on the subrange's axis, elements after compare `>=`, with the axis
//! cycling per level. The queries in this crate all descend that implicit
//! tree.
//!
//! [`kd_sort_parallel`] produces the identical layout using fork-join
//! recursion over the two (disjoint) halves.

use std::cmp::Ordering;
use std::thread::available_parallelism;

use crate::cmp::{axis_less, cyclic_cmp, cyclic_cmp_by};
use crate::r#type::KdNum;

/// Sort `points` into k-d tree order.
///
/// Expected `O(n log n)`; recursion depth is `O(log n)` because every level
/// splits at the positional midpoint.
pub fn kd_sort<N: KdNum, const K: usize>(points: &mut [[N; K]]) {
    kd_sort_recurse(points, 0);
}

/// Sort `points` into k-d tree order under a caller-supplied coordinate
/// comparator.
///
/// The comparator replaces the natural `<` per axis; ties still cycle to the
/// next axis. It must be a strict weak order or the layout (and every query
/// run against it) is unspecified.
pub fn kd_sort_by<N: KdNum, const K: usize, F>(points: &mut [[N; K]], cmp: F)
where
    F: Fn(&N, &N) -> Ordering,
{
    kd_sort_by_recurse(points, 0, &cmp);
}

/// Sort `points` into k-d tree order on all available cores.
///
/// Same layout as [`kd_sort`], bit for bit: the per-level selection is
/// deterministic and the two halves are disjoint subslices.
pub fn kd_sort_parallel<N: KdNum, const K: usize>(points: &mut [[N; K]]) {
    let threads = available_parallelism().map(|n| n.get()).unwrap_or(1);
    kd_sort_parallel_with_threads(points, threads);
}

/// [`kd_sort_parallel`] with an explicit worker cap.
///
/// Recursion forks while `2^depth < max_threads` and falls back to the
/// sequential sort below that, so the number of in-flight tasks stays
/// bounded by `max_threads`.
pub fn kd_sort_parallel_with_threads<N: KdNum, const K: usize>(
    points: &mut [[N; K]],
    max_threads: usize,
) {
    kd_sort_parallel_recurse(points, 0, 0, max_threads.max(1));
}

/// Plain lexicographic sort under the axis-cycling comparator starting at
/// axis 0. No k-d layout invariant; useful as a total order over points.
pub fn lex_sort<N: KdNum, const K: usize>(points: &mut [[N; K]]) {
    points.sort_unstable_by(|a, b| cyclic_cmp(0, a, b));
}

/// [`lex_sort`] under a caller-supplied coordinate comparator.
pub fn lex_sort_by<N: KdNum, const K: usize, F>(points: &mut [[N; K]], cmp: F)
where
    F: Fn(&N, &N) -> Ordering,
{
    points.sort_unstable_by(|a, b| cyclic_cmp_by(0, a, b, &cmp));
}

fn kd_sort_recurse<N: KdNum, const K: usize>(points: &mut [[N; K]], axis: usize) {
    if points.len() <= 1 {
        return;
    }
    let mid = points.len() / 2;
    points.select_nth_unstable_by(mid, |a, b| cyclic_cmp(axis, a, b));

    // compact elements tied with the pivot on this axis to just before the
    // midpoint, so duplicates sit adjacent to the node that owns them
    let pivot = points[mid];
    partition_in_place(&mut points[..mid], |p| axis_less(axis, p, &pivot));

    let next = (axis + 1) % K;
    let (left, rest) = points.split_at_mut(mid);
    kd_sort_recurse(left, next);
    kd_sort_recurse(&mut rest[1..], next);
}

fn kd_sort_by_recurse<N: KdNum, const K: usize, F>(points: &mut [[N; K]], axis: usize, cmp: &F)
where
    F: Fn(&N, &N) -> Ordering,
{
    if points.len() <= 1 {
        return;
    }
    let mid = points.len() / 2;
    points.select_nth_unstable_by(mid, |a, b| cyclic_cmp_by(axis, a, b, cmp));

    let pivot = points[mid];
    partition_in_place(&mut points[..mid], |p| {
        cmp(&p[axis], &pivot[axis]) == Ordering::Less
    });

    let next = (axis + 1) % K;
    let (left, rest) = points.split_at_mut(mid);
    kd_sort_by_recurse(left, next, cmp);
    kd_sort_by_recurse(&mut rest[1..], next, cmp);
}

fn kd_sort_parallel_recurse<N: KdNum, const K: usize>(
    points: &mut [[N; K]],
    axis: usize,
    depth: usize,
    max_threads: usize,
) {
    if points.len() <= 1 {
        return;
    }
    if (1usize << depth) >= max_threads {
        kd_sort_recurse(points, axis);
        return;
    }

    let mid = points.len() / 2;
    points.select_nth_unstable_by(mid, |a, b| cyclic_cmp(axis, a, b));

    let pivot = points[mid];
    partition_in_place(&mut points[..mid], |p| axis_less(axis, p, &pivot));

    let next = (axis + 1) % K;
    let (left, rest) = points.split_at_mut(mid);
    let right = &mut rest[1..];
    rayon::join(
        || kd_sort_parallel_recurse(left, next, depth + 1, max_threads),
        || kd_sort_parallel_recurse(right, next, depth + 1, max_threads),
    );
}

/// Move elements satisfying `pred` to the front, returning the split index.
fn partition_in_place<T, F>(xs: &mut [T], mut pred: F) -> usize
where
    F: FnMut(&T) -> bool,
{
    let mut split = 0;
    for i in 0..xs.len() {
        if pred(&xs[i]) {
            xs.swap(split, i);
            split += 1;
        }
    }
    split
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test::{assert_kd_layout, random_points};

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sorts_into_kd_layout() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [0, 1, 2, 3, 7, 100, 1000] {
            let mut points = random_points::<3>(&mut rng, n);
            kd_sort(&mut points);
            assert_kd_layout(&points);
        }
    }

    #[test]
    fn sort_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(1);
        let original = random_points::<2>(&mut rng, 500);
        let mut sorted = original.clone();
        kd_sort(&mut sorted);

        let mut a = original;
        let mut b = sorted.clone();
        lex_sort(&mut a);
        lex_sort(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn parallel_matches_sequential() {
        let mut rng = StdRng::seed_from_u64(99);
        for n in [0, 1, 2, 63, 1024, 5000] {
            let points = random_points::<3>(&mut rng, n);

            let mut sequential = points.clone();
            kd_sort(&mut sequential);

            for threads in [1, 2, 4, 8] {
                let mut parallel = points.clone();
                kd_sort_parallel_with_threads(&mut parallel, threads);
                assert_eq!(sequential, parallel, "threads={threads} n={n}");
            }
        }
    }

    #[test]
    fn kd_sort_by_with_reversed_comparator() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut points = random_points::<2>(&mut rng, 400);
        kd_sort_by(&mut points, |a: &f64, b: &f64| b.partial_cmp(a).unwrap());

        // midpoint invariant under the reversed per-axis order
        fn check(points: &[[f64; 2]], axis: usize) {
            if points.len() <= 1 {
                return;
            }
            let mid = points.len() / 2;
            let pivot = points[mid][axis];
            assert!(points[..mid].iter().all(|p| p[axis] >= pivot));
            assert!(points[mid + 1..].iter().all(|p| p[axis] <= pivot));
            check(&points[..mid], (axis + 1) % 2);
            check(&points[mid + 1..], (axis + 1) % 2);
        }
        check(&points, 0);
    }

    #[test]
    fn lex_sort_is_total_cyclic_order() {
        let mut points = vec![[2.0, 1.0], [1.0, 9.0], [1.0, 3.0], [2.0, 0.0]];
        lex_sort(&mut points);
        assert_eq!(
            points,
            vec![[1.0, 3.0], [1.0, 9.0], [2.0, 0.0], [2.0, 1.0]]
        );
    }

    #[test]
    fn duplicate_points_sort_cleanly() {
        let mut points = vec![[1.0, 1.0]; 257];
        points.extend_from_slice(&[[0.0, 2.0], [2.0, 0.0]]);
        kd_sort(&mut points);
        assert_kd_layout(&points);
    }
}
