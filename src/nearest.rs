//! Euclidean nearest-neighbor search.
//!
//! The exact search descends into the half containing the query first, then
//! re-enters the far half only when the axis gap to the pivot is strictly
//! smaller than the best distance found so far. The k-variant keeps a
//! bounded max-heap and prunes inclusively against its worst kept distance:
//! while the heap is below capacity the pivot just added keeps the gap test
//! true, so no half is skipped before `n` candidates exist.

use std::collections::BinaryHeap;

use crate::cmp::{axis_dist, axis_less, l2_dist};
use crate::r#type::KdNum;

pub(crate) fn nearest<N: KdNum, const K: usize>(
    points: &[[N; K]],
    value: &[N; K],
) -> Option<usize> {
    nearest_recurse(points, value, 0, points.len(), 0)
}

pub(crate) fn nearest_approx<N: KdNum, const K: usize>(
    points: &[[N; K]],
    value: &[N; K],
    eps: f64,
) -> Option<usize> {
    nearest_approx_recurse(points, value, eps, 0, points.len(), 0)
}

pub(crate) fn knn<N: KdNum, const K: usize>(
    points: &[[N; K]],
    value: &[N; K],
    n: usize,
) -> Vec<usize> {
    let mut heap = NBest::new(n);
    knn_recurse(points, value, 0, points.len(), 0, &mut heap);
    heap.into_positions()
}

fn nearest_recurse<N: KdNum, const K: usize>(
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
        return Some(first);
    }

    let mid = first + len / 2;
    let next = (axis + 1) % K;
    let pivot = &points[mid];
    let search_left = axis_less(axis, value, pivot);

    let near = if search_left {
        nearest_recurse(points, value, first, mid, next)
    } else {
        nearest_recurse(points, value, mid + 1, last, next)
    };

    let pivot_dist = l2_dist(pivot, value);
    let (mut best, best_dist) = match near {
        Some(s) => {
            let d = l2_dist(&points[s], value);
            if d < pivot_dist {
                (s, d)
            } else {
                (mid, pivot_dist)
            }
        }
        None => (mid, pivot_dist),
    };

    if axis_dist(value[axis], pivot[axis]) < best_dist {
        let far = if search_left {
            nearest_recurse(points, value, mid + 1, last, next)
        } else {
            nearest_recurse(points, value, first, mid, next)
        };
        if let Some(s) = far {
            if l2_dist(&points[s], value) < best_dist {
                best = s;
            }
        }
    }
    Some(best)
}

fn nearest_approx_recurse<N: KdNum, const K: usize>(
    points: &[[N; K]],
    value: &[N; K],
    eps: f64,
    first: usize,
    last: usize,
    axis: usize,
) -> Option<usize> {
    let len = last - first;
    if len == 0 {
        return None;
    }
    if len == 1 {
        return Some(first);
    }

    let mid = first + len / 2;
    let next = (axis + 1) % K;
    let pivot = &points[mid];

    let pivot_dist = l2_dist(pivot, value);
    if pivot_dist < eps {
        return Some(mid);
    }

    let search_left = axis_less(axis, value, pivot);
    let near = if search_left {
        nearest_approx_recurse(points, value, eps, first, mid, next)
    } else {
        nearest_approx_recurse(points, value, eps, mid + 1, last, next)
    };

    let (mut best, best_dist) = match near {
        Some(s) => {
            let d = l2_dist(&points[s], value);
            if d < eps {
                return Some(s);
            }
            if d < pivot_dist {
                (s, d)
            } else {
                (mid, pivot_dist)
            }
        }
        None => (mid, pivot_dist),
    };

    // conservative: when eps exceeds the best distance this is never true and
    // the far half is skipped, trading accuracy (within eps) for pruning
    if axis_dist(value[axis], pivot[axis]) < best_dist - eps {
        let far = if search_left {
            nearest_approx_recurse(points, value, eps, mid + 1, last, next)
        } else {
            nearest_approx_recurse(points, value, eps, first, mid, next)
        };
        if let Some(s) = far {
            if l2_dist(&points[s], value) < best_dist {
                best = s;
            }
        }
    }
    Some(best)
}

fn knn_recurse<N: KdNum, const K: usize>(
    points: &[[N; K]],
    value: &[N; K],
    first: usize,
    last: usize,
    axis: usize,
    heap: &mut NBest,
) {
    let len = last - first;
    if len == 0 {
        return;
    }
    if len == 1 {
        heap.add(l2_dist(&points[first], value), first);
        return;
    }

    let mid = first + len / 2;
    let next = (axis + 1) % K;
    let pivot = &points[mid];
    heap.add(l2_dist(pivot, value), mid);

    let search_left = axis_less(axis, value, pivot);
    if search_left {
        knn_recurse(points, value, first, mid, next, heap);
    } else {
        knn_recurse(points, value, mid + 1, last, next, heap);
    }

    // inclusive, unlike the single-neighbor prune
    if axis_dist(value[axis], pivot[axis]) <= heap.max_key() {
        if search_left {
            knn_recurse(points, value, mid + 1, last, next, heap);
        } else {
            knn_recurse(points, value, first, mid, next, heap);
        }
    }
}

struct Candidate {
    dist: f64,
    pos: usize,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.dist.total_cmp(&other.dist)
    }
}

/// Bounded max-heap over candidate neighbors; the top is the worst kept one.
struct NBest {
    cap: usize,
    heap: BinaryHeap<Candidate>,
}

impl NBest {
    fn new(cap: usize) -> Self {
        Self {
            cap,
            heap: BinaryHeap::with_capacity(cap + 1),
        }
    }

    fn add(&mut self, dist: f64, pos: usize) {
        self.heap.push(Candidate { dist, pos });
        if self.heap.len() > self.cap {
            self.heap.pop();
        }
    }

    fn max_key(&self) -> f64 {
        self.heap.peek().map_or(f64::INFINITY, |c| c.dist)
    }

    /// Pop out all kept positions, worst first.
    fn into_positions(mut self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.heap.len());
        while let Some(c) = self.heap.pop() {
            out.push(c.pos);
        }
        out
    }
}
