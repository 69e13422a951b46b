use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use kd_slice::{kd_sort, kd_sort_parallel, lex_sort, KdSlice};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn generate_points(n: usize) -> Vec<[f64; 3]> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| {
            [
                rng.gen_range(-180.0..180.0),
                rng.gen_range(-90.0..90.0),
                rng.gen_range(0.0..1000.0),
            ]
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for n in [1_000, 100_000] {
        let points = generate_points(n);

        group.bench_with_input(BenchmarkId::new("kd_sort", n), &points, |b, points| {
            b.iter(|| {
                let mut points = points.clone();
                kd_sort(&mut points);
                points
            })
        });

        group.bench_with_input(
            BenchmarkId::new("kd_sort_parallel", n),
            &points,
            |b, points| {
                b.iter(|| {
                    let mut points = points.clone();
                    kd_sort_parallel(&mut points);
                    points
                })
            },
        );

        group.bench_with_input(BenchmarkId::new("lex_sort", n), &points, |b, points| {
            b.iter(|| {
                let mut points = points.clone();
                lex_sort(&mut points);
                points
            })
        });
    }

    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut points = generate_points(100_000);
    kd_sort(&mut points);
    let tree = KdSlice::try_new(&points).unwrap();

    let query = [12.5, -33.7, 420.0];

    c.bench_function("nearest", |b| b.iter(|| tree.nearest(&query)));
    c.bench_function("knn_10", |b| b.iter(|| tree.knn(&query, 10)));
    c.bench_function("lower_bound", |b| b.iter(|| tree.lower_bound(&query)));
    c.bench_function("range", |b| {
        b.iter(|| tree.range(&[0.0, -45.0, 100.0], &[45.0, 0.0, 300.0]))
    });
}

criterion_group!(benches, bench_build, bench_queries);
criterion_main!(benches);
