//! Criterion benchmark harness: measures bounding-box and sphere query
//! latency for both strategies at multiple point counts.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use spatial_bench::generate::{generate_uniform, Bounds, Point, DEFAULT_SEED};
use spatial_bench::query::{BoundingBox, FullScan, Prefiltered, SphereStrategy};
use spatial_bench::store::{PointStore, DEFAULT_BATCH_SIZE};
use std::time::Duration;

const CENTER: Point = Point {
    x: 50.0,
    y: 50.0,
    z: 50.0,
};
const RADIUS: f64 = 5.0;

/// Point counts to benchmark.
fn point_counts() -> Vec<usize> {
    vec![10_000, 100_000]
}

/// Create an in-memory store and load `count` seeded points.
fn setup_store(count: usize) -> PointStore {
    let bounds = Bounds::new(0.0, 100.0).expect("valid bounds");
    let points = generate_uniform(count, bounds, DEFAULT_SEED);

    let mut store = PointStore::open_in_memory().expect("open in-memory SQLite");
    store.create_schema().expect("create schema");
    store
        .insert_batch(&points, DEFAULT_BATCH_SIZE)
        .expect("insert points");
    store
}

fn bench_bbox(c: &mut Criterion) {
    let mut group = c.benchmark_group("query/bbox");
    group.measurement_time(Duration::from_secs(10));

    for count in point_counts() {
        let store = setup_store(count);
        let bbox = BoundingBox::around(CENTER, RADIUS).expect("valid radius");

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| store.query_bbox(&bbox).expect("bbox query"));
        });
    }
    group.finish();
}

fn bench_sphere_full_scan(c: &mut Criterion) {
    let strategy = FullScan::new();
    let mut group = c.benchmark_group("query/sphere-full-scan");
    group.measurement_time(Duration::from_secs(10));

    for count in point_counts() {
        let store = setup_store(count);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                strategy
                    .query(&store, CENTER, RADIUS)
                    .expect("sphere query")
            });
        });
    }
    group.finish();
}

fn bench_sphere_prefiltered(c: &mut Criterion) {
    let strategy = Prefiltered::new();
    let mut group = c.benchmark_group("query/sphere-prefiltered");
    group.measurement_time(Duration::from_secs(10));

    for count in point_counts() {
        let store = setup_store(count);

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                strategy
                    .query(&store, CENTER, RADIUS)
                    .expect("sphere query")
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_bbox,
    bench_sphere_full_scan,
    bench_sphere_prefiltered
);
criterion_main!(benches);
