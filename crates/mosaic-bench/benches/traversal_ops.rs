//! Criterion benchmarks for whole-raster traversal.

use criterion::{criterion_group, criterion_main, Criterion};
use mosaic_bench::{reference_landscape, reference_queries};
use mosaic_core::Raster;
use mosaic_engine::{Engine, EngineConfig, IndicatorKind, WindowQuery};
use mosaic_indicator::Mean;
use mosaic_test_utils::brute_force_cells;
use mosaic_window::{Footprint, WindowShape};
use std::hint::black_box;
use std::sync::Arc;

/// Benchmark: every indicator over the 256x256 reference landscape, radius 3.
fn bench_reference_indicators(c: &mut Criterion) {
    let source = reference_landscape(42);
    let mut group = c.benchmark_group("reference_r3");
    group.sample_size(10);
    for query in reference_queries(3) {
        let mut sink = Raster::empty(source.rows(), source.cols());
        let mut engine = Engine::default();
        group.bench_function(query.indicator.name(), |b| {
            b.iter(|| {
                engine.compute(&query, &source, &mut sink).unwrap();
                black_box(&sink);
            });
        });
    }
    group.finish();
}

/// Benchmark: sliding mean vs. recomputing every window, radius 7.
///
/// The sliding cost follows the window's boundary (2·15 cells per step);
/// brute force pays the full 225-cell area at every cell.
fn bench_sliding_vs_brute_force(c: &mut Criterion) {
    let source = reference_landscape(7);
    let fp = Arc::new(Footprint::generate(WindowShape::Square, 7.0).unwrap());
    let mean = Mean::new(fp).unwrap();
    let mut group = c.benchmark_group("mean_r7");
    group.sample_size(10);

    let mut sink = Raster::empty(source.rows(), source.cols());
    let mut engine = Engine::default();
    group.bench_function("sliding", |b| {
        b.iter(|| {
            engine.run(&mean, &source, &mut sink).unwrap();
            black_box(&sink);
        });
    });
    group.bench_function("brute_force", |b| {
        b.iter(|| black_box(brute_force_cells(&mean, &source)));
    });
    group.finish();
}

/// Benchmark: Shannon diversity with 1, 2, and 4 line workers.
fn bench_worker_scaling(c: &mut Criterion) {
    let source = reference_landscape(3);
    let query = WindowQuery::new(IndicatorKind::ShannonDiversity, WindowShape::Circle, 5.0);
    let mut group = c.benchmark_group("shannon_workers");
    group.sample_size(10);
    for workers in [1, 2, 4] {
        let mut sink = Raster::empty(source.rows(), source.cols());
        let mut engine = Engine::new(EngineConfig::with_workers(workers)).unwrap();
        group.bench_function(format!("{workers}"), |b| {
            b.iter(|| {
                engine.compute(&query, &source, &mut sink).unwrap();
                black_box(&sink);
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_reference_indicators,
    bench_sliding_vs_brute_force,
    bench_worker_scaling
);
criterion_main!(benches);
