//! Criterion micro-benchmarks for window geometry.

use criterion::{criterion_group, criterion_main, Criterion};
use mosaic_window::{Contiguity, EdgeFootprint, Footprint, PatchTopology, WindowShape};
use std::hint::black_box;

/// Benchmark: generate a radius-10 circle footprint with its slide delta.
fn bench_circle_footprint(c: &mut Criterion) {
    c.bench_function("footprint_circle_r10", |b| {
        b.iter(|| black_box(Footprint::generate(WindowShape::Circle, black_box(10.0)).unwrap()));
    });
}

/// Benchmark: derive the adjacent pairs of a radius-10 edge circle.
fn bench_edge_footprint(c: &mut Criterion) {
    c.bench_function("edge_footprint_circle_r10", |b| {
        b.iter(|| black_box(EdgeFootprint::generate(WindowShape::EdgeCircle, black_box(10.0)).unwrap()));
    });
}

/// Benchmark: identify patches in a striped radius-5 square window.
fn bench_patch_identify(c: &mut Criterion) {
    let fp = Footprint::generate(WindowShape::PatchSquare, 5.0).unwrap();
    let topology = PatchTopology::new(&fp, Contiguity::Queen);
    let values: Vec<Option<u8>> = fp
        .members()
        .map(|m| (m.row % 3 != 0).then_some(((m.col + 11) / 3) as u8))
        .collect();

    c.bench_function("patch_identify_r5_queen", |b| {
        b.iter(|| black_box(topology.identify(black_box(&values)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_circle_footprint,
    bench_edge_footprint,
    bench_patch_identify
);
criterion_main!(benches);
