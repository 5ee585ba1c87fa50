//! Integration test: whole-raster properties of the engine.
//!
//! Uniform rasters, border shrinkage, patch areas, missing-value exclusion,
//! and the golden sequence fixture, all through the runtime `compute` path.

use mosaic_core::Raster;
use mosaic_engine::{compute, Engine, EngineConfig, IndicatorKind, WindowQuery};
use mosaic_test_utils::{random_real_raster, sequence_raster, RecordingSink};
use mosaic_window::{Contiguity, Footprint, WindowShape};

fn query(indicator: IndicatorKind, shape: WindowShape, radius: f64) -> WindowQuery {
    WindowQuery::new(indicator, shape, radius)
}

fn approx(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-12)
}

/// In-bounds members of `fp` around `(row, col)` of a `rows x cols` raster.
fn covered(fp: &Footprint, rows: usize, cols: usize, row: usize, col: usize) -> usize {
    fp.members()
        .filter(|m| {
            let r = row as i32 + m.row;
            let c = col as i32 + m.col;
            r >= 0 && c >= 0 && (r as usize) < rows && (c as usize) < cols
        })
        .count()
}

// ── Uniform raster ────────────────────────────────────────────────

#[test]
fn uniform_raster_cell_indicators() {
    let source = Raster::filled(6, 7, 4u8);
    let fp = Footprint::generate(WindowShape::Circle, 1.5).unwrap();

    let count = compute(&query(IndicatorKind::Count, WindowShape::Circle, 1.5), &source).unwrap();
    let mean = compute(&query(IndicatorKind::Mean, WindowShape::Circle, 1.5), &source).unwrap();
    let mode = compute(&query(IndicatorKind::MostCommonClass, WindowShape::Circle, 1.5), &source).unwrap();
    let shannon = compute(&query(IndicatorKind::ShannonDiversity, WindowShape::Circle, 1.5), &source).unwrap();
    let simpson = compute(&query(IndicatorKind::SimpsonDiversity, WindowShape::Circle, 1.5), &source).unwrap();

    for (row, col, _) in source.iter() {
        assert_eq!(count.cell(row, col), Some(covered(&fp, 6, 7, row, col) as f64));
        assert_eq!(mean.cell(row, col), Some(4.0));
        assert_eq!(mode.cell(row, col), Some(4.0));
        assert!(approx(shannon.cell(row, col), 0.0));
        assert!(approx(simpson.cell(row, col), 0.0));
    }
    assert_eq!(count.cell(3, 3), Some(9.0));
    assert_eq!(count.cell(0, 0), Some(4.0));
}

#[test]
fn uniform_raster_edge_indicators() {
    let source = Raster::filled(6, 7, 4u8);
    let density = compute(&query(IndicatorKind::EdgeDensity, WindowShape::EdgeSquare, 1.0), &source).unwrap();
    let iji = compute(&query(IndicatorKind::Interspersion, WindowShape::EdgeSquare, 1.0), &source).unwrap();
    for (row, col, _) in source.iter() {
        assert_eq!(density.cell(row, col), Some(0.0));
        assert_eq!(iji.cell(row, col), None);
    }
}

#[test]
fn uniform_raster_patch_indicators() {
    let source = Raster::filled(6, 7, 4u8);
    let fp = Footprint::generate(WindowShape::PatchSquare, 1.0).unwrap();
    let size = compute(&query(IndicatorKind::AreaWeightedPatchSize, WindowShape::PatchSquare, 1.0), &source).unwrap();
    let shape = compute(&query(IndicatorKind::PatchWeightedShapeIndex, WindowShape::PatchSquare, 1.0), &source).unwrap();
    let density = compute(&query(IndicatorKind::PatchDensity, WindowShape::PatchSquare, 1.0), &source).unwrap();
    for (row, col, _) in source.iter() {
        let n = covered(&fp, 6, 7, row, col) as f64;
        // One patch covering the whole (possibly truncated) window.
        assert_eq!(size.cell(row, col), Some(n));
        assert!(approx(shape.cell(row, col), 1.0));
        assert!(approx(density.cell(row, col), 1.0 / n));
    }
}

// ── Boundary shrink ───────────────────────────────────────────────

#[test]
fn border_windows_shrink() {
    let source = Raster::filled(6, 7, 1u8);
    let out = compute(&query(IndicatorKind::Count, WindowShape::Square, 2.0), &source).unwrap();
    assert_eq!(out.cell(0, 0), Some(9.0));
    assert_eq!(out.cell(0, 3), Some(15.0));
    assert_eq!(out.cell(2, 2), Some(25.0));
    assert_eq!(out.cell(5, 6), Some(9.0));
}

// ── Patch area ────────────────────────────────────────────────────

#[test]
fn checkerboard_patches_depend_on_contiguity() {
    let source = Raster::from_fn(5, 5, |r, c| Some(((r + c) % 2) as u8));
    let rook = query(IndicatorKind::AreaWeightedPatchSize, WindowShape::PatchSquare, 1.0);
    let queen = rook.with_contiguity(Contiguity::Queen);

    let by_rook = compute(&rook, &source).unwrap();
    let by_queen = compute(&queen, &source).unwrap();

    // Rook: every cell is its own patch.
    assert_eq!(by_rook.cell(2, 2), Some(1.0));
    // Queen: the five focal-colour cells and the four others join up.
    assert!(approx(by_queen.cell(2, 2), 41.0 / 9.0));
}

#[test]
fn patch_density_counts_components() {
    // 1 1 2
    // 3 1 2
    // 3 3 2
    let source = Raster::from_values(3, 3, vec![1u8, 1, 2, 3, 1, 2, 3, 3, 2]).unwrap();
    let q = query(IndicatorKind::PatchDensity, WindowShape::PatchSquare, 1.0);
    let out = compute(&q, &source).unwrap();
    assert!(approx(out.cell(1, 1), 3.0 / 9.0));
}

// ── Missing values ────────────────────────────────────────────────

#[test]
fn missing_cells_are_excluded() {
    let source = Raster::from_cells(1, 3, vec![Some(2u8), None, Some(6)]).unwrap();
    let count = compute(&query(IndicatorKind::Count, WindowShape::Square, 1.0), &source).unwrap();
    let mean = compute(&query(IndicatorKind::Mean, WindowShape::Square, 1.0), &source).unwrap();
    assert_eq!(count.cells(), &[Some(1.0), Some(2.0), Some(1.0)]);
    assert_eq!(mean.cells(), &[Some(2.0), Some(4.0), Some(6.0)]);
}

#[test]
fn all_missing_window_has_no_result() {
    let source: Raster<u8> = Raster::empty(3, 3);
    for kind in IndicatorKind::ALL {
        let shape = match kind.family() {
            mosaic_window::WindowFamily::Cell => WindowShape::Square,
            mosaic_window::WindowFamily::Edge => WindowShape::EdgeSquare,
            mosaic_window::WindowFamily::Patch => WindowShape::PatchSquare,
        };
        let out = compute(&query(kind, shape, 1.0), &source).unwrap();
        assert!(
            out.iter().all(|(_, _, v)| v.is_none()),
            "{kind} produced a result over missing data"
        );
    }
}

#[test]
fn continuous_mean_skips_missing_reals() {
    let source = random_real_raster(5, 5, 0.3, 17);
    let mut sink = Raster::empty(5, 5);
    let q = query(IndicatorKind::Mean, WindowShape::Square, 4.0);
    Engine::default().compute_continuous(&q, &source, &mut sink).unwrap();

    let present: Vec<f64> = source.iter().filter_map(|(_, _, v)| v).collect();
    let expected = present.iter().sum::<f64>() / present.len() as f64;
    // A radius-4 window covers the whole 5x5 raster from every cell.
    for (_, _, v) in sink.iter() {
        let v = v.unwrap();
        assert!((v - expected).abs() < 1e-9);
    }
}

// ── Golden fixture ────────────────────────────────────────────────

#[test]
fn golden_sequence_mean() {
    let source = sequence_raster(5, 6);
    let out = compute(&query(IndicatorKind::Mean, WindowShape::Square, 2.0), &source).unwrap();
    assert_eq!(out.cell(2, 2), Some(3.0));
}

// ── Write discipline ──────────────────────────────────────────────

#[test]
fn each_cell_written_once_in_row_major_order() {
    let source = sequence_raster(9, 4);
    let q = query(IndicatorKind::ShannonDiversity, WindowShape::Circle, 1.0);
    for workers in [1, 3] {
        let mut sink = RecordingSink::new(9, 4);
        Engine::new(EngineConfig::with_workers(workers))
            .unwrap()
            .compute(&q, &source, &mut sink)
            .unwrap();
        let expected: Vec<_> = (0..9).flat_map(|r| (0..4).map(move |c| (r, c))).collect();
        assert_eq!(sink.order(), expected.as_slice());
    }
}
