//! Integration test: storage failures and worker panics abort cleanly.

use mosaic_core::{Extent, GridError, GridSource, Raster};
use mosaic_engine::{ComputeError, Engine, EngineConfig, IndicatorKind, WindowQuery};
use mosaic_test_utils::{FailingSource, RecordingSink};
use mosaic_window::WindowShape;

fn count_query() -> WindowQuery {
    WindowQuery::new(IndicatorKind::Count, WindowShape::Square, 1.0)
}

/// Panics when any cell of `row` is read.
struct PanickingSource {
    extent: Extent,
    row: usize,
}

impl GridSource<u8> for PanickingSource {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn get(&self, row: usize, _col: usize) -> Result<Option<u8>, GridError> {
        if row == self.row {
            panic!("storage driver crashed on row {row}");
        }
        Ok(Some(1))
    }
}

// ── Backing store ─────────────────────────────────────────────────

#[test]
fn backing_store_failure_names_line_and_cell() {
    for workers in [1, 3] {
        let source = FailingSource::new(Raster::filled(6, 5, 1u8), 3, 2);
        let mut sink = RecordingSink::new(6, 5);
        let mut engine = Engine::new(EngineConfig::with_workers(workers)).unwrap();
        let err = engine.compute(&count_query(), &source, &mut sink).unwrap_err();

        // Line 2 is the first whose window reaches row 3.
        match err {
            ComputeError::Grid {
                line: 2,
                source: GridError::BackingStore { row: 3, col: 2, .. },
            } => {}
            other => panic!("unexpected error with {workers} workers: {other:?}"),
        }
        // Lines before the failure are complete; nothing after is written.
        assert_eq!(sink.written(), 10);
        assert!(sink.order().iter().all(|&(r, _)| r < 2));
    }
}

#[test]
fn rows_past_a_failure_are_not_read() {
    let workers = 3;
    let source = FailingSource::new(Raster::filled(60, 4, 1u8), 5, 0);
    let mut sink = RecordingSink::new(60, 4);
    let mut engine = Engine::new(EngineConfig::with_workers(workers)).unwrap();
    let err = engine.compute(&count_query(), &source, &mut sink).unwrap_err();
    assert!(matches!(err, ComputeError::Grid { line: 4, .. }));
    assert_eq!(sink.written(), 16);

    // Lines 4, 5 and 6 all fail, and no more than `workers` lines run at
    // once, so line 7 is never started. Line 6 reaches one row below itself.
    let reach = 1;
    assert!(
        source.highest_row_read() <= 4 + (workers - 1) + reach,
        "read up to row {}",
        source.highest_row_read()
    );
}

#[test]
fn failed_run_leaves_previous_metrics() {
    let mut engine = Engine::default();
    let good = Raster::filled(3, 3, 1u8);
    let mut sink = Raster::empty(3, 3);
    engine.compute(&count_query(), &good, &mut sink).unwrap();
    let before = engine.last_metrics().clone();

    let bad = FailingSource::new(Raster::filled(3, 3, 1u8), 0, 0);
    assert!(engine.compute(&count_query(), &bad, &mut sink).is_err());
    assert_eq!(engine.last_metrics(), &before);
}

// ── Worker panics ─────────────────────────────────────────────────

#[test]
fn worker_panic_is_reported_for_first_affected_line() {
    let source = PanickingSource {
        extent: Extent::new(6, 4),
        row: 4,
    };
    let mut sink = RecordingSink::new(6, 4);
    let mut engine = Engine::new(EngineConfig::with_workers(2)).unwrap();
    let err = engine.compute(&count_query(), &source, &mut sink).unwrap_err();
    assert_eq!(err, ComputeError::WorkerPanicked { line: 3 });
    assert_eq!(sink.written(), 12);
}

// ── Parameters ────────────────────────────────────────────────────

#[test]
fn invalid_radius_rejected_before_reading() {
    let source = FailingSource::new(Raster::filled(3, 3, 1u8), 0, 0);
    let mut sink = Raster::empty(3, 3);
    let q = WindowQuery::new(IndicatorKind::Count, WindowShape::Square, 1.5);
    let err = Engine::default().compute(&q, &source, &mut sink).unwrap_err();
    assert!(matches!(err, ComputeError::Window(_)));
}
