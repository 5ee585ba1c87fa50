//! Test utilities and mock grids for Mosaic development.
//!
//! Provides deterministic raster fixtures, two oracles, and mock
//! [`GridSource`] / [`GridSink`] implementations for failure and
//! write-order tests.
//!
//! - [`oracle`] fills a fresh accumulator with the whole window at every
//!   cell, isolating the slide delta.
//! - [`naive`] writes every indicator out from its definition over the raw
//!   window values, checking the formulas independently of the
//!   accumulators.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod naive;
pub mod oracle;

pub use fixtures::{random_class_raster, random_real_raster, sequence_raster};
pub use oracle::{brute_force_cells, brute_force_edges};

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use mosaic_core::{Extent, GridError, GridSink, GridSource, Raster};

/// A source that fails with [`GridError::BackingStore`] when one chosen
/// cell is read, and otherwise reads through to an in-memory raster.
///
/// Records the highest row any read touched, so tests can check how far a
/// computation got after the failure.
pub struct FailingSource<T> {
    inner: Raster<T>,
    fail_at: (usize, usize),
    highest_row: AtomicUsize,
}

impl<T: Copy> FailingSource<T> {
    pub fn new(inner: Raster<T>, row: usize, col: usize) -> Self {
        Self {
            inner,
            fail_at: (row, col),
            highest_row: AtomicUsize::new(0),
        }
    }

    /// Highest row read so far, including the failing read.
    pub fn highest_row_read(&self) -> usize {
        self.highest_row.load(Ordering::SeqCst)
    }
}

impl<T: Copy> GridSource<T> for FailingSource<T> {
    fn extent(&self) -> Extent {
        GridSource::extent(&self.inner)
    }

    fn get(&self, row: usize, col: usize) -> Result<Option<T>, GridError> {
        self.highest_row.fetch_max(row, Ordering::SeqCst);
        if (row, col) == self.fail_at {
            return Err(GridError::BackingStore {
                row,
                col,
                reason: "injected read failure".into(),
            });
        }
        self.inner.get(row, col)
    }
}

/// A sink that records the order of writes and panics if any cell is
/// written twice.
pub struct RecordingSink<R> {
    raster: Raster<R>,
    seen: HashSet<(usize, usize)>,
    order: Vec<(usize, usize)>,
}

impl<R: Copy> RecordingSink<R> {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            raster: Raster::empty(rows, cols),
            seen: HashSet::new(),
            order: Vec::new(),
        }
    }

    /// Coordinates in the order they were written.
    pub fn order(&self) -> &[(usize, usize)] {
        &self.order
    }

    /// Number of cells written.
    pub fn written(&self) -> usize {
        self.order.len()
    }

    /// The values written so far.
    pub fn raster(&self) -> &Raster<R> {
        &self.raster
    }
}

impl<R: Copy> GridSink<R> for RecordingSink<R> {
    fn extent(&self) -> Extent {
        GridSink::extent(&self.raster)
    }

    fn set(&mut self, row: usize, col: usize, value: Option<R>) -> Result<(), GridError> {
        assert!(
            self.seen.insert((row, col)),
            "cell ({row}, {col}) written twice"
        );
        self.order.push((row, col));
        self.raster.set(row, col, value)
    }
}
