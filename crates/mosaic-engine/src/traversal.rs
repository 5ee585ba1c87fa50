//! Sliding traversal of one raster line.

use crate::error::ComputeError;
use crate::gather::Gather;
use crate::guard::LineWriter;
use mosaic_core::{CellValue, GridPos, GridSource};
use mosaic_indicator::{Accumulator, Indicator};
use std::marker::PhantomData;

/// Where a [`LineTraversal`] is in its life.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineState {
    /// Created; nothing inserted yet.
    Idle,
    /// Inserting the full window around the first focal cell.
    Priming,
    /// Moving one column at a time, applying only the slide delta.
    Sliding,
    /// Every focal cell has been extracted, or the line failed.
    Done,
}

/// Work counters for one line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineStats {
    /// Samples inserted.
    pub inserts: u64,
    /// Samples removed.
    pub removes: u64,
    /// Focal cells with no result.
    pub no_result: usize,
}

/// A finished line.
#[derive(Clone, Debug, PartialEq)]
pub struct LineOutput<R> {
    /// Line index.
    pub row: usize,
    /// One result per column.
    pub cells: Vec<Option<R>>,
    /// Work done on the line.
    pub stats: LineStats,
}

/// Drives one accumulator along one line, left to right.
///
/// The first call to [`advance`](Self::advance) primes the window around
/// column 0; every later call removes the members that left with the previous
/// focal cell, inserts the members that entered with the new one, and
/// extracts. Members outside the raster are skipped entirely.
pub struct LineTraversal<'a, T, I: Indicator<T>, S> {
    indicator: &'a I,
    source: &'a S,
    row: usize,
    cols: usize,
    next_col: usize,
    state: LineState,
    acc: I::Accumulator,
    stats: LineStats,
    _value: PhantomData<fn(T)>,
}

impl<'a, T, I, S> LineTraversal<'a, T, I, S>
where
    T: CellValue,
    I: Indicator<T>,
    I::Window: Gather<T, Sample = I::Sample>,
    S: GridSource<T>,
{
    /// A traversal of line `row` of `source`.
    pub fn new(indicator: &'a I, source: &'a S, row: usize) -> Self {
        let cols = source.extent().cols;
        Self {
            indicator,
            source,
            row,
            cols,
            next_col: 0,
            state: if cols == 0 {
                LineState::Done
            } else {
                LineState::Idle
            },
            acc: indicator.accumulator(),
            stats: LineStats::default(),
            _value: PhantomData,
        }
    }

    /// Current state.
    pub fn state(&self) -> LineState {
        self.state
    }

    /// Work done so far.
    pub fn stats(&self) -> LineStats {
        self.stats
    }

    /// Move to the next focal cell and extract its value.
    ///
    /// Returns `Ok(None)` once the line is exhausted. After an error the
    /// traversal is `Done`.
    pub fn advance(&mut self) -> Result<Option<(usize, Option<I::Output>)>, ComputeError> {
        if self.state == LineState::Done {
            return Ok(None);
        }
        let col = self.next_col;
        match self.step(col) {
            Ok(value) => {
                self.next_col += 1;
                self.state = if self.next_col == self.cols {
                    LineState::Done
                } else {
                    LineState::Sliding
                };
                Ok(Some((col, value)))
            }
            Err(e) => {
                self.state = LineState::Done;
                Err(e)
            }
        }
    }

    fn step(&mut self, col: usize) -> Result<Option<I::Output>, ComputeError> {
        let indicator = self.indicator;
        let window = indicator.window();
        let focal = GridPos::at(self.row, col);
        if self.state == LineState::Idle {
            self.state = LineState::Priming;
            for m in window.members() {
                self.insert(window, m, focal)?;
            }
        } else {
            let previous = GridPos::at(self.row, col - 1);
            for &m in window.slide().leaving() {
                self.remove(window, m, previous, col)?;
            }
            for &m in window.slide().entering() {
                self.insert(window, m, focal)?;
            }
        }
        let value = self.acc.extract(focal);
        if value.is_none() {
            self.stats.no_result += 1;
        }
        Ok(value)
    }

    fn insert(
        &mut self,
        window: &I::Window,
        member: <I::Window as Gather<T>>::Member,
        focal: GridPos,
    ) -> Result<(), ComputeError> {
        let sample = window
            .sample(self.source, member, focal)
            .map_err(|source| ComputeError::Grid {
                line: self.row,
                source,
            })?;
        if let Some(sample) = sample {
            self.acc.insert(sample);
            self.stats.inserts += 1;
        }
        Ok(())
    }

    fn remove(
        &mut self,
        window: &I::Window,
        member: <I::Window as Gather<T>>::Member,
        focal: GridPos,
        col: usize,
    ) -> Result<(), ComputeError> {
        let sample = window
            .sample(self.source, member, focal)
            .map_err(|source| ComputeError::Grid {
                line: self.row,
                source,
            })?;
        if let Some(sample) = sample {
            self.acc
                .remove(sample)
                .map_err(|source| ComputeError::Accumulator {
                    line: self.row,
                    col,
                    source,
                })?;
            self.stats.removes += 1;
        }
        Ok(())
    }
}

/// Traverse line `row` completely.
pub fn run_line<T, I, S>(indicator: &I, source: &S, row: usize) -> Result<LineOutput<I::Output>, ComputeError>
where
    T: CellValue,
    I: Indicator<T>,
    I::Window: Gather<T, Sample = I::Sample>,
    S: GridSource<T>,
{
    let mut traversal = LineTraversal::new(indicator, source, row);
    let mut writer = LineWriter::new(row, source.extent().cols, indicator.name());
    while let Some((col, value)) = traversal.advance()? {
        writer.write(col, value);
    }
    Ok(LineOutput {
        row,
        cells: writer.finish(),
        stats: traversal.stats(),
    })
}
