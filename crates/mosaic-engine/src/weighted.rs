//! Distance-weighted windows and whole-raster summaries.
//!
//! A [`DistanceKernel`] has no slide delta, so every focal cell starts from
//! an empty accumulator and adds each kernel member with its weight. Lines
//! are still independent and run through the same scheduler as the sliding
//! traversal.

use crate::error::ComputeError;
use crate::guard::LineWriter;
use crate::traversal::{LineOutput, LineStats};
use mosaic_core::{GridPos, GridSource};
use mosaic_indicator::{WeightedAccumulator, WeightedSample};
use mosaic_window::DistanceKernel;

/// Evaluate `empty`'s indicator over `kernel` at every cell of line `row`.
///
/// Members outside the raster are skipped, so border windows shrink.
pub fn run_weighted_line<W, S>(
    kernel: &DistanceKernel,
    empty: &W,
    source: &S,
    row: usize,
) -> Result<LineOutput<W::Output>, ComputeError>
where
    W: WeightedAccumulator,
    S: GridSource<W::Value>,
{
    let extent = source.extent();
    let mut writer = LineWriter::new(row, extent.cols, empty.name());
    let mut stats = LineStats::default();
    for col in 0..extent.cols {
        let focal = GridPos::at(row, col);
        let mut acc = empty.clone();
        for (member, weight) in kernel.members() {
            let Some((r, c)) = extent.locate(focal + member) else {
                continue;
            };
            let value = source
                .get(r, c)
                .map_err(|source| ComputeError::Grid { line: row, source })?;
            acc.add_sample(WeightedSample { value, weight });
            stats.inserts += 1;
        }
        let value = acc.extract();
        if value.is_none() {
            stats.no_result += 1;
        }
        writer.write(col, value);
    }
    Ok(LineOutput {
        row,
        cells: writer.finish(),
        stats,
    })
}

/// Every cell of line `row` added to a copy of `empty` with weight 1.
pub fn summarize_line<W, S>(empty: &W, source: &S, row: usize) -> Result<W, ComputeError>
where
    W: WeightedAccumulator,
    S: GridSource<W::Value>,
{
    let mut acc = empty.clone();
    for col in 0..source.extent().cols {
        let value = source
            .get(row, col)
            .map_err(|source| ComputeError::Grid { line: row, source })?;
        acc.add_sample(WeightedSample::unit(value));
    }
    Ok(acc)
}
