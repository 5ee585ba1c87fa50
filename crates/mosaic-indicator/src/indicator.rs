//! The [`Indicator`] trait: an accumulator factory bound to a window.

use crate::accumulator::Accumulator;
use mosaic_core::CellValue;
use mosaic_window::{WindowError, WindowFamily, WindowShape};

/// A statistic over one window geometry, producing one accumulator per line.
///
/// # Contract
///
/// - The geometry returned by [`window`](Self::window) is immutable and is
///   shared read-only by every line of a computation.
/// - [`accumulator`](Self::accumulator) returns a fresh, empty accumulator.
///   Accumulators are never reused across lines.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use mosaic_core::GridPos;
/// use mosaic_indicator::{Accumulator, CellSample, Count, Indicator};
/// use mosaic_window::{Footprint, WindowShape};
///
/// let fp = Arc::new(Footprint::generate(WindowShape::Square, 1.0).unwrap());
/// let count = Count::new(fp).unwrap();
/// let mut acc = <Count as Indicator<u8>>::accumulator(&count);
/// acc.insert(CellSample { pos: GridPos::new(0, 0), value: Some(3u8) });
/// acc.insert(CellSample { pos: GridPos::new(0, 1), value: None });
/// assert_eq!(acc.extract(GridPos::new(0, 0)), Some(1));
/// ```
pub trait Indicator<T>: Send + Sync {
    /// Window geometry the engine walks.
    type Window: Send + Sync;
    /// What the engine feeds the accumulator.
    type Sample;
    /// Per-cell result type.
    type Output: CellValue;
    /// Line-local incremental state.
    type Accumulator: Accumulator<Sample = Self::Sample, Output = Self::Output>;

    /// Human-readable name for errors and metrics.
    fn name(&self) -> &'static str;

    /// Window family this indicator consumes.
    fn family(&self) -> WindowFamily;

    /// Shared window geometry.
    fn window(&self) -> &Self::Window;

    /// A fresh accumulator for one line.
    fn accumulator(&self) -> Self::Accumulator;
}

/// Reject a window whose shape belongs to another family.
pub(crate) fn require_family(
    shape: WindowShape,
    radius: f64,
    family: WindowFamily,
) -> Result<(), WindowError> {
    if shape.family() == family {
        return Ok(());
    }
    let reason = match family {
        WindowFamily::Cell => "indicator needs a square or circle window",
        WindowFamily::Edge => "indicator needs an edge-square or edge-circle window",
        WindowFamily::Patch => "indicator needs a patch-square or patch-circle window",
    };
    Err(WindowError::InvalidWindowParameter {
        shape,
        radius,
        reason,
    })
}
