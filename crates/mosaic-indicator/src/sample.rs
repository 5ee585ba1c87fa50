//! Samples fed to accumulators.

use mosaic_core::GridPos;

/// One raster cell entering or leaving a cell window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSample<T> {
    /// Absolute position of the cell.
    pub pos: GridPos,
    /// Cell value; `None` if missing.
    pub value: Option<T>,
}

/// One pair of 4-adjacent cells entering or leaving an edge window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeSample<T> {
    /// Value of the first cell.
    pub a: Option<T>,
    /// Value of the second cell.
    pub b: Option<T>,
}

impl<T: Copy> EdgeSample<T> {
    /// Both values, if neither is missing.
    #[inline]
    pub fn both(&self) -> Option<(T, T)> {
        Some((self.a?, self.b?))
    }
}
