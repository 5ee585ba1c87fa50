//! Grid collaborator contracts consumed and produced by the engine.

use crate::coord::Extent;
use crate::error::GridError;

/// Read-only access to a raster of optional cell values.
///
/// Implemented by in-memory rasters and by adapters over tiled storage.
/// `get` must be valid for every in-range coordinate; storage failures are
/// reported as [`GridError::BackingStore`] instead of returning wrong data.
///
/// # Examples
///
/// ```
/// use mosaic_core::{GridSource, Raster};
///
/// let r = Raster::from_values(2, 2, vec![1, 2, 3, 4]).unwrap();
/// assert_eq!(r.get(1, 0).unwrap(), Some(3));
/// assert_eq!(r.extent().cell_count(), 4);
/// ```
pub trait GridSource<T> {
    /// Number of rows and columns.
    fn extent(&self) -> Extent;

    /// Read one cell. `Ok(None)` means the cell is missing (no data).
    fn get(&self, row: usize, col: usize) -> Result<Option<T>, GridError>;
}

/// Write access to an output raster.
///
/// The engine writes each cell exactly once per traversal, in row-major
/// line order. `None` records "no result".
pub trait GridSink<R> {
    /// Number of rows and columns.
    fn extent(&self) -> Extent;

    /// Write one cell.
    fn set(&mut self, row: usize, col: usize, value: Option<R>) -> Result<(), GridError>;
}

impl<T, S: GridSource<T> + ?Sized> GridSource<T> for &S {
    fn extent(&self) -> Extent {
        (**self).extent()
    }

    fn get(&self, row: usize, col: usize) -> Result<Option<T>, GridError> {
        (**self).get(row, col)
    }
}
