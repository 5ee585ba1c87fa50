//! Conversion between sentinel-encoded rasters and `Option` cells.
//!
//! The engine itself never looks at a sentinel. Raw buffers that encode
//! missing data with a magic value are converted at the boundary, either
//! eagerly ([`Raster::from_raw`](crate::Raster::from_raw)) or lazily through
//! [`NodataGrid`].

use crate::coord::Extent;
use crate::error::GridError;
use crate::grid::GridSource;

/// Returns `true` when `value` is the sentinel. NaN matches NaN.
#[inline]
#[allow(clippy::eq_op)]
fn is_sentinel<T: PartialEq>(value: &T, nodata: &T) -> bool {
    value == nodata || (value != value && nodata != nodata)
}

/// Map a raw value to `None` when it equals the sentinel.
///
/// `nodata = None` means the raster has no sentinel and every value is kept.
///
/// ```
/// use mosaic_core::optionalize;
///
/// assert_eq!(optionalize(-1, Some(-1)), None);
/// assert_eq!(optionalize(4, Some(-1)), Some(4));
/// assert_eq!(optionalize(f64::NAN, Some(f64::NAN)), None);
/// ```
#[inline]
pub fn optionalize<T: PartialEq>(raw: T, nodata: Option<T>) -> Option<T> {
    match nodata {
        Some(ref s) if is_sentinel(&raw, s) => None,
        _ => Some(raw),
    }
}

/// Map a missing cell back to the sentinel.
#[inline]
pub fn denodata<T>(value: Option<T>, nodata: T) -> T {
    value.unwrap_or(nodata)
}

/// A borrowed row-major slice viewed as a [`GridSource`], with an optional
/// sentinel for missing cells.
#[derive(Clone, Copy, Debug)]
pub struct NodataGrid<'a, T> {
    extent: Extent,
    raw: &'a [T],
    nodata: Option<T>,
}

impl<'a, T: Copy + PartialEq> NodataGrid<'a, T> {
    /// Wrap `raw`, which must hold exactly `rows * cols` values.
    pub fn new(rows: usize, cols: usize, raw: &'a [T], nodata: Option<T>) -> Result<Self, GridError> {
        let extent = Extent::new(rows, cols);
        if raw.len() != extent.cell_count() {
            return Err(GridError::ShapeMismatch {
                extent,
                len: raw.len(),
            });
        }
        Ok(Self { extent, raw, nodata })
    }

    /// The configured sentinel.
    pub fn nodata(&self) -> Option<T> {
        self.nodata
    }
}

impl<T: Copy + PartialEq> GridSource<T> for NodataGrid<'_, T> {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn get(&self, row: usize, col: usize) -> Result<Option<T>, GridError> {
        if row >= self.extent.rows || col >= self.extent.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                extent: self.extent,
            });
        }
        Ok(optionalize(self.raw[self.extent.index(row, col)], self.nodata))
    }
}
