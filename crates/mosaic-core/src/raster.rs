//! In-memory raster implementing both grid contracts.

use crate::coord::Extent;
use crate::error::GridError;
use crate::grid::{GridSink, GridSource};
use crate::nodata::{denodata, optionalize};

/// A row-major, in-memory grid of optional cells.
///
/// Serves as the default [`GridSource`] for tests and small inputs and as
/// the default [`GridSink`] for `compute` results.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster<T> {
    extent: Extent,
    cells: Vec<Option<T>>,
}

impl<T: Copy> Raster<T> {
    /// A raster where every cell is missing.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            extent: Extent::new(rows, cols),
            cells: vec![None; rows * cols],
        }
    }

    /// A raster where every cell holds `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            extent: Extent::new(rows, cols),
            cells: vec![Some(value); rows * cols],
        }
    }

    /// Build from a function of `(row, col)`.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Option<T>) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(f(r, c));
            }
        }
        Self {
            extent: Extent::new(rows, cols),
            cells,
        }
    }

    /// Build from row-major values, none missing.
    pub fn from_values(rows: usize, cols: usize, values: Vec<T>) -> Result<Self, GridError> {
        Self::from_cells(rows, cols, values.into_iter().map(Some).collect())
    }

    /// Build from row-major optional cells.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Option<T>>) -> Result<Self, GridError> {
        let extent = Extent::new(rows, cols);
        if cells.len() != extent.cell_count() {
            return Err(GridError::ShapeMismatch {
                extent,
                len: cells.len(),
            });
        }
        Ok(Self { extent, cells })
    }

    /// Cell at `(row, col)`, or `None` when out of bounds or missing.
    pub fn cell(&self, row: usize, col: usize) -> Option<T> {
        if row < self.extent.rows && col < self.extent.cols {
            self.cells[self.extent.index(row, col)]
        } else {
            None
        }
    }

    /// Overwrite a cell. Out-of-bounds writes are ignored.
    pub fn put(&mut self, row: usize, col: usize, value: Option<T>) {
        if row < self.extent.rows && col < self.extent.cols {
            let i = self.extent.index(row, col);
            self.cells[i] = value;
        }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.extent.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.extent.cols
    }

    /// Row-major cells.
    pub fn cells(&self) -> &[Option<T>] {
        &self.cells
    }

    /// Iterate `(row, col, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Option<T>)> + '_ {
        let cols = self.extent.cols.max(1);
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, v)| (i / cols, i % cols, *v))
    }
}

impl<T: Copy + PartialEq> Raster<T> {
    /// Build from raw row-major values, treating `nodata` as missing.
    pub fn from_raw(
        rows: usize,
        cols: usize,
        raw: &[T],
        nodata: Option<T>,
    ) -> Result<Self, GridError> {
        Self::from_cells(rows, cols, raw.iter().map(|&v| optionalize(v, nodata)).collect())
    }

    /// Flatten to raw row-major values, writing `nodata` for missing cells.
    pub fn to_raw(&self, nodata: T) -> Vec<T> {
        self.cells.iter().map(|&v| denodata(v, nodata)).collect()
    }
}

impl<T: Copy> GridSource<T> for Raster<T> {
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
        Ok(self.cells[self.extent.index(row, col)])
    }
}

impl<T: Copy> GridSink<T> for Raster<T> {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn set(&mut self, row: usize, col: usize, value: Option<T>) -> Result<(), GridError> {
        if row >= self.extent.rows || col >= self.extent.cols {
            return Err(GridError::OutOfBounds {
                row,
                col,
                extent: self.extent,
            });
        }
        let i = self.extent.index(row, col);
        self.cells[i] = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_values_rejects_wrong_length() {
        let err = Raster::from_values(2, 3, vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            GridError::ShapeMismatch {
                extent: Extent::new(2, 3),
                len: 3
            }
        );
    }

    #[test]
    fn get_out_of_bounds_is_an_error() {
        let r = Raster::filled(2, 2, 1u8);
        assert!(matches!(
            r.get(2, 0),
            Err(GridError::OutOfBounds { row: 2, col: 0, .. })
        ));
        assert_eq!(r.cell(5, 5), None);
    }

    #[test]
    fn set_then_get() {
        let mut r: Raster<i32> = Raster::empty(3, 3);
        r.set(1, 2, Some(9)).unwrap();
        assert_eq!(r.get(1, 2).unwrap(), Some(9));
        assert_eq!(r.get(0, 0).unwrap(), None);
        assert!(r.set(3, 0, Some(1)).is_err());
    }

    #[test]
    fn iter_is_row_major() {
        let r = Raster::from_fn(2, 3, |row, col| Some(row * 10 + col));
        let seen: Vec<_> = r.iter().map(|(row, col, v)| (row, col, v.unwrap())).collect();
        assert_eq!(
            seen,
            vec![(0, 0, 0), (0, 1, 1), (0, 2, 2), (1, 0, 10), (1, 1, 11), (1, 2, 12)]
        );
    }

    #[test]
    fn raw_roundtrip_with_sentinel() {
        let raw = [1, -9999, 3, 4];
        let r = Raster::from_raw(2, 2, &raw, Some(-9999)).unwrap();
        assert_eq!(r.cell(0, 1), None);
        assert_eq!(r.cell(1, 0), Some(3));
        assert_eq!(r.to_raw(-9999), raw.to_vec());
    }

    proptest! {
        #[test]
        fn from_fn_matches_cell(rows in 1usize..8, cols in 1usize..8) {
            let r = Raster::from_fn(rows, cols, |row, col| {
                ((row + col) % 3 != 0).then_some(row * cols + col)
            });
            for row in 0..rows {
                for col in 0..cols {
                    let expected = ((row + col) % 3 != 0).then_some(row * cols + col);
                    prop_assert_eq!(r.cell(row, col), expected);
                    prop_assert_eq!(r.get(row, col).unwrap(), expected);
                }
            }
        }
    }
}
