//! Absolute positions, relative offsets, and raster extents.

use std::fmt;
use std::ops::Add;

/// Offset of a window member relative to the focal cell.
///
/// Ordered row-major (`row` first, then `col`), which is the order every
/// footprint is generated in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Offset {
    /// Row delta (positive = down).
    pub row: i32,
    /// Column delta (positive = right).
    pub col: i32,
}

impl Offset {
    /// The focal cell itself.
    pub const ORIGIN: Offset = Offset { row: 0, col: 0 };

    /// Construct an offset.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// This offset shifted by `(dr, dc)`.
    pub const fn shifted(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Chebyshev (L-inf) length.
    pub fn chebyshev(self) -> u32 {
        self.row.unsigned_abs().max(self.col.unsigned_abs())
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, {:+})", self.row, self.col)
    }
}

/// An absolute cell position. May lie outside the raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    /// Row index.
    pub row: isize,
    /// Column index.
    pub col: isize,
}

impl GridPos {
    /// Construct a position.
    pub const fn new(row: isize, col: isize) -> Self {
        Self { row, col }
    }

    /// Position of an in-bounds `(row, col)` cell.
    pub fn at(row: usize, col: usize) -> Self {
        Self {
            row: row as isize,
            col: col as isize,
        }
    }
}

impl Add<Offset> for GridPos {
    type Output = GridPos;

    #[inline]
    fn add(self, rhs: Offset) -> GridPos {
        GridPos {
            row: self.row + rhs.row as isize,
            col: self.col + rhs.col as isize,
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.row, self.col)
    }
}

/// Number of rows and columns of a grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Extent {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

impl Extent {
    /// Construct an extent.
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Returns `true` if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Returns `(row, col)` if `pos` lies inside the grid.
    #[inline]
    pub fn locate(&self, pos: GridPos) -> Option<(usize, usize)> {
        if pos.row < 0 || pos.col < 0 {
            return None;
        }
        let (r, c) = (pos.row as usize, pos.col as usize);
        (r < self.rows && c < self.cols).then_some((r, c))
    }

    /// Returns `true` if `pos` lies inside the grid.
    pub fn contains(&self, pos: GridPos) -> bool {
        self.locate(pos).is_some()
    }

    /// Row-major linear index of an in-bounds cell.
    #[inline]
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_sort_row_major() {
        let mut v = vec![
            Offset::new(1, -1),
            Offset::new(-1, 1),
            Offset::new(0, 0),
            Offset::new(-1, -1),
        ];
        v.sort();
        assert_eq!(
            v,
            vec![
                Offset::new(-1, -1),
                Offset::new(-1, 1),
                Offset::new(0, 0),
                Offset::new(1, -1),
            ]
        );
    }

    #[test]
    fn pos_plus_offset() {
        let p = GridPos::at(2, 3) + Offset::new(-3, 1);
        assert_eq!(p, GridPos::new(-1, 4));
    }

    #[test]
    fn extent_locate_rejects_outside() {
        let e = Extent::new(3, 4);
        assert_eq!(e.locate(GridPos::new(2, 3)), Some((2, 3)));
        assert_eq!(e.locate(GridPos::new(-1, 0)), None);
        assert_eq!(e.locate(GridPos::new(0, 4)), None);
        assert_eq!(e.locate(GridPos::new(3, 0)), None);
        assert_eq!(e.cell_count(), 12);
        assert!(!e.is_empty());
        assert!(Extent::new(0, 5).is_empty());
    }

    #[test]
    fn chebyshev_length() {
        assert_eq!(Offset::new(-3, 2).chebyshev(), 3);
        assert_eq!(Offset::ORIGIN.chebyshev(), 0);
    }
}
