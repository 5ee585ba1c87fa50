//! Error types for grid access.

use crate::coord::Extent;
use std::error::Error;
use std::fmt;

/// Errors from a [`GridSource`](crate::GridSource) or
/// [`GridSink`](crate::GridSink) collaborator.
///
/// The engine never retries: any of these aborts the line being traversed
/// and is surfaced to the caller with the offending coordinate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// A coordinate outside the grid was requested.
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// Extent of the grid.
        extent: Extent,
    },
    /// The backing storage failed to read or write a cell.
    BackingStore {
        /// Row being accessed.
        row: usize,
        /// Column being accessed.
        col: usize,
        /// Description reported by the storage layer.
        reason: String,
    },
    /// A buffer's length does not match the grid extent it is built for.
    ShapeMismatch {
        /// Extent the buffer was meant to fill.
        extent: Extent,
        /// Actual buffer length.
        len: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { row, col, extent } => {
                write!(f, "cell ({row}, {col}) out of bounds for {extent} grid")
            }
            Self::BackingStore { row, col, reason } => {
                write!(f, "backing store failure at ({row}, {col}): {reason}")
            }
            Self::ShapeMismatch { extent, len } => {
                write!(
                    f,
                    "buffer of {len} cells does not fit {extent} grid ({} cells)",
                    extent.cell_count()
                )
            }
        }
    }
}

impl Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_coordinate() {
        let e = GridError::BackingStore {
            row: 4,
            col: 7,
            reason: "block read failed".into(),
        };
        assert_eq!(
            e.to_string(),
            "backing store failure at (4, 7): block read failed"
        );

        let e = GridError::OutOfBounds {
            row: 9,
            col: 0,
            extent: Extent::new(3, 3),
        };
        assert!(e.to_string().contains("3x3"));
    }
}
