//! Error type for engine computations.

use crate::config::ConfigError;
use crate::query::IndicatorKind;
use mosaic_core::{Extent, GridError};
use mosaic_indicator::AccumulatorError;
use mosaic_window::WindowError;
use std::error::Error;
use std::fmt;

/// Errors returned by [`Engine`](crate::Engine) computations.
///
/// Parameter problems are reported before any cell is read. Grid and
/// accumulator failures abort the computation and carry the line (and,
/// where known, the column) being processed.
#[derive(Clone, Debug, PartialEq)]
pub enum ComputeError {
    /// The window or query parameters are invalid.
    Window(WindowError),
    /// Reading the source or writing the sink failed.
    Grid {
        /// Line being processed.
        line: usize,
        /// Underlying grid error, which names the cell.
        source: GridError,
    },
    /// An accumulator rejected an operation.
    Accumulator {
        /// Line being processed.
        line: usize,
        /// Focal column being processed.
        col: usize,
        /// Underlying accumulator error.
        source: AccumulatorError,
    },
    /// Source and sink have different extents.
    ExtentMismatch {
        /// Extent of the source.
        source: Extent,
        /// Extent of the sink.
        sink: Extent,
    },
    /// The indicator needs categorical values but the raster is continuous.
    UnsupportedValueType {
        /// Indicator that was requested.
        indicator: IndicatorKind,
    },
    /// The engine configuration is invalid or could not be applied.
    Config(ConfigError),
    /// A worker panicked while traversing a line.
    WorkerPanicked {
        /// Line the worker was processing.
        line: usize,
    },
}

impl fmt::Display for ComputeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Window(e) => write!(f, "window: {e}"),
            Self::Grid { line, source } => write!(f, "line {line}: {source}"),
            Self::Accumulator { line, col, source } => {
                write!(f, "line {line}, column {col}: {source}")
            }
            Self::ExtentMismatch { source, sink } => {
                write!(f, "sink extent {sink} does not match source extent {source}")
            }
            Self::UnsupportedValueType { indicator } => {
                write!(f, "{indicator} requires categorical (integer) cell values")
            }
            Self::Config(e) => write!(f, "config: {e}"),
            Self::WorkerPanicked { line } => write!(f, "worker panicked on line {line}"),
        }
    }
}

impl Error for ComputeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Window(e) => Some(e),
            Self::Grid { source, .. } => Some(source),
            Self::Accumulator { source, .. } => Some(source),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<WindowError> for ComputeError {
    fn from(e: WindowError) -> Self {
        Self::Window(e)
    }
}

impl From<ConfigError> for ComputeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
