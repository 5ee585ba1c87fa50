//! Error types for window construction and patch identification.

use crate::shape::WindowShape;
use mosaic_core::Offset;
use std::fmt;

/// Errors arising from window geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowError {
    /// The radius is not valid for the requested shape.
    InvalidWindowParameter {
        /// Shape that was requested.
        shape: WindowShape,
        /// Radius that was rejected.
        radius: f64,
        /// What the shape requires.
        reason: &'static str,
    },
    /// A value slice does not line up with the footprint it is read against.
    LayoutMismatch {
        /// Footprint length.
        expected: usize,
        /// Length of the slice supplied.
        actual: usize,
    },
    /// A distance kernel produced a weight that is negative or not finite.
    InvalidKernelWeight {
        /// Member the weight was computed for.
        offset: Offset,
        /// Weight that was rejected.
        weight: f64,
    },
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWindowParameter {
                shape,
                radius,
                reason,
            } => {
                write!(f, "invalid {shape} window radius {radius}: {reason}")
            }
            Self::LayoutMismatch { expected, actual } => {
                write!(
                    f,
                    "window layout mismatch: expected {expected} values, got {actual}"
                )
            }
            Self::InvalidKernelWeight { offset, weight } => {
                write!(
                    f,
                    "kernel weight {weight} at offset {offset} must be finite and non-negative"
                )
            }
        }
    }
}

impl std::error::Error for WindowError {}
