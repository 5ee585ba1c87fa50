//! The [`Accumulator`] trait and its error type.

use mosaic_core::GridPos;
use std::fmt;

/// Incremental state for one indicator over one traversal line.
///
/// # Contract
///
/// - `insert` and `remove` are called only for samples whose cells lie
///   inside the raster. Missing values may be inserted; they never change
///   counts, sums, or frequency tables.
/// - `remove` is only valid for a sample that is currently inserted.
///   Anything else is reported as [`AccumulatorError::Precondition`].
/// - `extract` reads the state for the window centred on `focal` and never
///   mutates it. `None` means "no result".
pub trait Accumulator {
    /// What enters and leaves the window.
    type Sample;
    /// Per-cell result.
    type Output;

    /// Add a sample to the window.
    fn insert(&mut self, sample: Self::Sample);

    /// Take a previously inserted sample out of the window.
    fn remove(&mut self, sample: Self::Sample) -> Result<(), AccumulatorError>;

    /// The indicator value for the current window.
    fn extract(&self, focal: GridPos) -> Option<Self::Output>;
}

/// Errors raised by accumulators when the engine breaks the contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccumulatorError {
    /// A removal did not match anything in the window.
    Precondition {
        /// Indicator that detected the problem.
        indicator: &'static str,
        /// What was violated.
        reason: &'static str,
    },
}

impl fmt::Display for AccumulatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Precondition { indicator, reason } => {
                write!(f, "{indicator} accumulator precondition violated: {reason}")
            }
        }
    }
}

impl std::error::Error for AccumulatorError {}

impl AccumulatorError {
    pub(crate) fn not_inserted(indicator: &'static str) -> Self {
        Self::Precondition {
            indicator,
            reason: "removed a sample that was never inserted",
        }
    }
}
