//! Arithmetic mean of non-missing cells.

use crate::accumulator::{Accumulator, AccumulatorError};
use crate::indicator::{require_family, Indicator};
use crate::sample::CellSample;
use mosaic_core::{CellValue, GridPos};
use mosaic_window::{Footprint, WindowError, WindowFamily};
use std::marker::PhantomData;
use std::sync::Arc;

/// Mean of the non-missing values in a cell window.
///
/// Values are widened to `f64` and summed; the accumulator is discarded at
/// the end of every line, so rounding drift is bounded by one line.
#[derive(Clone, Debug)]
pub struct Mean {
    footprint: Arc<Footprint>,
}

impl Mean {
    /// Bind to a cell window.
    pub fn new(footprint: Arc<Footprint>) -> Result<Self, WindowError> {
        require_family(footprint.shape(), footprint.radius(), WindowFamily::Cell)?;
        Ok(Self { footprint })
    }
}

impl<T: CellValue> Indicator<T> for Mean {
    type Window = Footprint;
    type Sample = CellSample<T>;
    type Output = f64;
    type Accumulator = MeanAccumulator<T>;

    fn name(&self) -> &'static str {
        "mean"
    }

    fn family(&self) -> WindowFamily {
        WindowFamily::Cell
    }

    fn window(&self) -> &Footprint {
        &self.footprint
    }

    fn accumulator(&self) -> MeanAccumulator<T> {
        MeanAccumulator {
            sum: 0.0,
            weight: 0,
            _value: PhantomData,
        }
    }
}

/// Line state for [`Mean`].
#[derive(Clone, Debug)]
pub struct MeanAccumulator<T> {
    sum: f64,
    weight: usize,
    _value: PhantomData<fn(T)>,
}

impl<T: CellValue> Accumulator for MeanAccumulator<T> {
    type Sample = CellSample<T>;
    type Output = f64;

    fn insert(&mut self, sample: CellSample<T>) {
        if let Some(v) = sample.value {
            self.sum += v.to_f64();
            self.weight += 1;
        }
    }

    fn remove(&mut self, sample: CellSample<T>) -> Result<(), AccumulatorError> {
        let Some(v) = sample.value else {
            return Ok(());
        };
        self.weight = self
            .weight
            .checked_sub(1)
            .ok_or(AccumulatorError::not_inserted("mean"))?;
        self.sum -= v.to_f64();
        if self.weight == 0 {
            self.sum = 0.0;
        }
        Ok(())
    }

    fn extract(&self, _focal: GridPos) -> Option<f64> {
        (self.weight > 0).then(|| self.sum / self.weight as f64)
    }
}
