//! Count of non-missing cells.

use crate::accumulator::{Accumulator, AccumulatorError};
use crate::indicator::{require_family, Indicator};
use crate::sample::CellSample;
use mosaic_core::{CellValue, GridPos};
use mosaic_window::{Footprint, WindowError, WindowFamily};
use std::marker::PhantomData;
use std::sync::Arc;

/// Number of non-missing cells in a cell window.
#[derive(Clone, Debug)]
pub struct Count {
    footprint: Arc<Footprint>,
}

impl Count {
    /// Bind to a cell window.
    pub fn new(footprint: Arc<Footprint>) -> Result<Self, WindowError> {
        require_family(footprint.shape(), footprint.radius(), WindowFamily::Cell)?;
        Ok(Self { footprint })
    }
}

impl<T: CellValue> Indicator<T> for Count {
    type Window = Footprint;
    type Sample = CellSample<T>;
    type Output = usize;
    type Accumulator = CountAccumulator<T>;

    fn name(&self) -> &'static str {
        "count"
    }

    fn family(&self) -> WindowFamily {
        WindowFamily::Cell
    }

    fn window(&self) -> &Footprint {
        &self.footprint
    }

    fn accumulator(&self) -> CountAccumulator<T> {
        CountAccumulator {
            present: 0,
            _value: PhantomData,
        }
    }
}

/// Line state for [`Count`].
#[derive(Clone, Debug)]
pub struct CountAccumulator<T> {
    present: usize,
    _value: PhantomData<fn(T)>,
}

impl<T: CellValue> Accumulator for CountAccumulator<T> {
    type Sample = CellSample<T>;
    type Output = usize;

    fn insert(&mut self, sample: CellSample<T>) {
        if sample.value.is_some() {
            self.present += 1;
        }
    }

    fn remove(&mut self, sample: CellSample<T>) -> Result<(), AccumulatorError> {
        if sample.value.is_none() {
            return Ok(());
        }
        self.present = self
            .present
            .checked_sub(1)
            .ok_or(AccumulatorError::not_inserted("count"))?;
        Ok(())
    }

    fn extract(&self, _focal: GridPos) -> Option<usize> {
        (self.present > 0).then_some(self.present)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_window::WindowShape;

    fn count() -> Count {
        Count::new(Arc::new(Footprint::generate(WindowShape::Square, 1.0).unwrap())).unwrap()
    }

    fn cell(v: Option<i32>) -> CellSample<i32> {
        CellSample {
            pos: GridPos::new(0, 0),
            value: v,
        }
    }

    #[test]
    fn missing_values_are_not_counted() {
        let mut acc = Indicator::<i32>::accumulator(&count());
        acc.insert(cell(Some(1)));
        acc.insert(cell(None));
        acc.insert(cell(Some(2)));
        assert_eq!(acc.extract(GridPos::new(0, 0)), Some(2));
        acc.remove(cell(None)).unwrap();
        assert_eq!(acc.extract(GridPos::new(0, 0)), Some(2));
    }

    #[test]
    fn empty_window_has_no_result() {
        let mut acc = Indicator::<i32>::accumulator(&count());
        assert_eq!(acc.extract(GridPos::new(0, 0)), None);
        acc.insert(cell(None));
        assert_eq!(acc.extract(GridPos::new(0, 0)), None);
    }

    #[test]
    fn over_removal_is_a_precondition_error() {
        let mut acc = Indicator::<i32>::accumulator(&count());
        assert!(matches!(
            acc.remove(cell(Some(4))),
            Err(AccumulatorError::Precondition { indicator: "count", .. })
        ));
    }

    #[test]
    fn rejects_edge_window() {
        let fp = Arc::new(Footprint::generate(WindowShape::EdgeSquare, 1.0).unwrap());
        assert!(matches!(
            Count::new(fp),
            Err(WindowError::InvalidWindowParameter { .. })
        ));
    }
}
