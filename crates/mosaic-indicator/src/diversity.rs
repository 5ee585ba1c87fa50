//! Class diversity indices over a frequency table.

use crate::accumulator::{Accumulator, AccumulatorError};
use crate::indicator::{require_family, Indicator};
use crate::sample::CellSample;
use crate::table::FrequencyTable;
use mosaic_core::{ClassValue, GridPos};
use mosaic_window::{Footprint, WindowError, WindowFamily};
use std::sync::Arc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Index {
    Shannon,
    Simpson,
}

/// Shannon entropy `−Σ pᵢ ln pᵢ` of class proportions in a cell window.
#[derive(Clone, Debug)]
pub struct ShannonDiversity {
    footprint: Arc<Footprint>,
}

/// Gini-Simpson index `1 − Σ pᵢ²` of class proportions in a cell window.
#[derive(Clone, Debug)]
pub struct SimpsonDiversity {
    footprint: Arc<Footprint>,
}

impl ShannonDiversity {
    /// Bind to a cell window.
    pub fn new(footprint: Arc<Footprint>) -> Result<Self, WindowError> {
        require_family(footprint.shape(), footprint.radius(), WindowFamily::Cell)?;
        Ok(Self { footprint })
    }
}

impl SimpsonDiversity {
    /// Bind to a cell window.
    pub fn new(footprint: Arc<Footprint>) -> Result<Self, WindowError> {
        require_family(footprint.shape(), footprint.radius(), WindowFamily::Cell)?;
        Ok(Self { footprint })
    }
}

macro_rules! diversity_indicator {
    ($ty:ty, $name:literal, $index:expr) => {
        impl<T: ClassValue> Indicator<T> for $ty {
            type Window = Footprint;
            type Sample = CellSample<T>;
            type Output = f64;
            type Accumulator = DiversityAccumulator<T>;

            fn name(&self) -> &'static str {
                $name
            }

            fn family(&self) -> WindowFamily {
                WindowFamily::Cell
            }

            fn window(&self) -> &Footprint {
                &self.footprint
            }

            fn accumulator(&self) -> DiversityAccumulator<T> {
                DiversityAccumulator {
                    index: $index,
                    table: FrequencyTable::new(),
                }
            }
        }
    };
}

diversity_indicator!(ShannonDiversity, "shannon_diversity", Index::Shannon);
diversity_indicator!(SimpsonDiversity, "simpson_diversity", Index::Simpson);

/// Line state for [`ShannonDiversity`] and [`SimpsonDiversity`].
#[derive(Clone, Debug)]
pub struct DiversityAccumulator<T> {
    index: Index,
    table: FrequencyTable<T>,
}

impl<T: ClassValue> DiversityAccumulator<T> {
    fn name(&self) -> &'static str {
        match self.index {
            Index::Shannon => "shannon_diversity",
            Index::Simpson => "simpson_diversity",
        }
    }
}

impl<T: ClassValue> Accumulator for DiversityAccumulator<T> {
    type Sample = CellSample<T>;
    type Output = f64;

    fn insert(&mut self, sample: CellSample<T>) {
        if let Some(v) = sample.value {
            self.table.insert(v);
        }
    }

    fn remove(&mut self, sample: CellSample<T>) -> Result<(), AccumulatorError> {
        match sample.value {
            Some(v) if !self.table.remove(v) => Err(AccumulatorError::not_inserted(self.name())),
            _ => Ok(()),
        }
    }

    fn extract(&self, _focal: GridPos) -> Option<f64> {
        if self.table.is_empty() {
            return None;
        }
        let value = match self.index {
            Index::Shannon => -self
                .table
                .proportions()
                .map(|p| p * p.ln())
                .sum::<f64>(),
            Index::Simpson => 1.0 - self.table.proportions().map(|p| p * p).sum::<f64>(),
        };
        // A single class gives -0.0 for Shannon.
        Some(value.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_window::WindowShape;

    fn footprint() -> Arc<Footprint> {
        Arc::new(Footprint::generate(WindowShape::Square, 1.0).unwrap())
    }

    fn feed<A: Accumulator<Sample = CellSample<i32>>>(acc: &mut A, values: &[Option<i32>]) {
        for (i, &v) in values.iter().enumerate() {
            acc.insert(CellSample {
                pos: GridPos::new(0, i as isize),
                value: v,
            });
        }
    }

    #[test]
    fn shannon_of_two_even_classes_is_ln2() {
        let ind = ShannonDiversity::new(footprint()).unwrap();
        let mut acc = Indicator::<i32>::accumulator(&ind);
        feed(&mut acc, &[Some(1), Some(2), None, Some(1), Some(2)]);
        let h = acc.extract(GridPos::new(0, 0)).unwrap();
        assert!((h - std::f64::consts::LN_2).abs() < 1e-12);
    }

    #[test]
    fn single_class_has_zero_diversity() {
        let shannon = ShannonDiversity::new(footprint()).unwrap();
        let simpson = SimpsonDiversity::new(footprint()).unwrap();
        let mut a = Indicator::<i32>::accumulator(&shannon);
        let mut b = Indicator::<i32>::accumulator(&simpson);
        feed(&mut a, &[Some(4); 5]);
        feed(&mut b, &[Some(4); 5]);
        assert_eq!(a.extract(GridPos::new(0, 0)), Some(0.0));
        assert_eq!(b.extract(GridPos::new(0, 0)), Some(0.0));
    }

    #[test]
    fn simpson_of_three_even_classes() {
        let ind = SimpsonDiversity::new(footprint()).unwrap();
        let mut acc = Indicator::<i32>::accumulator(&ind);
        feed(&mut acc, &[Some(1), Some(2), Some(3)]);
        let d = acc.extract(GridPos::new(0, 0)).unwrap();
        assert!((d - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn removal_restores_previous_value() {
        let ind = ShannonDiversity::new(footprint()).unwrap();
        let mut acc = Indicator::<i32>::accumulator(&ind);
        feed(&mut acc, &[Some(1), Some(1)]);
        let before = acc.extract(GridPos::new(0, 0));
        acc.insert(CellSample {
            pos: GridPos::new(5, 5),
            value: Some(9),
        });
        acc.remove(CellSample {
            pos: GridPos::new(5, 5),
            value: Some(9),
        })
        .unwrap();
        assert_eq!(acc.extract(GridPos::new(0, 0)), before);
        assert!(acc
            .remove(CellSample {
                pos: GridPos::new(5, 5),
                value: Some(9),
            })
            .is_err());
    }

    #[test]
    fn empty_is_no_result() {
        let ind = SimpsonDiversity::new(footprint()).unwrap();
        let mut acc = Indicator::<i32>::accumulator(&ind);
        feed(&mut acc, &[None, None]);
        assert_eq!(acc.extract(GridPos::new(0, 0)), None);
    }
}
