//! Most common class.

use crate::accumulator::{Accumulator, AccumulatorError};
use crate::indicator::{require_family, Indicator};
use crate::layout::WindowLayout;
use crate::sample::CellSample;
use crate::table::FrequencyTable;
use mosaic_core::{ClassValue, GridPos};
use mosaic_window::{Footprint, WindowError, WindowFamily};
use std::sync::Arc;

/// The class with the highest frequency in a cell window.
///
/// Ties are broken by scanning the window in row-major offset order around
/// the current focal cell and taking the first tied class met. The result
/// therefore depends only on what is in the window, not on the order cells
/// entered it.
#[derive(Clone, Debug)]
pub struct MostCommonClass {
    footprint: Arc<Footprint>,
}

impl MostCommonClass {
    /// Bind to a cell window.
    pub fn new(footprint: Arc<Footprint>) -> Result<Self, WindowError> {
        require_family(footprint.shape(), footprint.radius(), WindowFamily::Cell)?;
        Ok(Self { footprint })
    }
}

impl<T: ClassValue> Indicator<T> for MostCommonClass {
    type Window = Footprint;
    type Sample = CellSample<T>;
    type Output = T;
    type Accumulator = ModeAccumulator<T>;

    fn name(&self) -> &'static str {
        "most_common_class"
    }

    fn family(&self) -> WindowFamily {
        WindowFamily::Cell
    }

    fn window(&self) -> &Footprint {
        &self.footprint
    }

    fn accumulator(&self) -> ModeAccumulator<T> {
        ModeAccumulator {
            footprint: Arc::clone(&self.footprint),
            layout: WindowLayout::for_footprint(&self.footprint),
            table: FrequencyTable::new(),
        }
    }
}

/// Line state for [`MostCommonClass`].
#[derive(Clone, Debug)]
pub struct ModeAccumulator<T> {
    footprint: Arc<Footprint>,
    layout: WindowLayout<T>,
    table: FrequencyTable<T>,
}

impl<T: ClassValue> Accumulator for ModeAccumulator<T> {
    type Sample = CellSample<T>;
    type Output = T;

    fn insert(&mut self, sample: CellSample<T>) {
        self.layout.insert(sample.pos, sample.value);
        if let Some(v) = sample.value {
            self.table.insert(v);
        }
    }

    fn remove(&mut self, sample: CellSample<T>) -> Result<(), AccumulatorError> {
        // Both checks pass before either structure changes.
        let known = self.layout.holds(sample.pos)
            && sample.value.is_none_or(|v| self.table.count(&v) > 0);
        if !known {
            return Err(AccumulatorError::not_inserted("most_common_class"));
        }
        self.layout.remove(sample.pos);
        if let Some(v) = sample.value {
            self.table.remove(v);
        }
        Ok(())
    }

    fn extract(&self, focal: GridPos) -> Option<T> {
        let best = self.table.max_count();
        if best == 0 {
            return None;
        }
        let mut leaders = self.table.iter().filter(|&(_, n)| n == best);
        let first = leaders.next().map(|(v, _)| v);
        if leaders.next().is_none() {
            return first;
        }
        self.footprint
            .members()
            .filter_map(|m| self.layout.get(focal + m))
            .find(|v| self.table.count(v) == best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_window::WindowShape;

    fn acc() -> ModeAccumulator<u8> {
        let fp = Arc::new(Footprint::generate(WindowShape::Square, 1.0).unwrap());
        Indicator::<u8>::accumulator(&MostCommonClass::new(fp).unwrap())
    }

    fn fill(acc: &mut ModeAccumulator<u8>, focal: GridPos, values: [Option<u8>; 9]) {
        let fp = Footprint::generate(WindowShape::Square, 1.0).unwrap();
        for (m, v) in fp.members().zip(values) {
            acc.insert(CellSample {
                pos: focal + m,
                value: v,
            });
        }
    }

    #[test]
    fn clear_majority() {
        let mut a = acc();
        let focal = GridPos::new(1, 1);
        fill(
            &mut a,
            focal,
            [Some(1), Some(2), Some(2), None, Some(2), Some(1), Some(3), None, None],
        );
        assert_eq!(a.extract(focal), Some(2));
    }

    #[test]
    fn tie_goes_to_first_in_row_major_scan() {
        let mut a = acc();
        let focal = GridPos::new(4, 4);
        fill(
            &mut a,
            focal,
            [None, Some(7), Some(3), Some(3), Some(7), None, None, None, None],
        );
        assert_eq!(a.extract(focal), Some(7));
    }

    #[test]
    fn all_missing_has_no_result() {
        let mut a = acc();
        let focal = GridPos::new(0, 0);
        fill(&mut a, focal, [None; 9]);
        assert_eq!(a.extract(focal), None);
    }

    #[test]
    fn removing_unknown_position_fails() {
        let mut a = acc();
        let r = a.remove(CellSample {
            pos: GridPos::new(2, 2),
            value: Some(1),
        });
        assert!(r.is_err());
    }

    #[test]
    fn failed_remove_leaves_window_intact() {
        let mut a = acc();
        let focal = GridPos::new(1, 1);
        fill(
            &mut a,
            focal,
            [Some(4), Some(4), Some(2), Some(2), Some(2), None, None, None, None],
        );
        assert_eq!(a.extract(focal), Some(2));

        // The position is held, but class 9 was never counted.
        let r = a.remove(CellSample {
            pos: GridPos::new(1, 1),
            value: Some(9),
        });
        assert!(r.is_err());
        assert_eq!(a.extract(focal), Some(2));

        // The real removal still succeeds afterwards, leaving a 2-2 tie that
        // the scan resolves to the class met first.
        a.remove(CellSample {
            pos: GridPos::new(1, 1),
            value: Some(2),
        })
        .unwrap();
        assert_eq!(a.extract(focal), Some(4));
    }
}
