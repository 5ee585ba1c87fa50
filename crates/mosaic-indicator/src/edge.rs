//! Indicators over adjacent cell pairs.

use crate::accumulator::{Accumulator, AccumulatorError};
use crate::indicator::{require_family, Indicator};
use crate::sample::EdgeSample;
use crate::table::FrequencyTable;
use indexmap::IndexMap;
use mosaic_core::{ClassValue, GridPos};
use mosaic_window::{EdgeFootprint, WindowError, WindowFamily};
use std::marker::PhantomData;
use std::sync::Arc;

/// Share of adjacent pairs whose two values differ.
///
/// Only pairs with both cells present are counted.
#[derive(Clone, Debug)]
pub struct EdgeDensity {
    edges: Arc<EdgeFootprint>,
}

impl EdgeDensity {
    /// Bind to an edge window.
    pub fn new(edges: Arc<EdgeFootprint>) -> Result<Self, WindowError> {
        let base = edges.base();
        require_family(base.shape(), base.radius(), WindowFamily::Edge)?;
        Ok(Self { edges })
    }
}

impl<T: ClassValue> Indicator<T> for EdgeDensity {
    type Window = EdgeFootprint;
    type Sample = EdgeSample<T>;
    type Output = f64;
    type Accumulator = EdgeDensityAccumulator<T>;

    fn name(&self) -> &'static str {
        "edge_density"
    }

    fn family(&self) -> WindowFamily {
        WindowFamily::Edge
    }

    fn window(&self) -> &EdgeFootprint {
        &self.edges
    }

    fn accumulator(&self) -> EdgeDensityAccumulator<T> {
        EdgeDensityAccumulator {
            pairs: 0,
            differing: 0,
            _value: PhantomData,
        }
    }
}

/// Line state for [`EdgeDensity`].
#[derive(Clone, Debug)]
pub struct EdgeDensityAccumulator<T> {
    pairs: usize,
    differing: usize,
    _value: PhantomData<fn(T)>,
}

impl<T: ClassValue> Accumulator for EdgeDensityAccumulator<T> {
    type Sample = EdgeSample<T>;
    type Output = f64;

    fn insert(&mut self, sample: EdgeSample<T>) {
        if let Some((a, b)) = sample.both() {
            self.pairs += 1;
            if a != b {
                self.differing += 1;
            }
        }
    }

    fn remove(&mut self, sample: EdgeSample<T>) -> Result<(), AccumulatorError> {
        let Some((a, b)) = sample.both() else {
            return Ok(());
        };
        let err = || AccumulatorError::not_inserted("edge_density");
        self.pairs = self.pairs.checked_sub(1).ok_or_else(err)?;
        if a != b {
            self.differing = self.differing.checked_sub(1).ok_or_else(err)?;
        }
        Ok(())
    }

    fn extract(&self, _focal: GridPos) -> Option<f64> {
        (self.pairs > 0).then(|| self.differing as f64 / self.pairs as f64)
    }
}

/// Interspersion and juxtaposition of classes.
///
/// Over the adjacent pairs whose values differ, each unordered class pair
/// `k` occurs with fraction `fₖ`. With `m` distinct classes taking part in
/// those pairs, the index is
///
/// ```text
/// −Σ fₖ ln fₖ / ln(m(m−1)/2)
/// ```
///
/// which is 1 when every class borders every other class equally often.
/// Fewer than three participating classes yields no result.
#[derive(Clone, Debug)]
pub struct Interspersion {
    edges: Arc<EdgeFootprint>,
}

impl Interspersion {
    /// Bind to an edge window.
    pub fn new(edges: Arc<EdgeFootprint>) -> Result<Self, WindowError> {
        let base = edges.base();
        require_family(base.shape(), base.radius(), WindowFamily::Edge)?;
        Ok(Self { edges })
    }
}

impl<T: ClassValue> Indicator<T> for Interspersion {
    type Window = EdgeFootprint;
    type Sample = EdgeSample<T>;
    type Output = f64;
    type Accumulator = InterspersionAccumulator<T>;

    fn name(&self) -> &'static str {
        "interspersion"
    }

    fn family(&self) -> WindowFamily {
        WindowFamily::Edge
    }

    fn window(&self) -> &EdgeFootprint {
        &self.edges
    }

    fn accumulator(&self) -> InterspersionAccumulator<T> {
        InterspersionAccumulator {
            pairs: IndexMap::new(),
            classes: FrequencyTable::new(),
            total: 0,
        }
    }
}

/// Line state for [`Interspersion`].
#[derive(Clone, Debug)]
pub struct InterspersionAccumulator<T> {
    /// Differing pairs keyed `(smaller, larger)`.
    pairs: IndexMap<(T, T), usize>,
    /// Per class, the differing pairs it takes part in.
    classes: FrequencyTable<T>,
    total: usize,
}

impl<T: ClassValue> Accumulator for InterspersionAccumulator<T> {
    type Sample = EdgeSample<T>;
    type Output = f64;

    fn insert(&mut self, sample: EdgeSample<T>) {
        let Some((a, b)) = sample.both() else { return };
        if a == b {
            return;
        }
        *self.pairs.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        self.classes.insert(a);
        self.classes.insert(b);
        self.total += 1;
    }

    fn remove(&mut self, sample: EdgeSample<T>) -> Result<(), AccumulatorError> {
        let Some((a, b)) = sample.both() else {
            return Ok(());
        };
        if a == b {
            return Ok(());
        }
        let key = (a.min(b), a.max(b));
        let Some(n) = self.pairs.get_mut(&key) else {
            return Err(AccumulatorError::not_inserted("interspersion"));
        };
        *n -= 1;
        if *n == 0 {
            self.pairs.swap_remove(&key);
        }
        self.classes.remove(a);
        self.classes.remove(b);
        self.total -= 1;
        Ok(())
    }

    fn extract(&self, _focal: GridPos) -> Option<f64> {
        let m = self.classes.len();
        if m < 3 {
            return None;
        }
        let total = self.total as f64;
        let entropy: f64 = self
            .pairs
            .values()
            .map(|&n| {
                let f = n as f64 / total;
                -f * f.ln()
            })
            .sum();
        let max_entropy = ((m * (m - 1)) as f64 / 2.0).ln();
        Some(entropy / max_entropy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_window::WindowShape;

    fn edges() -> Arc<EdgeFootprint> {
        Arc::new(EdgeFootprint::generate(WindowShape::EdgeSquare, 1.0).unwrap())
    }

    fn pair(a: Option<u8>, b: Option<u8>) -> EdgeSample<u8> {
        EdgeSample { a, b }
    }

    // ── Edge density ────────────────────────────────────────────

    #[test]
    fn density_counts_complete_pairs_only() {
        let ind = EdgeDensity::new(edges()).unwrap();
        let mut acc = Indicator::<u8>::accumulator(&ind);
        acc.insert(pair(Some(1), Some(2)));
        acc.insert(pair(Some(1), Some(1)));
        acc.insert(pair(Some(1), None));
        acc.insert(pair(Some(3), Some(1)));
        let d = acc.extract(GridPos::new(0, 0)).unwrap();
        assert!((d - 2.0 / 3.0).abs() < 1e-12);
        acc.remove(pair(Some(1), Some(2))).unwrap();
        assert_eq!(acc.extract(GridPos::new(0, 0)), Some(0.5));
    }

    #[test]
    fn density_without_pairs_is_no_result() {
        let ind = EdgeDensity::new(edges()).unwrap();
        let mut acc = Indicator::<u8>::accumulator(&ind);
        acc.insert(pair(None, Some(1)));
        assert_eq!(acc.extract(GridPos::new(0, 0)), None);
        assert!(acc.remove(pair(Some(1), Some(1))).is_err());
    }

    #[test]
    fn density_rejects_cell_window() {
        let fp = mosaic_window::Footprint::generate(WindowShape::Square, 1.0).unwrap();
        let ef = Arc::new(EdgeFootprint::from_footprint(fp));
        assert!(EdgeDensity::new(ef).is_err());
    }

    // ── Interspersion ───────────────────────────────────────────

    #[test]
    fn interspersion_needs_three_classes() {
        let ind = Interspersion::new(edges()).unwrap();
        let mut acc = Indicator::<u8>::accumulator(&ind);
        acc.insert(pair(Some(1), Some(2)));
        acc.insert(pair(Some(2), Some(1)));
        acc.insert(pair(Some(3), Some(3)));
        assert_eq!(acc.extract(GridPos::new(0, 0)), None);
    }

    #[test]
    fn even_adjacency_is_one() {
        let ind = Interspersion::new(edges()).unwrap();
        let mut acc = Indicator::<u8>::accumulator(&ind);
        acc.insert(pair(Some(1), Some(2)));
        acc.insert(pair(Some(3), Some(2)));
        acc.insert(pair(Some(1), Some(3)));
        let v = acc.extract(GridPos::new(0, 0)).unwrap();
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn uneven_adjacency_is_below_one() {
        let ind = Interspersion::new(edges()).unwrap();
        let mut acc = Indicator::<u8>::accumulator(&ind);
        for _ in 0..3 {
            acc.insert(pair(Some(1), Some(2)));
        }
        acc.insert(pair(Some(2), Some(3)));
        // f = {3/4, 1/4} over ln 3.
        let expected = -(0.75f64 * 0.75f64.ln() + 0.25 * 0.25f64.ln()) / 3f64.ln();
        let v = acc.extract(GridPos::new(0, 0)).unwrap();
        assert!((v - expected).abs() < 1e-12);
    }

    #[test]
    fn interspersion_removal() {
        let ind = Interspersion::new(edges()).unwrap();
        let mut acc = Indicator::<u8>::accumulator(&ind);
        acc.insert(pair(Some(1), Some(2)));
        acc.insert(pair(Some(2), Some(3)));
        acc.insert(pair(Some(3), Some(4)));
        acc.remove(pair(Some(4), Some(3))).unwrap();
        acc.remove(pair(Some(2), Some(3))).unwrap();
        assert_eq!(acc.extract(GridPos::new(0, 0)), None);
        assert!(acc.remove(pair(Some(2), Some(3))).is_err());
        acc.remove(pair(Some(5), Some(5))).unwrap();
    }
}
