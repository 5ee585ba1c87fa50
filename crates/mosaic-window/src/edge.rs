//! Adjacent-pair footprints for edge-based indicators.

use crate::delta::{SlideDelta, WindowMember};
use crate::error::WindowError;
use crate::footprint::Footprint;
use crate::shape::WindowShape;
use indexmap::IndexSet;
use mosaic_core::Offset;

/// Two 4-adjacent offsets. `b` is always right of or below `a`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct EdgePair {
    /// First endpoint.
    pub a: Offset,
    /// Second endpoint, `a + (0,1)` or `a + (1,0)`.
    pub b: Offset,
}

impl WindowMember for EdgePair {
    #[inline]
    fn shift_cols(self, dc: i32) -> Self {
        Self {
            a: self.a.shifted(0, dc),
            b: self.b.shifted(0, dc),
        }
    }
}

/// The ordered set of adjacent cell pairs lying inside a window.
///
/// Pairs are produced by visiting the base footprint in row-major order and
/// emitting the pair to the right, then the pair below, whenever the partner
/// is also a member. Every undirected pair appears exactly once.
///
/// # Examples
///
/// ```
/// use mosaic_window::{EdgeFootprint, WindowShape};
///
/// let ef = EdgeFootprint::generate(WindowShape::EdgeSquare, 1.0).unwrap();
/// assert_eq!(ef.len(), 12);
/// ```
#[derive(Clone, Debug)]
pub struct EdgeFootprint {
    base: Footprint,
    pairs: IndexSet<EdgePair>,
    slide: SlideDelta<EdgePair>,
}

impl EdgeFootprint {
    /// Generate the pair footprint for `shape` at `radius`.
    pub fn generate(shape: WindowShape, radius: f64) -> Result<Self, WindowError> {
        Ok(Self::from_footprint(Footprint::generate(shape, radius)?))
    }

    /// Derive the pairs of an existing cell footprint.
    pub fn from_footprint(base: Footprint) -> Self {
        let mut pairs = IndexSet::new();
        for a in base.members() {
            for b in [a.shifted(0, 1), a.shifted(1, 0)] {
                if base.contains(b) {
                    pairs.insert(EdgePair { a, b });
                }
            }
        }
        let slide = SlideDelta::between(&pairs);
        Self { base, pairs, slide }
    }

    /// The cell footprint the pairs were drawn from.
    pub fn base(&self) -> &Footprint {
        &self.base
    }

    /// Largest absolute row or column delta of any endpoint.
    pub fn reach(&self) -> u32 {
        self.base.reach()
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` when the window is too small to hold any pair.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pairs in generation order.
    pub fn members(&self) -> impl ExactSizeIterator<Item = EdgePair> + '_ {
        self.pairs.iter().copied()
    }

    /// Returns `true` if the pair is a member, in either orientation.
    pub fn contains(&self, a: Offset, b: Offset) -> bool {
        self.pairs.contains(&EdgePair { a, b }) || self.pairs.contains(&EdgePair { a: b, b: a })
    }

    /// Pairs leaving and entering on a one-column slide.
    pub fn slide(&self) -> &SlideDelta<EdgePair> {
        &self.slide
    }
}
