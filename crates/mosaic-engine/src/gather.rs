//! Reading window members from a grid.

use mosaic_core::{GridError, GridPos, GridSource};
use mosaic_indicator::{CellSample, EdgeSample};
use mosaic_window::{EdgeFootprint, EdgePair, Footprint, SlideDelta, WindowMember};

/// Window geometry the traversal can walk.
///
/// Turns one member, placed around a focal cell, into a sample read from the
/// source. Members that reach outside the raster produce no sample; they are
/// never inserted, which is what makes border windows shrink.
pub trait Gather<T> {
    /// One element of the window.
    type Member: WindowMember;
    /// What the member reads as.
    type Sample;

    /// Members in generation order.
    fn members(&self) -> impl Iterator<Item = Self::Member> + '_;

    /// Members leaving and entering on a one-column slide.
    fn slide(&self) -> &SlideDelta<Self::Member>;

    /// Read `member` around `focal`. `Ok(None)` when any cell it covers is
    /// outside the raster.
    fn sample<S: GridSource<T>>(
        &self,
        source: &S,
        member: Self::Member,
        focal: GridPos,
    ) -> Result<Option<Self::Sample>, GridError>;
}

impl<T> Gather<T> for Footprint {
    type Member = mosaic_core::Offset;
    type Sample = CellSample<T>;

    fn members(&self) -> impl Iterator<Item = Self::Member> + '_ {
        Footprint::members(self)
    }

    fn slide(&self) -> &SlideDelta<Self::Member> {
        Footprint::slide(self)
    }

    #[inline]
    fn sample<S: GridSource<T>>(
        &self,
        source: &S,
        member: Self::Member,
        focal: GridPos,
    ) -> Result<Option<CellSample<T>>, GridError> {
        let pos = focal + member;
        let Some((row, col)) = source.extent().locate(pos) else {
            return Ok(None);
        };
        Ok(Some(CellSample {
            pos,
            value: source.get(row, col)?,
        }))
    }
}

impl<T> Gather<T> for EdgeFootprint {
    type Member = EdgePair;
    type Sample = EdgeSample<T>;

    fn members(&self) -> impl Iterator<Item = Self::Member> + '_ {
        EdgeFootprint::members(self)
    }

    fn slide(&self) -> &SlideDelta<Self::Member> {
        EdgeFootprint::slide(self)
    }

    #[inline]
    fn sample<S: GridSource<T>>(
        &self,
        source: &S,
        member: EdgePair,
        focal: GridPos,
    ) -> Result<Option<EdgeSample<T>>, GridError> {
        let extent = source.extent();
        let (Some((ar, ac)), Some((br, bc))) =
            (extent.locate(focal + member.a), extent.locate(focal + member.b))
        else {
            return Ok(None);
        };
        Ok(Some(EdgeSample {
            a: source.get(ar, ac)?,
            b: source.get(br, bc)?,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_core::Raster;
    use mosaic_window::WindowShape;

    #[test]
    fn cell_members_outside_raster_yield_nothing() {
        let r = Raster::filled(3, 3, 1u8);
        let fp = Footprint::generate(WindowShape::Square, 1.0).unwrap();
        let focal = GridPos::at(0, 0);
        let n = Gather::<u8>::members(&fp)
            .filter_map(|m| fp.sample(&r, m, focal).unwrap())
            .count();
        assert_eq!(n, 4);
    }

    #[test]
    fn edge_pairs_need_both_endpoints() {
        let r = Raster::from_values(2, 2, vec![1u8, 2, 3, 4]).unwrap();
        let ef = EdgeFootprint::generate(WindowShape::EdgeSquare, 1.0).unwrap();
        let focal = GridPos::at(0, 0);
        let samples: Vec<_> = Gather::<u8>::members(&ef)
            .filter_map(|m| ef.sample(&r, m, focal).unwrap())
            .collect();
        // The 2x2 raster has 4 interior pairs.
        assert_eq!(samples.len(), 4);
        assert!(samples.contains(&EdgeSample {
            a: Some(1),
            b: Some(2)
        }));
        assert!(samples.contains(&EdgeSample {
            a: Some(2),
            b: Some(4)
        }));
    }
}
