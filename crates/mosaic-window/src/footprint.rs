//! Cell footprints of square and circular windows.

use crate::contiguity::ROOK_OFFSETS;
use crate::delta::SlideDelta;
use crate::error::WindowError;
use crate::shape::{BaseShape, WindowShape};
use indexmap::IndexSet;
use mosaic_core::Offset;

/// The ordered set of offsets covered by a window.
///
/// Members are generated in row-major order (ascending row, then ascending
/// column) and never change after construction. A footprint is built once
/// per computation and shared by every line.
///
/// # Examples
///
/// ```
/// use mosaic_window::{Footprint, WindowShape};
/// use mosaic_core::Offset;
///
/// let fp = Footprint::generate(WindowShape::Circle, 1.0).unwrap();
/// assert_eq!(fp.len(), 5);
/// assert!(fp.contains(Offset::new(0, -1)));
/// assert!(!fp.contains(Offset::new(1, 1)));
/// ```
#[derive(Clone, Debug)]
pub struct Footprint {
    shape: WindowShape,
    radius: f64,
    reach: u32,
    members: IndexSet<Offset>,
    slide: SlideDelta<Offset>,
}

impl Footprint {
    /// Generate the footprint for `shape` at `radius`.
    ///
    /// Edge and patch shapes produce the footprint of their base shape.
    /// Returns [`WindowError::InvalidWindowParameter`] when the radius is not
    /// valid for the shape.
    pub fn generate(shape: WindowShape, radius: f64) -> Result<Self, WindowError> {
        shape.validate_radius(radius)?;
        let base = shape.base();
        // validate_radius bounds the radius well inside i32.
        let reach = radius.floor() as i32;
        let r2 = radius * radius;

        let mut members = IndexSet::new();
        for dr in -reach..=reach {
            for dc in -reach..=reach {
                let covered = match base {
                    BaseShape::Square => true,
                    BaseShape::Circle => {
                        let (fr, fc) = (f64::from(dr), f64::from(dc));
                        fr * fr + fc * fc <= r2
                    }
                };
                if covered {
                    members.insert(Offset::new(dr, dc));
                }
            }
        }
        let slide = SlideDelta::between(&members);
        Ok(Self {
            shape,
            radius,
            reach: reach.unsigned_abs(),
            members,
            slide,
        })
    }

    /// Shape this footprint was generated for.
    pub fn shape(&self) -> WindowShape {
        self.shape
    }

    /// Radius this footprint was generated for.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Largest absolute row or column delta of any member.
    pub fn reach(&self) -> u32 {
        self.reach
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: a valid radius covers at least the focal cell.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in row-major order.
    pub fn members(&self) -> impl ExactSizeIterator<Item = Offset> + '_ {
        self.members.iter().copied()
    }

    /// Member at position `i` in row-major order.
    pub fn member(&self, i: usize) -> Option<Offset> {
        self.members.get_index(i).copied()
    }

    /// Position of `offset` in row-major order, if it is a member.
    pub fn index_of(&self, offset: Offset) -> Option<usize> {
        self.members.get_index_of(&offset)
    }

    /// Returns `true` if `offset` is a member.
    pub fn contains(&self, offset: Offset) -> bool {
        self.members.contains(&offset)
    }

    /// Members leaving and entering on a one-column slide.
    pub fn slide(&self) -> &SlideDelta<Offset> {
        &self.slide
    }

    /// Number of (member, rook direction) pairs whose neighbour lies outside
    /// the footprint.
    ///
    /// For a window full of one value this is the perimeter of its single
    /// patch.
    pub fn boundary_length(&self) -> usize {
        self.members
            .iter()
            .map(|&m| {
                ROOK_OFFSETS
                    .iter()
                    .filter(|d| !self.contains(m.shifted(d.row, d.col)))
                    .count()
            })
            .sum()
    }
}
