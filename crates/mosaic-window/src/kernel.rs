//! Distance-weighted circular kernels.

use crate::error::WindowError;
use crate::shape::WindowShape;
use mosaic_core::Offset;

/// A circular window whose members carry a weight that depends on their
/// distance from the focal cell.
///
/// Members are the offsets with `dr² + dc² ≤ radius²`, the same set a
/// [`Footprint`](crate::Footprint) of shape [`WindowShape::Circle`] covers,
/// kept in row-major order. Each member's weight is `decay(d)` with
/// `d = √(dr² + dc²)`. Members whose weight is exactly zero are dropped.
///
/// Unlike a footprint, a kernel has no slide delta: moving the focal cell
/// changes the weight of every member, so weighted windows are evaluated
/// afresh at each cell.
///
/// # Examples
///
/// ```
/// use mosaic_core::Offset;
/// use mosaic_window::DistanceKernel;
///
/// let k = DistanceKernel::generate(1.0, |d| 1.0 / (1.0 + d)).unwrap();
/// assert_eq!(k.len(), 5);
/// assert_eq!(k.weight_of(Offset::ORIGIN), Some(1.0));
/// assert_eq!(k.weight_of(Offset::new(0, 1)), Some(0.5));
/// assert_eq!(k.weight_of(Offset::new(1, 1)), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceKernel {
    radius: f64,
    reach: u32,
    members: Vec<(Offset, f64)>,
}

impl DistanceKernel {
    /// Build a kernel of `radius`, weighting each member by `decay(distance)`.
    ///
    /// The radius follows the rules of [`WindowShape::Circle`]. Returns
    /// [`WindowError::InvalidKernelWeight`] if `decay` yields a negative or
    /// non-finite weight for any covered member.
    pub fn generate(radius: f64, decay: impl Fn(f64) -> f64) -> Result<Self, WindowError> {
        WindowShape::Circle.validate_radius(radius)?;
        let reach = radius.floor() as i32;
        let r2 = radius * radius;

        let mut members = Vec::new();
        for dr in -reach..=reach {
            for dc in -reach..=reach {
                let (fr, fc) = (f64::from(dr), f64::from(dc));
                let d2 = fr * fr + fc * fc;
                if d2 > r2 {
                    continue;
                }
                let offset = Offset::new(dr, dc);
                let weight = decay(d2.sqrt());
                if !weight.is_finite() || weight < 0.0 {
                    return Err(WindowError::InvalidKernelWeight { offset, weight });
                }
                if weight > 0.0 {
                    members.push((offset, weight));
                }
            }
        }
        Ok(Self {
            radius,
            reach: reach.unsigned_abs(),
            members,
        })
    }

    /// Every member weighted 1: the plain circular window.
    pub fn uniform(radius: f64) -> Result<Self, WindowError> {
        Self::generate(radius, |_| 1.0)
    }

    /// Radius the kernel was generated for.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Largest absolute row or column delta of any member.
    pub fn reach(&self) -> u32 {
        self.reach
    }

    /// Number of members with a non-zero weight.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if every covered member was weighted zero.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// `(offset, weight)` pairs in row-major order.
    pub fn members(&self) -> impl ExactSizeIterator<Item = (Offset, f64)> + '_ {
        self.members.iter().copied()
    }

    /// Weight of `offset`, if it is a member.
    pub fn weight_of(&self, offset: Offset) -> Option<f64> {
        self.members
            .iter()
            .find(|(m, _)| *m == offset)
            .map(|&(_, w)| w)
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f64 {
        self.members.iter().map(|&(_, w)| w).sum()
    }
}
