//! Window shape catalogue and radius validation.

use crate::error::WindowError;
use std::fmt;

/// The geometric base of a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BaseShape {
    /// All offsets with Chebyshev length `<= r`.
    Square,
    /// All offsets with `dr² + dc² <= radius²`.
    Circle,
}

/// Which kind of sample an indicator consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindowFamily {
    /// Individual cells.
    Cell,
    /// Pairs of 4-adjacent cells.
    Edge,
    /// Cells plus their in-window layout, for connected-component analysis.
    Patch,
}

/// A window shape as requested by a caller.
///
/// Each shape pairs a [`BaseShape`] with a [`WindowFamily`]. The family must
/// match the indicator the window is used with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WindowShape {
    /// Square cell window.
    Square,
    /// Circular cell window.
    Circle,
    /// Adjacent pairs inside a square window.
    EdgeSquare,
    /// Adjacent pairs inside a circular window.
    EdgeCircle,
    /// Patch window over a square footprint.
    PatchSquare,
    /// Patch window over a circular footprint.
    PatchCircle,
}

impl WindowShape {
    /// Every shape, in declaration order.
    pub const ALL: [WindowShape; 6] = [
        WindowShape::Square,
        WindowShape::Circle,
        WindowShape::EdgeSquare,
        WindowShape::EdgeCircle,
        WindowShape::PatchSquare,
        WindowShape::PatchCircle,
    ];

    /// The sample family this shape produces.
    pub fn family(self) -> WindowFamily {
        match self {
            Self::Square | Self::Circle => WindowFamily::Cell,
            Self::EdgeSquare | Self::EdgeCircle => WindowFamily::Edge,
            Self::PatchSquare | Self::PatchCircle => WindowFamily::Patch,
        }
    }

    /// The geometric base of this shape.
    pub fn base(self) -> BaseShape {
        match self {
            Self::Square | Self::EdgeSquare | Self::PatchSquare => BaseShape::Square,
            Self::Circle | Self::EdgeCircle | Self::PatchCircle => BaseShape::Circle,
        }
    }

    /// Check `radius` against this shape's rules.
    ///
    /// Any shape needs a finite radius above zero. Square-based shapes need a
    /// whole number of cells, and patch circles need at least radius 1 so
    /// the window covers more than the focal cell.
    pub fn validate_radius(self, radius: f64) -> Result<(), WindowError> {
        let reject = |reason| {
            Err(WindowError::InvalidWindowParameter {
                shape: self,
                radius,
                reason,
            })
        };
        if !radius.is_finite() || radius <= 0.0 {
            return reject("radius must be a finite number greater than zero");
        }
        if self.base() == BaseShape::Square && (radius.fract() != 0.0 || radius < 1.0) {
            return reject("square windows need a whole-number radius of at least 1");
        }
        if self == Self::PatchCircle && radius < 1.0 {
            return reject("patch circle windows need a radius of at least 1");
        }
        // Offsets are i32; anything near that bound is a caller mistake.
        if radius > f64::from(i32::MAX / 4) {
            return reject("radius exceeds the supported window size");
        }
        Ok(())
    }
}

impl fmt::Display for WindowShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Square => "square",
            Self::Circle => "circle",
            Self::EdgeSquare => "edge-square",
            Self::EdgeCircle => "edge-circle",
            Self::PatchSquare => "patch-square",
            Self::PatchCircle => "patch-circle",
        };
        f.write_str(name)
    }
}
