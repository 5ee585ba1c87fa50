//! Runtime description of an indicator computation.

use mosaic_window::{Contiguity, WindowError, WindowFamily, WindowShape};
use std::fmt;

/// The closed set of indicators reachable through [`Engine::compute`](crate::Engine::compute).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    /// Number of non-missing cells.
    Count,
    /// Arithmetic mean.
    Mean,
    /// Modal class.
    MostCommonClass,
    /// Shannon entropy of class proportions.
    ShannonDiversity,
    /// Gini-Simpson index of class proportions.
    SimpsonDiversity,
    /// Share of differing adjacent pairs.
    EdgeDensity,
    /// Interspersion and juxtaposition.
    Interspersion,
    /// Area-weighted mean patch size.
    AreaWeightedPatchSize,
    /// Area-weighted mean patch shape index.
    PatchWeightedShapeIndex,
    /// Patches per present cell.
    PatchDensity,
}

impl IndicatorKind {
    /// Every indicator, in declaration order.
    pub const ALL: [IndicatorKind; 10] = [
        IndicatorKind::Count,
        IndicatorKind::Mean,
        IndicatorKind::MostCommonClass,
        IndicatorKind::ShannonDiversity,
        IndicatorKind::SimpsonDiversity,
        IndicatorKind::EdgeDensity,
        IndicatorKind::Interspersion,
        IndicatorKind::AreaWeightedPatchSize,
        IndicatorKind::PatchWeightedShapeIndex,
        IndicatorKind::PatchDensity,
    ];

    /// The window family this indicator consumes.
    pub fn family(self) -> WindowFamily {
        match self {
            Self::Count
            | Self::Mean
            | Self::MostCommonClass
            | Self::ShannonDiversity
            | Self::SimpsonDiversity => WindowFamily::Cell,
            Self::EdgeDensity | Self::Interspersion => WindowFamily::Edge,
            Self::AreaWeightedPatchSize | Self::PatchWeightedShapeIndex | Self::PatchDensity => {
                WindowFamily::Patch
            }
        }
    }

    /// Returns `true` if the indicator accepts non-categorical values.
    pub fn is_continuous(self) -> bool {
        matches!(self, Self::Count | Self::Mean)
    }

    /// Snake-case name, matching the indicator's own name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Mean => "mean",
            Self::MostCommonClass => "most_common_class",
            Self::ShannonDiversity => "shannon_diversity",
            Self::SimpsonDiversity => "simpson_diversity",
            Self::EdgeDensity => "edge_density",
            Self::Interspersion => "interspersion",
            Self::AreaWeightedPatchSize => "area_weighted_patch_size",
            Self::PatchWeightedShapeIndex => "patch_weighted_shape_index",
            Self::PatchDensity => "patch_density",
        }
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Indicators that can be evaluated over a distance-weighted window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeightedKind {
    /// Total weight of the non-missing cells.
    Count,
    /// Weighted mean.
    Mean,
    /// Class with the largest total weight.
    MostCommonClass,
    /// Shannon entropy of weighted class proportions.
    ShannonDiversity,
    /// Gini-Simpson index of weighted class proportions.
    SimpsonDiversity,
}

impl WeightedKind {
    /// Every weighted indicator, in declaration order.
    pub const ALL: [WeightedKind; 5] = [
        WeightedKind::Count,
        WeightedKind::Mean,
        WeightedKind::MostCommonClass,
        WeightedKind::ShannonDiversity,
        WeightedKind::SimpsonDiversity,
    ];

    /// The unweighted indicator this reduces to when every weight is 1.
    pub fn unweighted(self) -> IndicatorKind {
        match self {
            Self::Count => IndicatorKind::Count,
            Self::Mean => IndicatorKind::Mean,
            Self::MostCommonClass => IndicatorKind::MostCommonClass,
            Self::ShannonDiversity => IndicatorKind::ShannonDiversity,
            Self::SimpsonDiversity => IndicatorKind::SimpsonDiversity,
        }
    }
}

impl fmt::Display for WeightedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "weighted {}", self.unweighted())
    }
}

/// One indicator over one window, resolved at runtime.
///
/// # Examples
///
/// ```
/// use mosaic_engine::{IndicatorKind, WindowQuery};
/// use mosaic_window::{Contiguity, WindowShape};
///
/// let q = WindowQuery::new(IndicatorKind::PatchDensity, WindowShape::PatchCircle, 2.5)
///     .with_contiguity(Contiguity::Queen);
/// assert!(q.validate().is_ok());
///
/// let bad = WindowQuery::new(IndicatorKind::Mean, WindowShape::EdgeSquare, 1.0);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowQuery {
    /// Statistic to compute.
    pub indicator: IndicatorKind,
    /// Window shape; its family must match the indicator's.
    pub shape: WindowShape,
    /// Window radius in cells.
    pub radius: f64,
    /// Patch contiguity. Ignored by non-patch indicators; patch indicators
    /// default to [`Contiguity::Rook`].
    pub contiguity: Option<Contiguity>,
}

impl WindowQuery {
    /// A query with no explicit contiguity.
    pub fn new(indicator: IndicatorKind, shape: WindowShape, radius: f64) -> Self {
        Self {
            indicator,
            shape,
            radius,
            contiguity: None,
        }
    }

    /// Set the patch contiguity.
    pub fn with_contiguity(mut self, contiguity: Contiguity) -> Self {
        self.contiguity = Some(contiguity);
        self
    }

    /// Contiguity after applying the default.
    pub fn resolved_contiguity(&self) -> Contiguity {
        self.contiguity.unwrap_or_default()
    }

    /// Check the radius against the shape and the shape against the indicator.
    pub fn validate(&self) -> Result<(), WindowError> {
        self.shape.validate_radius(self.radius)?;
        if self.shape.family() != self.indicator.family() {
            return Err(WindowError::InvalidWindowParameter {
                shape: self.shape,
                radius: self.radius,
                reason: "window shape does not match the indicator's window family",
            });
        }
        Ok(())
    }
}
