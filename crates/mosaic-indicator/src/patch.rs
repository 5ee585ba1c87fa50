//! Patch-based indicators over connected components of a window.

use crate::accumulator::{Accumulator, AccumulatorError};
use crate::indicator::{require_family, Indicator};
use crate::layout::WindowLayout;
use crate::sample::CellSample;
use mosaic_core::{ClassValue, GridPos};
use mosaic_window::{Contiguity, Footprint, Patch, PatchTopology, WindowError, WindowFamily};
use std::sync::Arc;

/// Smallest perimeter a raster patch of `area` cells can have.
///
/// With `n = ⌊√area⌋`: `4n` for a perfect square, `4n + 2` when
/// `area <= n(n + 1)`, otherwise `4n + 4`.
///
/// ```
/// use mosaic_indicator::min_perimeter;
///
/// assert_eq!(min_perimeter(1), 4);
/// assert_eq!(min_perimeter(2), 6);
/// assert_eq!(min_perimeter(3), 8);
/// assert_eq!(min_perimeter(9), 12);
/// ```
pub fn min_perimeter(area: usize) -> usize {
    let mut n = (area as f64).sqrt() as usize;
    // Correct float rounding at large perfect squares.
    while n * n > area {
        n -= 1;
    }
    while (n + 1) * (n + 1) <= area {
        n += 1;
    }
    if n * n == area {
        4 * n
    } else if area <= n * (n + 1) {
        4 * n + 2
    } else {
        4 * n + 4
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Metric {
    AreaWeightedSize,
    ShapeIndex,
    Density,
}

impl Metric {
    fn name(self) -> &'static str {
        match self {
            Self::AreaWeightedSize => "area_weighted_patch_size",
            Self::ShapeIndex => "patch_weighted_shape_index",
            Self::Density => "patch_density",
        }
    }

    fn evaluate<T>(self, patches: &[Patch<T>], present: usize) -> f64 {
        let area: usize = patches.iter().map(|p| p.area).sum();
        let area = area as f64;
        match self {
            Self::AreaWeightedSize => {
                let squares: f64 = patches.iter().map(|p| (p.area * p.area) as f64).sum();
                squares / area
            }
            Self::ShapeIndex => {
                let weighted: f64 = patches
                    .iter()
                    .map(|p| p.area as f64 * p.perimeter as f64 / min_perimeter(p.area) as f64)
                    .sum();
                weighted / area
            }
            Self::Density => patches.len() as f64 / present as f64,
        }
    }
}

/// Shared geometry of a patch indicator.
#[derive(Clone, Debug)]
struct PatchWindow {
    footprint: Arc<Footprint>,
    topology: Arc<PatchTopology>,
}

impl PatchWindow {
    fn new(footprint: Arc<Footprint>, contiguity: Contiguity) -> Result<Self, WindowError> {
        require_family(footprint.shape(), footprint.radius(), WindowFamily::Patch)?;
        let topology = Arc::new(PatchTopology::new(&footprint, contiguity));
        Ok(Self {
            footprint,
            topology,
        })
    }

    fn accumulator<T: ClassValue>(&self, metric: Metric) -> PatchAccumulator<T> {
        PatchAccumulator {
            metric,
            footprint: Arc::clone(&self.footprint),
            topology: Arc::clone(&self.topology),
            layout: WindowLayout::for_footprint(&self.footprint),
        }
    }
}

macro_rules! patch_indicator {
    ($(#[$doc:meta])* $ty:ident, $metric:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug)]
        pub struct $ty {
            window: PatchWindow,
        }

        impl $ty {
            /// Bind to a patch window, connecting cells under `contiguity`.
            pub fn new(footprint: Arc<Footprint>, contiguity: Contiguity) -> Result<Self, WindowError> {
                Ok(Self {
                    window: PatchWindow::new(footprint, contiguity)?,
                })
            }

            /// Contiguity used to connect cells.
            pub fn contiguity(&self) -> Contiguity {
                self.window.topology.contiguity()
            }
        }

        impl<T: ClassValue> Indicator<T> for $ty {
            type Window = Footprint;
            type Sample = CellSample<T>;
            type Output = f64;
            type Accumulator = PatchAccumulator<T>;

            fn name(&self) -> &'static str {
                $metric.name()
            }

            fn family(&self) -> WindowFamily {
                WindowFamily::Patch
            }

            fn window(&self) -> &Footprint {
                &self.window.footprint
            }

            fn accumulator(&self) -> PatchAccumulator<T> {
                self.window.accumulator($metric)
            }
        }
    };
}

patch_indicator!(
    /// Area-weighted mean patch size, `Σ a² / Σ a`: the expected size of
    /// the patch a randomly chosen present cell belongs to.
    AreaWeightedPatchSize,
    Metric::AreaWeightedSize
);

patch_indicator!(
    /// Area-weighted mean shape index, `Σ a·SI / Σ a`, where
    /// `SI = perimeter / min_perimeter(area)` is 1 for the most compact patch.
    PatchWeightedShapeIndex,
    Metric::ShapeIndex
);

patch_indicator!(
    /// Number of patches per present cell in the window.
    PatchDensity,
    Metric::Density
);

/// Line state for the patch indicators.
///
/// Holds the window's value layout; patches are identified afresh from the
/// layout at every extraction.
#[derive(Clone, Debug)]
pub struct PatchAccumulator<T> {
    metric: Metric,
    footprint: Arc<Footprint>,
    topology: Arc<PatchTopology>,
    layout: WindowLayout<T>,
}

impl<T: ClassValue> Accumulator for PatchAccumulator<T> {
    type Sample = CellSample<T>;
    type Output = f64;

    fn insert(&mut self, sample: CellSample<T>) {
        self.layout.insert(sample.pos, sample.value);
    }

    fn remove(&mut self, sample: CellSample<T>) -> Result<(), AccumulatorError> {
        self.layout
            .remove(sample.pos)
            .map(|_| ())
            .ok_or(AccumulatorError::not_inserted(self.metric.name()))
    }

    fn extract(&self, focal: GridPos) -> Option<f64> {
        let present = self.layout.present();
        if present == 0 {
            return None;
        }
        let mut values = Vec::with_capacity(self.footprint.len());
        self.layout.gather(focal, &self.footprint, &mut values);
        // gather aligns values with the footprint, so this cannot mismatch.
        let patches = self.topology.identify(&values).ok()?;
        if patches.is_empty() {
            return None;
        }
        Some(self.metric.evaluate(&patches, present))
    }
}
