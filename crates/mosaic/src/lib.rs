//! Mosaic: incremental moving-window landscape indicators over rasters.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Mosaic sub-crates. For most users, adding `mosaic` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use mosaic::prelude::*;
//!
//! // 5x6 land-cover raster with one missing cell.
//! let mut land = Raster::from_fn(5, 6, |r, c| Some(((r / 2 + c / 3) % 3) as u8));
//! land.put(4, 5, None);
//!
//! // Shannon diversity in a radius-1.5 circle around every cell.
//! let query = WindowQuery::new(IndicatorKind::ShannonDiversity, WindowShape::Circle, 1.5);
//! let mut out = Raster::empty(5, 6);
//! let mut engine = Engine::new(EngineConfig::default()).unwrap();
//! engine.compute(&query, &land, &mut out).unwrap();
//!
//! assert_eq!(out.cell(0, 0), Some(0.0));
//! assert!(out.cell(2, 2).unwrap() > 0.0);
//! assert_eq!(engine.last_metrics().cells, 30);
//!
//! // Patch indicators take a contiguity rule.
//! let patches = WindowQuery::new(IndicatorKind::PatchDensity, WindowShape::PatchSquare, 1.0)
//!     .with_contiguity(Contiguity::Queen);
//! let density = compute(&patches, &land).unwrap();
//! assert!(density.cell(1, 1).is_some());
//!
//! // Distance-weighted windows: nearer cells count for more.
//! let kernel = DistanceKernel::generate(2.0, |d| 1.0 / (1.0 + d)).unwrap();
//! engine
//!     .compute_weighted(WeightedKind::MostCommonClass, &kernel, &land, &mut out)
//!     .unwrap();
//! assert!(out.cell(0, 0).is_some());
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `mosaic-core` | Cell values, coordinates, grid contracts, `Raster`, no-data |
//! | [`window`] | `mosaic-window` | Footprints, edge pairs, slide deltas, patch topology, distance kernels |
//! | [`indicator`] | `mosaic-indicator` | `Indicator`/`Accumulator` traits, the ten indicators, weighted accumulators |
//! | [`engine`] | `mosaic-engine` | Sliding traversal, scheduling, `compute` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Cell values, coordinates, and grid contracts (`mosaic-core`).
///
/// Contains [`types::Raster`], the [`types::GridSource`] and
/// [`types::GridSink`] traits, and the no-data conversions.
pub use mosaic_core as types;

/// Window geometry (`mosaic-window`).
///
/// [`window::Footprint`] and [`window::EdgeFootprint`] with their slide
/// deltas, and [`window::PatchTopology`] for connected components.
pub use mosaic_window as window;

/// Indicators and accumulators (`mosaic-indicator`).
///
/// The [`indicator::Indicator`] trait is the extension point for
/// statically typed computations through [`engine::Engine::run`].
pub use mosaic_indicator as indicator;

/// Traversal engine (`mosaic-engine`).
///
/// [`engine::Engine`] for repeated computations with metrics,
/// [`engine::compute`] for one-shot use.
pub use mosaic_engine as engine;

/// Common imports for typical Mosaic usage.
///
/// ```rust
/// use mosaic::prelude::*;
/// ```
pub mod prelude {
    // Grid types and contracts
    pub use mosaic_core::{
        CellValue, ClassValue, Extent, GridError, GridSink, GridSource, NodataGrid, Raster,
    };

    // Windows
    pub use mosaic_window::{Contiguity, DistanceKernel, WindowError, WindowShape};

    // Indicators
    pub use mosaic_indicator::{Accumulator, Indicator, WeightedAccumulator};

    // Engine
    pub use mosaic_engine::{
        compute, ComputeError, Engine, EngineConfig, IndicatorKind, TraversalMetrics, WeightedKind,
        WindowQuery,
    };
}
