//! Indicator accumulators for the Mosaic moving-window engine.
//!
//! An [`Indicator`] describes one statistic over one window geometry and
//! creates fresh [`Accumulator`]s. An accumulator holds the incremental state
//! of a single traversal line: the engine inserts samples as they enter the
//! window, removes them as they leave, and extracts a value at every focal
//! cell. Extraction never mutates, and the state after any sequence of
//! operations matches recomputing from the current membership.
//!
//! # Indicators
//!
//! | Indicator | Window | Output |
//! |-----------|--------|--------|
//! | [`Count`] | cell | non-missing cells |
//! | [`Mean`] | cell | arithmetic mean |
//! | [`MostCommonClass`] | cell | modal class |
//! | [`ShannonDiversity`] | cell | `−Σ p ln p` |
//! | [`SimpsonDiversity`] | cell | `1 − Σ p²` |
//! | [`EdgeDensity`] | edge | share of differing pairs |
//! | [`Interspersion`] | edge | evenness of class adjacencies |
//! | [`AreaWeightedPatchSize`] | patch | `Σ a² / Σ a` |
//! | [`PatchWeightedShapeIndex`] | patch | area-weighted shape index |
//! | [`PatchDensity`] | patch | patches per present cell |
//!
//! The [`weighted`] module adds accumulators that take a weight with every
//! sample and merge whole subtotals, for distance-weighted windows and
//! region summaries.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod accumulator;
pub mod count;
pub mod diversity;
pub mod edge;
pub mod indicator;
pub mod layout;
pub mod mean;
pub mod mode;
pub mod patch;
pub mod sample;
pub mod table;
pub mod weighted;

pub use accumulator::{Accumulator, AccumulatorError};
pub use count::{Count, CountAccumulator};
pub use diversity::{DiversityAccumulator, ShannonDiversity, SimpsonDiversity};
pub use edge::{EdgeDensity, EdgeDensityAccumulator, Interspersion, InterspersionAccumulator};
pub use indicator::Indicator;
pub use layout::WindowLayout;
pub use mean::{Mean, MeanAccumulator};
pub use mode::{ModeAccumulator, MostCommonClass};
pub use patch::{
    min_perimeter, AreaWeightedPatchSize, PatchAccumulator, PatchDensity,
    PatchWeightedShapeIndex,
};
pub use sample::{CellSample, EdgeSample};
pub use table::FrequencyTable;
pub use weighted::{
    WeightedAccumulator, WeightedCount, WeightedDiversity, WeightedMean, WeightedMode,
    WeightedSample, WeightedTable,
};
