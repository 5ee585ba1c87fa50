//! Sliding-window traversal engine for Mosaic.
//!
//! The engine walks a raster line by line. On each line a fresh accumulator
//! is primed with the window around the first cell, then slid one column at
//! a time: only the members in the window's [`SlideDelta`](mosaic_window::SlideDelta)
//! are removed and inserted, so the per-cell cost follows the window's
//! boundary rather than its area.
//!
//! Two entry points are provided:
//!
//! - [`Engine::run`]: statically typed, any [`Indicator`](mosaic_indicator::Indicator)
//!   and its own output type.
//! - [`Engine::compute`] and the free function [`compute`]: resolve a
//!   [`WindowQuery`] naming the indicator and window at runtime, producing
//!   `f64` output.
//!
//! Distance-weighted windows are evaluated afresh at every cell instead of
//! sliding: [`Engine::run_weighted`] and [`Engine::compute_weighted`] take a
//! [`DistanceKernel`](mosaic_window::DistanceKernel), and
//! [`Engine::summarize`] merges per-line subtotals into one value for the
//! whole raster.
//!
//! Lines are independent. [`EngineConfig::worker_count`] selects sequential
//! execution or a scoped worker pool fed over a bounded channel; only the
//! calling thread writes the output grid.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;
pub mod gather;
pub mod guard;
pub mod metrics;
pub mod query;
mod schedule;
pub mod traversal;
pub mod weighted;

pub use config::{ConfigError, EngineConfig};
pub use engine::{compute, Engine};
pub use error::ComputeError;
pub use gather::Gather;
pub use guard::LineWriter;
pub use metrics::TraversalMetrics;
pub use query::{IndicatorKind, WeightedKind, WindowQuery};
pub use traversal::{run_line, LineOutput, LineState, LineStats, LineTraversal};
pub use weighted::{run_weighted_line, summarize_line};
