//! Core types and contracts for the Mosaic moving-window engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! value traits accepted by indicators, the coordinate types shared by
//! windows and traversals, the [`GridSource`]/[`GridSink`] collaborator
//! contracts, an in-memory [`Raster`], and the no-data conversion used at
//! the raster boundary.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod error;
pub mod grid;
pub mod nodata;
pub mod raster;
pub mod value;

pub use coord::{Extent, GridPos, Offset};
pub use error::GridError;
pub use grid::{GridSink, GridSource};
pub use nodata::{denodata, optionalize, NodataGrid};
pub use raster::Raster;
pub use value::{CellValue, ClassValue};
