//! Window geometry for the Mosaic moving-window engine.
//!
//! A window is described by a [`WindowShape`] and a radius. This crate turns
//! that description into immutable, ordered geometry that is built once per
//! computation and shared read-only by every traversal line:
//!
//! - [`Footprint`]: the cell offsets covered by a square or circular window
//! - [`EdgeFootprint`]: the 4-adjacent cell pairs inside such a window
//! - [`SlideDelta`]: the members that leave and enter on a one-column slide
//! - [`PatchTopology`]: precomputed adjacency used to split a window's
//!   values into connected same-valued [`Patch`]es under a [`Contiguity`]
//! - [`DistanceKernel`]: a circular window whose members are weighted by
//!   their distance from the focal cell
//!
//! All member orders are row-major, which fixes every order-dependent
//! decision downstream (tie-breaks, patch numbering).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod contiguity;
pub mod delta;
pub mod edge;
pub mod error;
pub mod footprint;
pub mod kernel;
pub mod patch;
pub mod shape;

#[cfg(test)]
pub(crate) mod compliance;

pub use contiguity::Contiguity;
pub use delta::{SlideDelta, WindowMember};
pub use edge::{EdgeFootprint, EdgePair};
pub use error::WindowError;
pub use footprint::Footprint;
pub use kernel::DistanceKernel;
pub use patch::{Patch, PatchTopology};
pub use shape::{BaseShape, WindowFamily, WindowShape};
