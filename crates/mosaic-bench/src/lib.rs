//! Benchmark profiles and utilities for the Mosaic engine.
//!
//! Provides deterministic landscapes and query sets for benchmarking:
//!
//! - [`reference_landscape`]: 256x256 clustered class raster (64K cells)
//! - [`stress_landscape`]: 1024x1024 clustered class raster (~1M cells)
//! - [`reference_queries`]: one query per indicator at a common radius

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use mosaic_core::Raster;
use mosaic_engine::{IndicatorKind, WindowQuery};
use mosaic_window::{Contiguity, WindowFamily, WindowShape};
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Share of cells in the profiles that carry no data.
pub const MISSING_SHARE: f64 = 0.05;

/// Build a reference landscape: 256x256 cells, 6 classes in 8-cell blocks.
pub fn reference_landscape(seed: u64) -> Raster<u8> {
    clustered_landscape(256, 256, 8, 6, seed)
}

/// Build a stress landscape: 1024x1024 cells, 8 classes in 16-cell blocks.
pub fn stress_landscape(seed: u64) -> Raster<u8> {
    clustered_landscape(1024, 1024, 16, 8, seed)
}

/// Generate a patchy class raster.
///
/// Each `block x block` tile draws one class; every cell then keeps it
/// with probability 0.85 and otherwise takes a fresh random class, giving
/// both large patches and fine-grained edges. A [`MISSING_SHARE`] of cells
/// is left empty.
pub fn clustered_landscape(rows: usize, cols: usize, block: usize, classes: u8, seed: u64) -> Raster<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let block = block.max(1);
    let classes = u32::from(classes.max(1));
    let tiles_across = cols.div_ceil(block);
    let tiles: Vec<u8> = (0..rows.div_ceil(block) * tiles_across)
        .map(|_| (rng.next_u32() % classes) as u8)
        .collect();

    Raster::from_fn(rows, cols, |r, c| {
        let roll = unit(&mut rng);
        if roll < MISSING_SHARE {
            return None;
        }
        if roll < MISSING_SHARE + 0.15 {
            return Some((rng.next_u32() % classes) as u8);
        }
        Some(tiles[(r / block) * tiles_across + c / block])
    })
}

fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

/// One query per indicator, each over the window family it needs.
///
/// Square windows use `radius`; patch indicators connect under
/// [`Contiguity::Queen`].
pub fn reference_queries(radius: u32) -> Vec<WindowQuery> {
    let radius = f64::from(radius.max(1));
    IndicatorKind::ALL
        .iter()
        .map(|&kind| {
            let shape = match kind.family() {
                WindowFamily::Cell => WindowShape::Square,
                WindowFamily::Edge => WindowShape::EdgeSquare,
                WindowFamily::Patch => WindowShape::PatchSquare,
            };
            let query = WindowQuery::new(kind, shape, radius);
            if kind.family() == WindowFamily::Patch {
                query.with_contiguity(Contiguity::Queen)
            } else {
                query
            }
        })
        .collect()
}
