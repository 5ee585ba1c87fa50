//! Deterministic raster fixtures.

use mosaic_core::Raster;
use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The golden fixture: cell `i` (row-major, 0-based) holds `3(i+1) mod 7`.
///
/// On a 5x6 raster the radius-2 square window at `(2, 2)` covers 25 cells
/// whose mean is exactly 3.0.
pub fn sequence_raster(rows: usize, cols: usize) -> Raster<i32> {
    Raster::from_fn(rows, cols, |r, c| {
        let i = (r * cols + c) as i32;
        Some(3 * (i + 1) % 7)
    })
}

fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

/// A raster of class codes `0..classes`, with roughly `missing` of the
/// cells absent. Same seed, same raster.
pub fn random_class_raster(rows: usize, cols: usize, classes: u8, missing: f64, seed: u64) -> Raster<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let classes = u32::from(classes.max(1));
    Raster::from_fn(rows, cols, |_, _| {
        let absent = unit(&mut rng) < missing;
        let class = (rng.next_u32() % classes) as u8;
        (!absent).then_some(class)
    })
}

/// A raster of reals in `[-100, 100)`, with roughly `missing` of the cells
/// absent.
pub fn random_real_raster(rows: usize, cols: usize, missing: f64, seed: u64) -> Raster<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Raster::from_fn(rows, cols, |_, _| {
        let absent = unit(&mut rng) < missing;
        let value = unit(&mut rng) * 200.0 - 100.0;
        (!absent).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_starts_at_three() {
        let r = sequence_raster(5, 6);
        let first: Vec<_> = r.cells()[..8].iter().map(|v| v.unwrap()).collect();
        assert_eq!(first, vec![3, 6, 2, 5, 1, 4, 0, 3]);
    }

    #[test]
    fn golden_window_mean_is_three() {
        let r = sequence_raster(5, 6);
        let mut sum = 0;
        for row in 0..5 {
            for col in 0..5 {
                sum += r.cell(row, col).unwrap();
            }
        }
        assert_eq!(sum, 75);
    }

    #[test]
    fn random_rasters_are_seeded() {
        assert_eq!(
            random_class_raster(6, 7, 4, 0.2, 9),
            random_class_raster(6, 7, 4, 0.2, 9)
        );
        assert_ne!(
            random_class_raster(6, 7, 4, 0.2, 9),
            random_class_raster(6, 7, 4, 0.2, 10)
        );
        let r = random_class_raster(10, 10, 3, 0.0, 1);
        assert!(r.iter().all(|(_, _, v)| matches!(v, Some(0..=2))));
    }

    #[test]
    fn real_values_in_range() {
        let r = random_real_raster(8, 8, 0.0, 3);
        assert!(r
            .iter()
            .all(|(_, _, v)| v.is_some_and(|x| (-100.0..100.0).contains(&x))));
    }
}
