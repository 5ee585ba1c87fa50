//! Naive indicator formulas over a window's raw values.
//!
//! Nothing here touches an accumulator, a frequency table or a patch
//! topology. Each indicator is written out from its definition over the
//! values a window covers, so agreeing with these functions checks the
//! formulas themselves, not only the incremental bookkeeping.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use mosaic_core::{GridPos, GridSource, Raster};
use mosaic_window::{Contiguity, EdgeFootprint, Footprint};

/// Values covered by `footprint` around `focal`, aligned with its row-major
/// members. Members outside the raster read as `None`.
pub fn window_cells<T: Copy, S: GridSource<T>>(source: &S, footprint: &Footprint, focal: GridPos) -> Vec<Option<T>> {
    let extent = source.extent();
    footprint
        .members()
        .map(|m| {
            extent
                .locate(focal + m)
                .and_then(|(r, c)| source.get(r, c).expect("naive source read"))
        })
        .collect()
}

/// Value pairs of `edges` around `focal` with both cells inside the raster
/// and present, in member order.
pub fn window_pairs<T: Copy, S: GridSource<T>>(source: &S, edges: &EdgeFootprint, focal: GridPos) -> Vec<(T, T)> {
    let extent = source.extent();
    let read = |pos| {
        extent
            .locate(pos)
            .and_then(|(r, c)| source.get(r, c).expect("naive source read"))
    };
    edges
        .members()
        .filter_map(|p| Some((read(focal + p.a)?, read(focal + p.b)?)))
        .collect()
}

/// Evaluate `f` over the cell window at every cell of `source`.
pub fn naive_cell_raster<T, S, R>(source: &S, footprint: &Footprint, f: impl Fn(&[Option<T>]) -> Option<R>) -> Raster<R>
where
    T: Copy,
    S: GridSource<T>,
    R: Copy,
{
    let extent = source.extent();
    Raster::from_fn(extent.rows, extent.cols, |row, col| {
        f(&window_cells(source, footprint, GridPos::at(row, col)))
    })
}

/// Evaluate `f` over the complete pairs of the edge window at every cell.
pub fn naive_edge_raster<T, S>(source: &S, edges: &EdgeFootprint, f: impl Fn(&[(T, T)]) -> Option<f64>) -> Raster<f64>
where
    T: Copy,
    S: GridSource<T>,
{
    let extent = source.extent();
    Raster::from_fn(extent.rows, extent.cols, |row, col| {
        f(&window_pairs(source, edges, GridPos::at(row, col)))
    })
}

fn tally<T: Copy + Ord>(values: &[Option<T>]) -> BTreeMap<T, usize> {
    let mut counts = BTreeMap::new();
    for v in values.iter().flatten() {
        *counts.entry(*v).or_insert(0) += 1;
    }
    counts
}

// ── Cell windows ────────────────────────────────────────────────────

pub fn naive_count<T>(values: &[Option<T>]) -> Option<f64> {
    let n = values.iter().filter(|v| v.is_some()).count();
    (n > 0).then_some(n as f64)
}

pub fn naive_mean<T: Copy + Into<f64>>(values: &[Option<T>]) -> Option<f64> {
    let present: Vec<f64> = values.iter().flatten().map(|&v| v.into()).collect();
    (!present.is_empty()).then(|| present.iter().sum::<f64>() / present.len() as f64)
}

/// Most frequent value; ties go to the tied value met first in `values`.
pub fn naive_mode<T: Copy + Ord>(values: &[Option<T>]) -> Option<T> {
    let counts = tally(values);
    let best = counts.values().copied().max()?;
    values.iter().flatten().copied().find(|v| counts[v] == best)
}

pub fn naive_shannon<T: Copy + Ord>(values: &[Option<T>]) -> Option<f64> {
    let counts = tally(values);
    let n: usize = counts.values().sum();
    if n == 0 {
        return None;
    }
    let h: f64 = counts
        .values()
        .map(|&c| {
            let p = c as f64 / n as f64;
            -p * p.ln()
        })
        .sum();
    Some(h)
}

pub fn naive_simpson<T: Copy + Ord>(values: &[Option<T>]) -> Option<f64> {
    let counts = tally(values);
    let n: usize = counts.values().sum();
    if n == 0 {
        return None;
    }
    let sum_sq: f64 = counts
        .values()
        .map(|&c| {
            let p = c as f64 / n as f64;
            p * p
        })
        .sum();
    Some(1.0 - sum_sq)
}

// ── Edge windows ────────────────────────────────────────────────────

pub fn naive_edge_density<T: Copy + PartialEq>(pairs: &[(T, T)]) -> Option<f64> {
    if pairs.is_empty() {
        return None;
    }
    let differing = pairs.iter().filter(|(a, b)| a != b).count();
    Some(differing as f64 / pairs.len() as f64)
}

pub fn naive_interspersion<T: Copy + Ord>(pairs: &[(T, T)]) -> Option<f64> {
    let mut kinds: BTreeMap<(T, T), usize> = BTreeMap::new();
    let mut classes = BTreeSet::new();
    for &(a, b) in pairs.iter().filter(|(a, b)| a != b) {
        *kinds.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        classes.insert(a);
        classes.insert(b);
    }
    let m = classes.len();
    if m < 3 {
        return None;
    }
    let total: usize = kinds.values().sum();
    let entropy: f64 = kinds
        .values()
        .map(|&n| {
            let f = n as f64 / total as f64;
            -f * f.ln()
        })
        .sum();
    Some(entropy / ((m * (m - 1)) as f64 / 2.0).ln())
}

// ── Patch windows ───────────────────────────────────────────────────

/// `(area, perimeter)` of every connected same-valued group of present
/// cells, found by breadth-first search. A side counts towards the
/// perimeter when the rook neighbour across it is not in the same patch.
pub fn naive_patches<T: Copy + PartialEq>(
    footprint: &Footprint,
    contiguity: Contiguity,
    values: &[Option<T>],
) -> Vec<(usize, usize)> {
    let members: Vec<_> = footprint.members().collect();
    let at = |i: usize, dr: i32, dc: i32| footprint.index_of(members[i].shifted(dr, dc));
    let mut seen = vec![false; members.len()];
    let mut patches = Vec::new();
    for start in 0..members.len() {
        let Some(value) = values[start] else { continue };
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut queue = VecDeque::from([start]);
        let (mut area, mut perimeter) = (0, 0);
        while let Some(i) = queue.pop_front() {
            area += 1;
            for d in Contiguity::Rook.offsets() {
                if at(i, d.row, d.col).is_none_or(|j| values[j] != Some(value)) {
                    perimeter += 1;
                }
            }
            for d in contiguity.offsets() {
                if let Some(j) = at(i, d.row, d.col) {
                    if !seen[j] && values[j] == Some(value) {
                        seen[j] = true;
                        queue.push_back(j);
                    }
                }
            }
        }
        patches.push((area, perimeter));
    }
    patches
}

/// Smallest perimeter of `area` cells, by trying every bounding width.
pub fn naive_min_perimeter(area: usize) -> usize {
    (1..=area)
        .map(|w| 2 * (w + area.div_ceil(w)))
        .min()
        .unwrap_or(0)
}

pub fn naive_patch_size(patches: &[(usize, usize)]) -> Option<f64> {
    let total: usize = patches.iter().map(|p| p.0).sum();
    let squares: usize = patches.iter().map(|p| p.0 * p.0).sum();
    (total > 0).then(|| squares as f64 / total as f64)
}

pub fn naive_shape_index(patches: &[(usize, usize)]) -> Option<f64> {
    let total: usize = patches.iter().map(|p| p.0).sum();
    let weighted: f64 = patches
        .iter()
        .map(|&(a, p)| a as f64 * p as f64 / naive_min_perimeter(a) as f64)
        .sum();
    (total > 0).then(|| weighted / total as f64)
}

pub fn naive_patch_density(patches: &[(usize, usize)]) -> Option<f64> {
    let total: usize = patches.iter().map(|p| p.0).sum();
    (total > 0).then(|| patches.len() as f64 / total as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mosaic_window::WindowShape;

    #[test]
    fn mode_tie_takes_first_seen() {
        assert_eq!(naive_mode(&[None, Some(7), Some(3), Some(3), Some(7)]), Some(7));
        assert_eq!(naive_mode::<u8>(&[None, None]), None);
    }

    #[test]
    fn min_perimeter_by_widths() {
        let table: Vec<usize> = (1..=10).map(naive_min_perimeter).collect();
        assert_eq!(table, vec![4, 6, 8, 8, 10, 10, 12, 12, 12, 14]);
    }

    #[test]
    fn checkerboard_patches_are_single_cells_under_rook() {
        let fp = Footprint::generate(WindowShape::PatchSquare, 1.0).unwrap();
        let values: Vec<Option<u8>> = (0..9).map(|i| Some((i % 2) as u8)).collect();
        let rook = naive_patches(&fp, Contiguity::Rook, &values);
        assert_eq!(rook.len(), 9);
        assert!(rook.iter().all(|&p| p == (1, 4)));
        let queen = naive_patches(&fp, Contiguity::Queen, &values);
        assert_eq!(queen.len(), 2);
        assert_eq!(naive_patch_density(&queen), Some(2.0 / 9.0));
    }

    #[test]
    fn interspersion_of_even_triangle_is_one() {
        let v = naive_interspersion(&[(1u8, 2u8), (2, 3), (3, 1), (1, 1)]).unwrap();
        assert!((v - 1.0).abs() < 1e-12);
        assert_eq!(naive_interspersion(&[(1u8, 2u8)]), None);
    }
}
