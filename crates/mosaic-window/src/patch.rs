//! Connected-component analysis of a window's values.

use crate::contiguity::{Contiguity, ROOK_OFFSETS};
use crate::error::WindowError;
use crate::footprint::Footprint;
use smallvec::SmallVec;

/// One maximal connected group of equal, non-missing values in a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Patch<T> {
    /// The shared class value.
    pub value: T,
    /// Number of cells.
    pub area: usize,
    /// Rook-direction cell sides that face outside the window, a missing
    /// cell, or a different value.
    pub perimeter: usize,
}

/// Footprint adjacency precomputed for patch identification.
///
/// Built once per footprint and contiguity. [`identify`](Self::identify)
/// then works purely on indices into the footprint's row-major order.
#[derive(Clone, Debug)]
pub struct PatchTopology {
    contiguity: Contiguity,
    /// Connected neighbours with a higher footprint index.
    links: Vec<SmallVec<[u32; 4]>>,
    /// Rook neighbours N, S, W, E; `None` is outside the footprint.
    rook: Vec<[Option<u32>; 4]>,
}

impl PatchTopology {
    /// Precompute adjacency for `footprint` under `contiguity`.
    pub fn new(footprint: &Footprint, contiguity: Contiguity) -> Self {
        let index = |o| footprint.index_of(o).map(|i| i as u32);
        let mut links = Vec::with_capacity(footprint.len());
        let mut rook = Vec::with_capacity(footprint.len());
        for (i, m) in footprint.members().enumerate() {
            let forward = contiguity
                .offsets()
                .iter()
                .filter_map(|d| index(m.shifted(d.row, d.col)))
                .filter(|&j| j as usize > i)
                .collect();
            links.push(forward);

            let mut sides = [None; 4];
            for (side, d) in sides.iter_mut().zip(ROOK_OFFSETS.iter()) {
                *side = index(m.shifted(d.row, d.col));
            }
            rook.push(sides);
        }
        Self {
            contiguity,
            links,
            rook,
        }
    }

    /// The contiguity rule in use.
    pub fn contiguity(&self) -> Contiguity {
        self.contiguity
    }

    /// Number of footprint cells the topology covers.
    pub fn len(&self) -> usize {
        self.rook.len()
    }

    /// Always `false` for a topology built from a valid footprint.
    pub fn is_empty(&self) -> bool {
        self.rook.is_empty()
    }

    /// Split `values` into patches.
    ///
    /// `values` must be aligned with the footprint's row-major order; a
    /// slice of any other length yields [`WindowError::LayoutMismatch`].
    /// Missing cells belong to no patch. Patches are returned in the order
    /// of their first cell.
    pub fn identify<T: Copy + Eq>(&self, values: &[Option<T>]) -> Result<Vec<Patch<T>>, WindowError> {
        if values.len() != self.len() {
            return Err(WindowError::LayoutMismatch {
                expected: self.len(),
                actual: values.len(),
            });
        }

        let mut sets = DisjointSets::new(values.len());
        for (i, v) in values.iter().enumerate() {
            let Some(v) = v else { continue };
            for &j in &self.links[i] {
                if values[j as usize].as_ref() == Some(v) {
                    sets.union(i as u32, j);
                }
            }
        }

        let mut slot = vec![u32::MAX; values.len()];
        let mut patches: Vec<Patch<T>> = Vec::new();
        for (i, v) in values.iter().enumerate() {
            let Some(value) = *v else { continue };
            let root = sets.find(i as u32) as usize;
            if slot[root] == u32::MAX {
                slot[root] = patches.len() as u32;
                patches.push(Patch {
                    value,
                    area: 0,
                    perimeter: 0,
                });
            }
            let exposed = self.rook[i]
                .iter()
                .filter(|side| match side {
                    None => true,
                    Some(j) => values[*j as usize] != Some(value),
                })
                .count();
            let p = &mut patches[slot[root] as usize];
            p.area += 1;
            p.perimeter += exposed;
        }
        Ok(patches)
    }
}

/// Union-find with path halving and union by size.
struct DisjointSets {
    parent: Vec<u32>,
    size: Vec<u32>,
}

impl DisjointSets {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n as u32).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grand = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grand;
            x = grand;
        }
        x
    }

    fn union(&mut self, a: u32, b: u32) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra as usize] < self.size[rb as usize] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb as usize] = ra;
        self.size[ra as usize] += self.size[rb as usize];
    }
}
