//! Adjacency rule used to connect cells into patches.

use mosaic_core::Offset;

/// The four rook directions: N, S, W, E.
pub(crate) const ROOK_OFFSETS: [Offset; 4] = [
    Offset::new(-1, 0),
    Offset::new(1, 0),
    Offset::new(0, -1),
    Offset::new(0, 1),
];

/// Rook directions followed by the diagonals NW, NE, SW, SE.
const QUEEN_OFFSETS: [Offset; 8] = [
    Offset::new(-1, 0),
    Offset::new(1, 0),
    Offset::new(0, -1),
    Offset::new(0, 1),
    Offset::new(-1, -1),
    Offset::new(-1, 1),
    Offset::new(1, -1),
    Offset::new(1, 1),
];

/// Which neighbours count as connected when grouping cells into patches.
///
/// Patch perimeter is always measured along the four rook directions; the
/// contiguity only decides which cells merge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Contiguity {
    /// Edge-sharing neighbours only (4-connected).
    #[default]
    Rook,
    /// Edge- and corner-sharing neighbours (8-connected).
    Queen,
}

impl Contiguity {
    /// Unit offsets of connected neighbours, rook directions first.
    pub fn offsets(self) -> &'static [Offset] {
        match self {
            Self::Rook => &ROOK_OFFSETS,
            Self::Queen => &QUEEN_OFFSETS,
        }
    }
}
