//! Toroidal buffer of the values currently inside a window.

use mosaic_core::{GridPos, Offset};
use mosaic_window::Footprint;

/// Values of the cells currently in a window, addressed by absolute position.
///
/// The buffer holds `(2·reach + 1)²` slots and maps each position onto a slot
/// by taking row and column modulo the side length. Two live cells of one
/// window never share a slot. Every slot remembers the position it holds, so
/// a read for a position that has left the window yields `None` instead of
/// a stale value.
#[derive(Clone, Debug)]
pub struct WindowLayout<T> {
    side: usize,
    slots: Vec<Option<(GridPos, Option<T>)>>,
    present: usize,
}

impl<T: Copy> WindowLayout<T> {
    /// A layout for windows whose members lie within `reach` of the focal cell.
    pub fn new(reach: u32) -> Self {
        let side = 2 * reach as usize + 1;
        Self {
            side,
            slots: vec![None; side * side],
            present: 0,
        }
    }

    /// A layout sized for `footprint`.
    pub fn for_footprint(footprint: &Footprint) -> Self {
        Self::new(footprint.reach())
    }

    #[inline]
    fn slot(&self, pos: GridPos) -> usize {
        let side = self.side as isize;
        let r = pos.row.rem_euclid(side) as usize;
        let c = pos.col.rem_euclid(side) as usize;
        r * self.side + c
    }

    /// Record `value` at `pos`, replacing whatever the slot held.
    pub fn insert(&mut self, pos: GridPos, value: Option<T>) {
        let i = self.slot(pos);
        if let Some((_, Some(_))) = self.slots[i] {
            self.present -= 1;
        }
        if value.is_some() {
            self.present += 1;
        }
        self.slots[i] = Some((pos, value));
    }

    /// Forget `pos`. Returns the stored value, or `None` if `pos` is not in
    /// the layout.
    pub fn remove(&mut self, pos: GridPos) -> Option<Option<T>> {
        let i = self.slot(pos);
        match self.slots[i] {
            Some((held, value)) if held == pos => {
                self.slots[i] = None;
                if value.is_some() {
                    self.present -= 1;
                }
                Some(value)
            }
            _ => None,
        }
    }

    /// Whether `pos` is currently in the layout, missing or not.
    #[inline]
    pub fn holds(&self, pos: GridPos) -> bool {
        matches!(self.slots[self.slot(pos)], Some((held, _)) if held == pos)
    }

    /// Value at `pos`, or `None` if the cell is missing or not in the layout.
    #[inline]
    pub fn get(&self, pos: GridPos) -> Option<T> {
        match self.slots[self.slot(pos)] {
            Some((held, value)) if held == pos => value,
            _ => None,
        }
    }

    /// Number of non-missing values held.
    pub fn present(&self) -> usize {
        self.present
    }

    /// Values of the window centred on `focal`, aligned with `footprint`'s
    /// row-major member order. Members that are not held read as `None`.
    pub fn gather(&self, focal: GridPos, footprint: &Footprint, out: &mut Vec<Option<T>>) {
        out.clear();
        out.extend(footprint.members().map(|m: Offset| self.get(focal + m)));
    }
}
