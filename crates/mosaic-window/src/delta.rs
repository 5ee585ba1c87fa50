//! Membership change for a one-column slide of the focal cell.

use indexmap::IndexSet;
use mosaic_core::Offset;
use std::fmt::Debug;
use std::hash::Hash;

/// Something a window is made of: a single offset, or a pair of offsets.
///
/// Members are translated horizontally when the window slides along a line.
pub trait WindowMember: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// This member translated by `dc` columns.
    fn shift_cols(self, dc: i32) -> Self;
}

impl WindowMember for Offset {
    #[inline]
    fn shift_cols(self, dc: i32) -> Self {
        self.shifted(0, dc)
    }
}

/// Members that leave and enter when the focal cell moves one column right.
///
/// `leaving` is expressed relative to the old focal cell and `entering`
/// relative to the new one. Both keep the footprint's row-major order.
/// For a member set `M`:
///
/// - `leaving  = { m ∈ M : m − (0,1) ∉ M }`
/// - `entering = { m ∈ M : m + (0,1) ∉ M }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideDelta<M> {
    leaving: Vec<M>,
    entering: Vec<M>,
}

impl<M: WindowMember> SlideDelta<M> {
    /// Compute the delta for an ordered member set.
    pub fn between(members: &IndexSet<M>) -> Self {
        let leaving = members
            .iter()
            .copied()
            .filter(|m| !members.contains(&m.shift_cols(-1)))
            .collect();
        let entering = members
            .iter()
            .copied()
            .filter(|m| !members.contains(&m.shift_cols(1)))
            .collect();
        Self { leaving, entering }
    }

    /// Members to remove, relative to the previous focal cell.
    pub fn leaving(&self) -> &[M] {
        &self.leaving
    }

    /// Members to insert, relative to the new focal cell.
    pub fn entering(&self) -> &[M] {
        &self.entering
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_by_three_swaps_outer_columns() {
        let members: IndexSet<Offset> = (-1..=1)
            .flat_map(|r| (-1..=1).map(move |c| Offset::new(r, c)))
            .collect();
        let d = SlideDelta::between(&members);
        assert_eq!(
            d.leaving(),
            &[Offset::new(-1, -1), Offset::new(0, -1), Offset::new(1, -1)]
        );
        assert_eq!(
            d.entering(),
            &[Offset::new(-1, 1), Offset::new(0, 1), Offset::new(1, 1)]
        );
    }

    #[test]
    fn single_member_leaves_and_enters() {
        let members: IndexSet<Offset> = [Offset::ORIGIN].into_iter().collect();
        let d = SlideDelta::between(&members);
        assert_eq!(d.leaving(), &[Offset::ORIGIN]);
        assert_eq!(d.entering(), &[Offset::ORIGIN]);
    }
}
