//! Footprint compliance test helpers.
//!
//! These functions verify the invariants every footprint must satisfy,
//! whatever its shape and radius. Reused by the footprint and edge test
//! modules and by the property tests.

use crate::delta::{SlideDelta, WindowMember};
use crate::edge::EdgeFootprint;
use crate::footprint::Footprint;
use indexmap::IndexSet;
use mosaic_core::Offset;

/// Assert that members are strictly increasing in row-major order.
pub fn assert_row_major(fp: &Footprint) {
    let members: Vec<Offset> = fp.members().collect();
    for w in members.windows(2) {
        assert!(w[0] < w[1], "members out of order: {} before {}", w[0], w[1]);
    }
}

/// Assert that the focal cell is always covered.
pub fn assert_contains_origin(fp: &Footprint) {
    assert!(
        fp.contains(Offset::ORIGIN),
        "{} footprint of radius {} misses the focal cell",
        fp.shape(),
        fp.radius()
    );
}

/// Assert mirror symmetry across both axes and the diagonal.
pub fn assert_symmetric(fp: &Footprint) {
    for m in fp.members() {
        for image in [
            Offset::new(-m.row, m.col),
            Offset::new(m.row, -m.col),
            Offset::new(m.col, m.row),
        ] {
            assert!(fp.contains(image), "{m} is a member but {image} is not");
        }
    }
}

/// Assert that `reach` is the largest absolute delta of any member.
pub fn assert_reach(fp: &Footprint) {
    let max = fp.members().map(Offset::chebyshev).max().unwrap_or(0);
    assert_eq!(fp.reach(), max, "reach disagrees with members");
}

/// Assert that applying a slide delta to a member set yields the same set
/// one column to the right.
pub fn assert_slide_consistent<M: WindowMember>(members: &IndexSet<M>, delta: &SlideDelta<M>) {
    assert_eq!(
        delta.leaving().len(),
        delta.entering().len(),
        "slide must preserve window size"
    );
    // Members that stay, seen from the new focal cell.
    let mut after: IndexSet<M> = members
        .iter()
        .filter(|m| !delta.leaving().contains(*m))
        .map(|m| m.shift_cols(-1))
        .collect();
    for m in delta.entering() {
        assert!(after.insert(*m), "{m:?} entered but was already present");
    }
    assert_eq!(after.len(), members.len());
    for m in members {
        assert!(after.contains(m), "{m:?} missing after slide");
    }
}

/// Run every footprint check.
pub fn run_footprint_compliance(fp: &Footprint) {
    assert_row_major(fp);
    assert_contains_origin(fp);
    assert_symmetric(fp);
    assert_reach(fp);
    let members: IndexSet<Offset> = fp.members().collect();
    assert_slide_consistent(&members, fp.slide());
}

/// Run every edge footprint check.
pub fn run_edge_compliance(ef: &EdgeFootprint) {
    run_footprint_compliance(ef.base());
    let mut undirected = IndexSet::new();
    for p in ef.members() {
        let d = Offset::new(p.b.row - p.a.row, p.b.col - p.a.col);
        assert!(
            d == Offset::new(0, 1) || d == Offset::new(1, 0),
            "pair {p:?} is not right/down adjacent"
        );
        assert!(ef.base().contains(p.a) && ef.base().contains(p.b));
        assert!(undirected.insert((p.a, p.b)), "duplicate pair {p:?}");
    }
    // Every adjacent member pair is present.
    let expected: usize = ef
        .base()
        .members()
        .map(|m| {
            usize::from(ef.base().contains(m.shifted(0, 1)))
                + usize::from(ef.base().contains(m.shifted(1, 0)))
        })
        .sum();
    assert_eq!(ef.len(), expected);
    let members: IndexSet<_> = ef.members().collect();
    assert_slide_consistent(&members, ef.slide());
}
