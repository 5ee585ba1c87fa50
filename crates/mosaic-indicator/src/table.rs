//! Class frequency table with O(1) amortized updates.

use indexmap::IndexMap;
use std::hash::Hash;

/// Occurrence counts of class values in a window.
///
/// Classes whose count drops to zero are removed, so [`len`](Self::len) is
/// always the number of distinct classes present.
#[derive(Clone, Debug)]
pub struct FrequencyTable<T> {
    counts: IndexMap<T, usize>,
    total: usize,
}

impl<T> Default for FrequencyTable<T> {
    fn default() -> Self {
        Self {
            counts: IndexMap::new(),
            total: 0,
        }
    }
}

impl<T: Copy + Eq + Hash> FrequencyTable<T> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `value`.
    pub fn insert(&mut self, value: T) {
        *self.counts.entry(value).or_insert(0) += 1;
        self.total += 1;
    }

    /// Count one fewer occurrence of `value`. Returns `false` if `value` is
    /// not in the table.
    pub fn remove(&mut self, value: T) -> bool {
        let Some(n) = self.counts.get_mut(&value) else {
            return false;
        };
        *n -= 1;
        if *n == 0 {
            self.counts.swap_remove(&value);
        }
        self.total -= 1;
        true
    }

    /// Occurrences of `value`.
    pub fn count(&self, value: &T) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct classes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no class is present.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Largest count, or 0 for an empty table.
    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }

    /// `(class, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (T, usize)> + '_ {
        self.counts.iter().map(|(&k, &n)| (k, n))
    }

    /// Class proportions `count / total` in unspecified order.
    pub fn proportions(&self) -> impl Iterator<Item = f64> + '_ {
        let total = self.total as f64;
        self.counts.values().map(move |&n| n as f64 / total)
    }
}
