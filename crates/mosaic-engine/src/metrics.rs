//! Per-computation traversal metrics.
//!
//! [`TraversalMetrics`] captures timing and work counters for the most
//! recent [`Engine`](crate::Engine) call.

/// Timing and work counters collected during one computation.
///
/// Durations are in microseconds. The engine overwrites these after every
/// successful `run`/`compute`; read them with
/// [`Engine::last_metrics`](crate::Engine::last_metrics).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TraversalMetrics {
    /// Wall-clock time for the whole computation, in microseconds.
    pub total_us: u64,
    /// Lines traversed.
    pub lines: usize,
    /// Output cells written.
    pub cells: usize,
    /// Accumulator insertions issued.
    pub inserts: u64,
    /// Accumulator removals issued.
    pub removes: u64,
    /// Output cells with no result.
    pub no_result_cells: usize,
    /// Worker threads used; 1 for sequential traversal.
    pub workers: usize,
}

impl TraversalMetrics {
    /// Mean accumulator operations per output cell.
    pub fn updates_per_cell(&self) -> f64 {
        if self.cells == 0 {
            return 0.0;
        }
        (self.inserts + self.removes) as f64 / self.cells as f64
    }
}
