//! Debug-mode write coverage tracking for line buffers.
//!
//! [`LineWriter`] collects one line of output and, in debug builds, tracks
//! which columns have been written. Finishing a line with a column never
//! written is a debug assertion failure, and a writer dropped part-way (an
//! error unwound the line) logs a diagnostic. Release builds pay zero
//! overhead.

/// Output buffer for one traversal line.
pub struct LineWriter<R> {
    cells: Vec<Option<R>>,
    #[cfg(debug_assertions)]
    written: Vec<bool>,
    #[cfg(debug_assertions)]
    line: usize,
    #[cfg(debug_assertions)]
    indicator: &'static str,
}

impl<R> LineWriter<R> {
    /// A buffer for `cols` cells of line `line`.
    ///
    /// `line` and `indicator` are used for diagnostic messages in debug builds.
    pub fn new(
        #[cfg_attr(not(debug_assertions), allow(unused_variables))] line: usize,
        cols: usize,
        #[cfg_attr(not(debug_assertions), allow(unused_variables))] indicator: &'static str,
    ) -> Self {
        Self {
            cells: (0..cols).map(|_| None).collect(),
            #[cfg(debug_assertions)]
            written: vec![false; cols],
            #[cfg(debug_assertions)]
            line,
            #[cfg(debug_assertions)]
            indicator,
        }
    }

    /// Record the result for column `col`.
    pub fn write(&mut self, col: usize, value: Option<R>) {
        self.cells[col] = value;
        #[cfg(debug_assertions)]
        {
            debug_assert!(!self.written[col], "column {col} written twice");
            self.written[col] = true;
        }
    }

    /// Fraction of cells written (always 1.0 in release builds).
    fn coverage(&self) -> f64 {
        #[cfg(debug_assertions)]
        {
            if self.cells.is_empty() {
                return 1.0;
            }
            let count = self.written.iter().filter(|&&b| b).count();
            count as f64 / self.cells.len() as f64
        }
        #[cfg(not(debug_assertions))]
        {
            1.0
        }
    }

    /// Take the finished line. Every column must have been written.
    pub fn finish(mut self) -> Vec<Option<R>> {
        debug_assert!(
            self.coverage() == 1.0,
            "line finished with {:.1}% of cells written",
            self.coverage() * 100.0
        );
        #[cfg(debug_assertions)]
        {
            self.written.fill(true);
        }
        std::mem::take(&mut self.cells)
    }
}

#[cfg(debug_assertions)]
impl<R> Drop for LineWriter<R> {
    fn drop(&mut self) {
        if self.cells.is_empty() {
            return;
        }
        let total = self.written.len();
        let count = self.written.iter().filter(|&&b| b).count();
        if count < total {
            eprintln!(
                "mosaic: line {} abandoned by '{}': {}/{} cells written ({:.1}%)",
                self.line,
                self.indicator,
                count,
                total,
                (count as f64 / total as f64) * 100.0,
            );
        }
    }
}
