//! Weighted samples and accumulators that merge subtotals.
//!
//! The sliding accumulators of this crate count every present cell once.
//! The accumulators here take a weight with every sample, and can add or
//! subtract the whole state of another accumulator of the same kind (a
//! subtotal), scaled by a factor. They serve two purposes:
//!
//! - distance-weighted windows, where each member of a
//!   [`DistanceKernel`](mosaic_window::DistanceKernel) contributes its weight;
//! - summaries over large regions, built by merging per-line subtotals.
//!
//! With every weight equal to 1 they agree with [`Count`](crate::Count),
//! [`Mean`](crate::Mean), [`MostCommonClass`](crate::MostCommonClass),
//! [`ShannonDiversity`](crate::ShannonDiversity) and
//! [`SimpsonDiversity`](crate::SimpsonDiversity) fed the same samples in
//! row-major order.
//!
//! Weights must be finite and non-negative. Sample counts are tracked next
//! to the weights, so over-subtraction is detected exactly and a state that
//! returns to empty drops its rounding residue.

use crate::accumulator::AccumulatorError;
use crate::sample::CellSample;
use indexmap::IndexMap;
use mosaic_core::{CellValue, ClassValue};
use std::marker::PhantomData;

/// One value with the weight it contributes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedSample<T> {
    /// Cell value; `None` if missing. Missing values contribute nothing.
    pub value: Option<T>,
    /// Contribution of the value.
    pub weight: f64,
}

impl<T> WeightedSample<T> {
    /// A sample of weight 1.
    pub fn unit(value: Option<T>) -> Self {
        Self { value, weight: 1.0 }
    }
}

impl<T> From<CellSample<T>> for WeightedSample<T> {
    fn from(sample: CellSample<T>) -> Self {
        Self::unit(sample.value)
    }
}

/// Incremental state over weighted samples.
///
/// # Contract
///
/// - `subtract_sample` is only valid for a value previously added, and
///   `subtract_subtotal` only for a subtotal previously added. Anything else
///   is an [`AccumulatorError::Precondition`] and leaves the state unchanged.
/// - `add_subtotal(s, w)` is equivalent to adding every sample of `s` with
///   its weight multiplied by `w`.
/// - `extract` never mutates. `None` means "no result".
pub trait WeightedAccumulator: Clone + Send {
    /// Value type of the samples.
    type Value;
    /// Result type.
    type Output;

    /// Name for errors and diagnostics.
    fn name(&self) -> &'static str;

    /// Add one weighted sample.
    fn add_sample(&mut self, sample: WeightedSample<Self::Value>);

    /// Take one previously added weighted sample out.
    fn subtract_sample(&mut self, sample: WeightedSample<Self::Value>) -> Result<(), AccumulatorError>;

    /// Add the state of `subtotal`, scaled by `weight`.
    fn add_subtotal(&mut self, subtotal: &Self, weight: f64);

    /// Take a previously added, equally scaled subtotal out.
    fn subtract_subtotal(&mut self, subtotal: &Self, weight: f64) -> Result<(), AccumulatorError>;

    /// The indicator value for the current state.
    fn extract(&self) -> Option<Self::Output>;
}

/// Take `n` samples off a sample count.
fn release(samples: usize, n: usize, indicator: &'static str) -> Result<usize, AccumulatorError> {
    samples
        .checked_sub(n)
        .ok_or(AccumulatorError::not_inserted(indicator))
}

// ── Count ───────────────────────────────────────────────────────────

/// Total weight of the non-missing samples.
#[derive(Clone, Debug)]
pub struct WeightedCount<T> {
    total: f64,
    samples: usize,
    _value: PhantomData<fn(T)>,
}

impl<T> Default for WeightedCount<T> {
    fn default() -> Self {
        Self {
            total: 0.0,
            samples: 0,
            _value: PhantomData,
        }
    }
}

impl<T: CellValue> WeightedCount<T> {
    /// An empty count.
    pub fn new() -> Self {
        Self::default()
    }

    fn settle(&mut self) {
        if self.samples == 0 {
            self.total = 0.0;
        }
    }
}

impl<T: CellValue> WeightedAccumulator for WeightedCount<T> {
    type Value = T;
    type Output = f64;

    fn name(&self) -> &'static str {
        "weighted_count"
    }

    fn add_sample(&mut self, sample: WeightedSample<T>) {
        if sample.value.is_some() {
            self.total += sample.weight;
            self.samples += 1;
        }
    }

    fn subtract_sample(&mut self, sample: WeightedSample<T>) -> Result<(), AccumulatorError> {
        if sample.value.is_none() {
            return Ok(());
        }
        self.samples = release(self.samples, 1, self.name())?;
        self.total -= sample.weight;
        self.settle();
        Ok(())
    }

    fn add_subtotal(&mut self, subtotal: &Self, weight: f64) {
        self.total += subtotal.total * weight;
        self.samples += subtotal.samples;
    }

    fn subtract_subtotal(&mut self, subtotal: &Self, weight: f64) -> Result<(), AccumulatorError> {
        self.samples = release(self.samples, subtotal.samples, self.name())?;
        self.total -= subtotal.total * weight;
        self.settle();
        Ok(())
    }

    fn extract(&self) -> Option<f64> {
        (self.samples > 0).then_some(self.total)
    }
}

// ── Mean ────────────────────────────────────────────────────────────

/// Weighted mean `Σ w·v / Σ w` of the non-missing samples.
#[derive(Clone, Debug)]
pub struct WeightedMean<T> {
    sum: f64,
    weight: f64,
    samples: usize,
    _value: PhantomData<fn(T)>,
}

impl<T> Default for WeightedMean<T> {
    fn default() -> Self {
        Self {
            sum: 0.0,
            weight: 0.0,
            samples: 0,
            _value: PhantomData,
        }
    }
}

impl<T: CellValue> WeightedMean<T> {
    /// An empty mean.
    pub fn new() -> Self {
        Self::default()
    }

    fn settle(&mut self) {
        if self.samples == 0 {
            self.sum = 0.0;
            self.weight = 0.0;
        }
    }
}

impl<T: CellValue> WeightedAccumulator for WeightedMean<T> {
    type Value = T;
    type Output = f64;

    fn name(&self) -> &'static str {
        "weighted_mean"
    }

    fn add_sample(&mut self, sample: WeightedSample<T>) {
        if let Some(v) = sample.value {
            self.sum += sample.weight * v.to_f64();
            self.weight += sample.weight;
            self.samples += 1;
        }
    }

    fn subtract_sample(&mut self, sample: WeightedSample<T>) -> Result<(), AccumulatorError> {
        let Some(v) = sample.value else {
            return Ok(());
        };
        self.samples = release(self.samples, 1, self.name())?;
        self.sum -= sample.weight * v.to_f64();
        self.weight -= sample.weight;
        self.settle();
        Ok(())
    }

    fn add_subtotal(&mut self, subtotal: &Self, weight: f64) {
        self.sum += subtotal.sum * weight;
        self.weight += subtotal.weight * weight;
        self.samples += subtotal.samples;
    }

    fn subtract_subtotal(&mut self, subtotal: &Self, weight: f64) -> Result<(), AccumulatorError> {
        self.samples = release(self.samples, subtotal.samples, self.name())?;
        self.sum -= subtotal.sum * weight;
        self.weight -= subtotal.weight * weight;
        self.settle();
        Ok(())
    }

    fn extract(&self) -> Option<f64> {
        (self.samples > 0 && self.weight > 0.0).then(|| self.sum / self.weight)
    }
}

// ── Class weights ───────────────────────────────────────────────────

/// Accumulated weight and sample count per class.
///
/// Classes keep the order in which they first arrived; a class whose sample
/// count drops to zero is removed without disturbing the others.
#[derive(Clone, Debug)]
pub struct WeightedTable<T> {
    classes: IndexMap<T, (f64, usize)>,
    total: f64,
    samples: usize,
}

impl<T> Default for WeightedTable<T> {
    fn default() -> Self {
        Self {
            classes: IndexMap::new(),
            total: 0.0,
            samples: 0,
        }
    }
}

impl<T: ClassValue> WeightedTable<T> {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `samples` occurrences of `value` carrying `weight` in total.
    pub fn add(&mut self, value: T, weight: f64, samples: usize) {
        if samples == 0 {
            return;
        }
        let entry = self.classes.entry(value).or_insert((0.0, 0));
        entry.0 += weight;
        entry.1 += samples;
        self.total += weight;
        self.samples += samples;
    }

    /// Returns `true` if `samples` occurrences of `value` can be subtracted.
    pub fn holds(&self, value: &T, samples: usize) -> bool {
        self.classes.get(value).is_some_and(|&(_, n)| n >= samples)
    }

    /// Subtract `samples` occurrences of `value` carrying `weight`. Returns
    /// `false`, changing nothing, if fewer occurrences are held.
    pub fn subtract(&mut self, value: T, weight: f64, samples: usize) -> bool {
        if !self.holds(&value, samples) {
            return false;
        }
        if let Some(entry) = self.classes.get_mut(&value) {
            entry.0 -= weight;
            entry.1 -= samples;
            if entry.1 == 0 {
                self.classes.shift_remove(&value);
            }
        }
        self.total -= weight;
        self.samples -= samples;
        if self.samples == 0 {
            self.total = 0.0;
        }
        true
    }

    /// Total weight over all classes.
    pub fn total(&self) -> f64 {
        self.total
    }

    /// Number of distinct classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns `true` if no class is present.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// `(class, weight, samples)` in order of first arrival.
    pub fn iter(&self) -> impl Iterator<Item = (T, f64, usize)> + '_ {
        self.classes.iter().map(|(&v, &(w, n))| (v, w, n))
    }

    /// Class proportions `weight / total`, skipping zero-weight classes.
    pub fn proportions(&self) -> impl Iterator<Item = f64> + '_ {
        let total = self.total;
        self.classes
            .values()
            .filter(|&&(w, _)| w > 0.0)
            .map(move |&(w, _)| w / total)
    }

    fn add_table(&mut self, other: &Self, weight: f64) {
        for (v, w, n) in other.iter() {
            self.add(v, w * weight, n);
        }
    }

    fn subtract_table(&mut self, other: &Self, weight: f64, indicator: &'static str) -> Result<(), AccumulatorError> {
        if !other.iter().all(|(v, _, n)| self.holds(&v, n)) {
            return Err(AccumulatorError::not_inserted(indicator));
        }
        for (v, w, n) in other.iter() {
            self.subtract(v, w * weight, n);
        }
        Ok(())
    }
}

// ── Most common class ───────────────────────────────────────────────

/// The class with the largest total weight.
///
/// Exact ties go to the class that arrived first, which for a window filled
/// in row-major order is the first tied class in a row-major scan.
#[derive(Clone, Debug)]
pub struct WeightedMode<T> {
    table: WeightedTable<T>,
}

impl<T> Default for WeightedMode<T> {
    fn default() -> Self {
        Self {
            table: WeightedTable::default(),
        }
    }
}

impl<T: ClassValue> WeightedMode<T> {
    /// An empty mode.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: ClassValue> WeightedAccumulator for WeightedMode<T> {
    type Value = T;
    type Output = T;

    fn name(&self) -> &'static str {
        "weighted_most_common_class"
    }

    fn add_sample(&mut self, sample: WeightedSample<T>) {
        if let Some(v) = sample.value {
            self.table.add(v, sample.weight, 1);
        }
    }

    fn subtract_sample(&mut self, sample: WeightedSample<T>) -> Result<(), AccumulatorError> {
        match sample.value {
            Some(v) if !self.table.subtract(v, sample.weight, 1) => {
                Err(AccumulatorError::not_inserted(self.name()))
            }
            _ => Ok(()),
        }
    }

    fn add_subtotal(&mut self, subtotal: &Self, weight: f64) {
        self.table.add_table(&subtotal.table, weight);
    }

    fn subtract_subtotal(&mut self, subtotal: &Self, weight: f64) -> Result<(), AccumulatorError> {
        self.table.subtract_table(&subtotal.table, weight, self.name())
    }

    fn extract(&self) -> Option<T> {
        let mut best: Option<(T, f64)> = None;
        for (v, w, _) in self.table.iter() {
            if best.is_none_or(|(_, top)| w > top) {
                best = Some((v, w));
            }
        }
        best.map(|(v, _)| v)
    }
}

// ── Diversity ───────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Index {
    Shannon,
    Simpson,
}

/// Shannon or Gini-Simpson diversity of weighted class proportions.
#[derive(Clone, Debug)]
pub struct WeightedDiversity<T> {
    index: Index,
    table: WeightedTable<T>,
}

impl<T: ClassValue> WeightedDiversity<T> {
    /// Shannon entropy `−Σ pᵢ ln pᵢ` with `pᵢ` the share of total weight.
    pub fn shannon() -> Self {
        Self {
            index: Index::Shannon,
            table: WeightedTable::new(),
        }
    }

    /// Gini-Simpson index `1 − Σ pᵢ²` with `pᵢ` the share of total weight.
    pub fn simpson() -> Self {
        Self {
            index: Index::Simpson,
            table: WeightedTable::new(),
        }
    }
}

impl<T: ClassValue> WeightedAccumulator for WeightedDiversity<T> {
    type Value = T;
    type Output = f64;

    fn name(&self) -> &'static str {
        match self.index {
            Index::Shannon => "weighted_shannon_diversity",
            Index::Simpson => "weighted_simpson_diversity",
        }
    }

    fn add_sample(&mut self, sample: WeightedSample<T>) {
        if let Some(v) = sample.value {
            self.table.add(v, sample.weight, 1);
        }
    }

    fn subtract_sample(&mut self, sample: WeightedSample<T>) -> Result<(), AccumulatorError> {
        match sample.value {
            Some(v) if !self.table.subtract(v, sample.weight, 1) => {
                Err(AccumulatorError::not_inserted(self.name()))
            }
            _ => Ok(()),
        }
    }

    fn add_subtotal(&mut self, subtotal: &Self, weight: f64) {
        self.table.add_table(&subtotal.table, weight);
    }

    fn subtract_subtotal(&mut self, subtotal: &Self, weight: f64) -> Result<(), AccumulatorError> {
        self.table.subtract_table(&subtotal.table, weight, self.name())
    }

    fn extract(&self) -> Option<f64> {
        if self.table.is_empty() || self.table.total() <= 0.0 {
            return None;
        }
        let value = match self.index {
            Index::Shannon => -self.table.proportions().map(|p| p * p.ln()).sum::<f64>(),
            Index::Simpson => 1.0 - self.table.proportions().map(|p| p * p).sum::<f64>(),
        };
        Some(value.max(0.0))
    }
}
