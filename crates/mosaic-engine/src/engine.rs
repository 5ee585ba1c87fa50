//! The [`Engine`]: validates, schedules, and writes a computation.

use crate::config::{ConfigError, EngineConfig};
use crate::error::ComputeError;
use crate::gather::Gather;
use crate::metrics::TraversalMetrics;
use crate::query::{IndicatorKind, WeightedKind, WindowQuery};
use crate::schedule;
use crate::traversal::{run_line, LineOutput};
use crate::weighted::{run_weighted_line, summarize_line};
use mosaic_core::{CellValue, ClassValue, Extent, GridError, GridSink, GridSource, Raster};
use mosaic_indicator::{
    AreaWeightedPatchSize, Count, EdgeDensity, Indicator, Interspersion, Mean, MostCommonClass,
    PatchDensity, PatchWeightedShapeIndex, ShannonDiversity, SimpsonDiversity,
    WeightedAccumulator, WeightedCount, WeightedDiversity, WeightedMean, WeightedMode,
};
use mosaic_window::{DistanceKernel, EdgeFootprint, Footprint};
use std::sync::Arc;
use std::time::Instant;

/// Runs moving-window computations and keeps the metrics of the last one.
///
/// # Examples
///
/// ```
/// use mosaic_core::Raster;
/// use mosaic_engine::{Engine, EngineConfig, IndicatorKind, WindowQuery};
/// use mosaic_window::WindowShape;
///
/// let source = Raster::from_values(3, 3, vec![1u8, 1, 2, 1, 2, 2, 3, 3, 3]).unwrap();
/// let mut sink = Raster::empty(3, 3);
/// let mut engine = Engine::new(EngineConfig::default()).unwrap();
///
/// let query = WindowQuery::new(IndicatorKind::Count, WindowShape::Square, 1.0);
/// engine.compute(&query, &source, &mut sink).unwrap();
/// assert_eq!(sink.cell(1, 1), Some(9.0));
/// assert_eq!(sink.cell(0, 0), Some(4.0));
/// assert_eq!(engine.last_metrics().cells, 9);
/// ```
#[derive(Debug, Default)]
pub struct Engine {
    config: EngineConfig,
    last_metrics: TraversalMetrics,
}

impl Engine {
    /// Create an engine after validating `config`.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            last_metrics: TraversalMetrics::default(),
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Metrics of the most recent successful computation.
    pub fn last_metrics(&self) -> &TraversalMetrics {
        &self.last_metrics
    }

    /// Compute `indicator` over every cell of `source` into `sink`, keeping
    /// the indicator's own output type.
    ///
    /// Each sink cell is written exactly once, in row-major line order. On
    /// error the sink holds every line before the failing one and nothing
    /// after it.
    pub fn run<T, I, S, K>(&mut self, indicator: &I, source: &S, sink: &mut K) -> Result<(), ComputeError>
    where
        T: CellValue,
        I: Indicator<T>,
        I::Window: Gather<T, Sample = I::Sample>,
        S: GridSource<T> + Sync,
        K: GridSink<I::Output>,
    {
        check_extents(source.extent(), sink.extent())?;
        let start = Instant::now();
        let mut metrics = TraversalMetrics::default();
        let workers = self.config.resolved_worker_count();

        let rows = source.extent().rows;
        let line = |row| run_line::<T, I, S>(indicator, source, row);
        let used = schedule::traverse(rows, workers, line, |line| {
            write_line(&mut *sink, &mut metrics, line)
        })?;

        metrics.workers = used;
        metrics.total_us = start.elapsed().as_micros() as u64;
        self.last_metrics = metrics;
        Ok(())
    }

    /// Compute the indicator named by `query` over a categorical raster.
    ///
    /// Parameters are validated before any cell is read. Results are widened
    /// to `f64`; the modal class is written as its numeric code, which is
    /// rounded for 64-bit codes beyond 2^53 (see [`CellValue::to_f64`]). Use
    /// [`run`](Self::run) to keep such codes exact.
    pub fn compute<T, S, K>(&mut self, query: &WindowQuery, source: &S, sink: &mut K) -> Result<(), ComputeError>
    where
        T: ClassValue,
        S: GridSource<T> + Sync,
        K: GridSink<f64>,
    {
        query.validate()?;
        check_extents(source.extent(), sink.extent())?;
        let mut sink = WidenSink(sink);
        let contiguity = query.resolved_contiguity();
        match query.indicator {
            IndicatorKind::Count => self.run::<T, _, _, _>(&Count::new(cells(query)?)?, source, &mut sink),
            IndicatorKind::Mean => self.run::<T, _, _, _>(&Mean::new(cells(query)?)?, source, &mut sink),
            IndicatorKind::MostCommonClass => {
                self.run::<T, _, _, _>(&MostCommonClass::new(cells(query)?)?, source, &mut sink)
            }
            IndicatorKind::ShannonDiversity => {
                self.run::<T, _, _, _>(&ShannonDiversity::new(cells(query)?)?, source, &mut sink)
            }
            IndicatorKind::SimpsonDiversity => {
                self.run::<T, _, _, _>(&SimpsonDiversity::new(cells(query)?)?, source, &mut sink)
            }
            IndicatorKind::EdgeDensity => {
                self.run::<T, _, _, _>(&EdgeDensity::new(edges(query)?)?, source, &mut sink)
            }
            IndicatorKind::Interspersion => {
                self.run::<T, _, _, _>(&Interspersion::new(edges(query)?)?, source, &mut sink)
            }
            IndicatorKind::AreaWeightedPatchSize => self.run::<T, _, _, _>(
                &AreaWeightedPatchSize::new(cells(query)?, contiguity)?,
                source,
                &mut sink,
            ),
            IndicatorKind::PatchWeightedShapeIndex => self.run::<T, _, _, _>(
                &PatchWeightedShapeIndex::new(cells(query)?, contiguity)?,
                source,
                &mut sink,
            ),
            IndicatorKind::PatchDensity => self.run::<T, _, _, _>(
                &PatchDensity::new(cells(query)?, contiguity)?,
                source,
                &mut sink,
            ),
        }
    }

    /// Compute [`Count`] or [`Mean`] over a raster of any cell type,
    /// including floating point.
    ///
    /// Every other indicator needs class values and is rejected with
    /// [`ComputeError::UnsupportedValueType`].
    pub fn compute_continuous<T, S, K>(
        &mut self,
        query: &WindowQuery,
        source: &S,
        sink: &mut K,
    ) -> Result<(), ComputeError>
    where
        T: CellValue,
        S: GridSource<T> + Sync,
        K: GridSink<f64>,
    {
        query.validate()?;
        check_extents(source.extent(), sink.extent())?;
        let mut sink = WidenSink(sink);
        match query.indicator {
            IndicatorKind::Count => self.run::<T, _, _, _>(&Count::new(cells(query)?)?, source, &mut sink),
            IndicatorKind::Mean => self.run::<T, _, _, _>(&Mean::new(cells(query)?)?, source, &mut sink),
            indicator => Err(ComputeError::UnsupportedValueType { indicator }),
        }
    }

    /// Evaluate a weighted accumulator over `kernel` at every cell of
    /// `source`, keeping the accumulator's own output type.
    ///
    /// `empty` is cloned for every focal cell. Write order, failure
    /// behaviour and metrics follow [`run`](Self::run); `inserts` counts the
    /// weighted samples added and `removes` stays zero.
    pub fn run_weighted<W, S, K>(
        &mut self,
        kernel: &DistanceKernel,
        empty: &W,
        source: &S,
        sink: &mut K,
    ) -> Result<(), ComputeError>
    where
        W: WeightedAccumulator + Sync,
        W::Value: CellValue,
        W::Output: CellValue,
        S: GridSource<W::Value> + Sync,
        K: GridSink<W::Output>,
    {
        check_extents(source.extent(), sink.extent())?;
        let start = Instant::now();
        let mut metrics = TraversalMetrics::default();
        let workers = self.config.resolved_worker_count();

        let rows = source.extent().rows;
        let line = |row| run_weighted_line(kernel, empty, source, row);
        let used = schedule::traverse(rows, workers, line, |line| {
            write_line(&mut *sink, &mut metrics, line)
        })?;

        metrics.workers = used;
        metrics.total_us = start.elapsed().as_micros() as u64;
        self.last_metrics = metrics;
        Ok(())
    }

    /// Compute a distance-weighted indicator over a categorical raster.
    ///
    /// Results are widened to `f64`; the modal class is written as its
    /// numeric code. With [`DistanceKernel::uniform`] the output equals
    /// [`compute`](Self::compute) over a circle of the same radius.
    ///
    /// ```
    /// use mosaic_core::Raster;
    /// use mosaic_engine::{Engine, WeightedKind};
    /// use mosaic_window::DistanceKernel;
    ///
    /// let source = Raster::from_values(1, 3, vec![2u8, 4, 8]).unwrap();
    /// let mut sink = Raster::empty(1, 3);
    /// // The focal cell counts twice as much as its neighbours.
    /// let kernel = DistanceKernel::generate(1.0, |d| if d == 0.0 { 2.0 } else { 1.0 }).unwrap();
    /// Engine::default()
    ///     .compute_weighted(WeightedKind::Mean, &kernel, &source, &mut sink)
    ///     .unwrap();
    /// assert_eq!(sink.cell(0, 1), Some(4.5));
    /// ```
    pub fn compute_weighted<T, S, K>(
        &mut self,
        kind: WeightedKind,
        kernel: &DistanceKernel,
        source: &S,
        sink: &mut K,
    ) -> Result<(), ComputeError>
    where
        T: ClassValue,
        S: GridSource<T> + Sync,
        K: GridSink<f64>,
    {
        check_extents(source.extent(), sink.extent())?;
        let mut sink = WidenSink(sink);
        match kind {
            WeightedKind::Count => {
                self.run_weighted(kernel, &WeightedCount::<T>::new(), source, &mut sink)
            }
            WeightedKind::Mean => self.run_weighted(kernel, &WeightedMean::<T>::new(), source, &mut sink),
            WeightedKind::MostCommonClass => {
                self.run_weighted(kernel, &WeightedMode::<T>::new(), source, &mut sink)
            }
            WeightedKind::ShannonDiversity => {
                self.run_weighted(kernel, &WeightedDiversity::<T>::shannon(), source, &mut sink)
            }
            WeightedKind::SimpsonDiversity => {
                self.run_weighted(kernel, &WeightedDiversity::<T>::simpson(), source, &mut sink)
            }
        }
    }

    /// Evaluate a weighted accumulator over the whole of `source`, every
    /// cell weighted 1.
    ///
    /// Each line builds its own subtotal; the subtotals are merged in row
    /// order on the calling thread. `metrics.inserts` counts cells read.
    ///
    /// ```
    /// use mosaic_core::Raster;
    /// use mosaic_engine::Engine;
    /// use mosaic_indicator::WeightedMode;
    ///
    /// let source = Raster::from_values(2, 2, vec![3u8, 1, 1, 1]).unwrap();
    /// let mode = Engine::default().summarize(&WeightedMode::new(), &source).unwrap();
    /// assert_eq!(mode, Some(1));
    /// ```
    pub fn summarize<W, S>(&mut self, empty: &W, source: &S) -> Result<Option<W::Output>, ComputeError>
    where
        W: WeightedAccumulator + Sync,
        S: GridSource<W::Value> + Sync,
    {
        let start = Instant::now();
        let extent = source.extent();
        let mut metrics = TraversalMetrics::default();
        let workers = self.config.resolved_worker_count();

        let mut total = empty.clone();
        let line = |row| summarize_line(empty, source, row);
        let used = schedule::traverse(extent.rows, workers, line, |subtotal: W| {
            total.add_subtotal(&subtotal, 1.0);
            metrics.lines += 1;
            metrics.cells += extent.cols;
            metrics.inserts += extent.cols as u64;
            Ok(())
        })?;

        metrics.workers = used;
        metrics.total_us = start.elapsed().as_micros() as u64;
        self.last_metrics = metrics;
        Ok(total.extract())
    }
}

/// Compute `query` over `source` with a default engine, returning a fresh
/// `f64` raster of the same extent.
///
/// ```
/// use mosaic_core::Raster;
/// use mosaic_engine::{compute, IndicatorKind, WindowQuery};
/// use mosaic_window::WindowShape;
///
/// let source = Raster::filled(4, 4, 7u16);
/// let q = WindowQuery::new(IndicatorKind::ShannonDiversity, WindowShape::Circle, 1.5);
/// let out = compute(&q, &source).unwrap();
/// assert!(out.iter().all(|(_, _, v)| v == Some(0.0)));
/// ```
pub fn compute<T, S>(query: &WindowQuery, source: &S) -> Result<Raster<f64>, ComputeError>
where
    T: ClassValue,
    S: GridSource<T> + Sync,
{
    let extent = source.extent();
    let mut sink = Raster::empty(extent.rows, extent.cols);
    Engine::default().compute(query, source, &mut sink)?;
    Ok(sink)
}

fn check_extents(source: Extent, sink: Extent) -> Result<(), ComputeError> {
    if source != sink {
        return Err(ComputeError::ExtentMismatch { source, sink });
    }
    Ok(())
}

/// Write one finished line to `sink` and add its work to `metrics`.
fn write_line<R, K: GridSink<R>>(
    sink: &mut K,
    metrics: &mut TraversalMetrics,
    line: LineOutput<R>,
) -> Result<(), ComputeError> {
    let LineOutput { row, cells, stats } = line;
    metrics.cells += cells.len();
    for (col, value) in cells.into_iter().enumerate() {
        sink.set(row, col, value)
            .map_err(|source| ComputeError::Grid { line: row, source })?;
    }
    metrics.lines += 1;
    metrics.inserts += stats.inserts;
    metrics.removes += stats.removes;
    metrics.no_result_cells += stats.no_result;
    Ok(())
}

fn cells(query: &WindowQuery) -> Result<Arc<Footprint>, ComputeError> {
    Ok(Arc::new(Footprint::generate(query.shape, query.radius)?))
}

fn edges(query: &WindowQuery) -> Result<Arc<EdgeFootprint>, ComputeError> {
    Ok(Arc::new(EdgeFootprint::generate(query.shape, query.radius)?))
}

/// Writes any indicator output into an `f64` sink.
struct WidenSink<'a, K>(&'a mut K);

impl<R: CellValue, K: GridSink<f64>> GridSink<R> for WidenSink<'_, K> {
    fn extent(&self) -> Extent {
        self.0.extent()
    }

    fn set(&mut self, row: usize, col: usize, value: Option<R>) -> Result<(), GridError> {
        self.0.set(row, col, value.map(CellValue::to_f64))
    }
}
