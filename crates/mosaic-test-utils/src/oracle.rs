//! Brute-force reference computations.
//!
//! Every focal cell gets a fresh accumulator filled with the whole window,
//! so these results never depend on the slide delta. The engine must match
//! them exactly for integer outputs and within rounding for reals.

use mosaic_core::{CellValue, GridPos, GridSource, Raster};
use mosaic_indicator::{Accumulator, CellSample, EdgeSample, Indicator};
use mosaic_window::{EdgeFootprint, Footprint};

/// Recompute a cell-window indicator at every cell.
pub fn brute_force_cells<T, I, S>(indicator: &I, source: &S) -> Raster<I::Output>
where
    T: CellValue,
    I: Indicator<T, Window = Footprint, Sample = CellSample<T>>,
    S: GridSource<T>,
{
    let extent = source.extent();
    Raster::from_fn(extent.rows, extent.cols, |row, col| {
        let focal = GridPos::at(row, col);
        let mut acc = indicator.accumulator();
        for m in indicator.window().members() {
            let pos = focal + m;
            if let Some((r, c)) = extent.locate(pos) {
                let value = source.get(r, c).expect("oracle source read");
                acc.insert(CellSample { pos, value });
            }
        }
        acc.extract(focal)
    })
}

/// Recompute an edge-window indicator at every cell.
pub fn brute_force_edges<T, I, S>(indicator: &I, source: &S) -> Raster<I::Output>
where
    T: CellValue,
    I: Indicator<T, Window = EdgeFootprint, Sample = EdgeSample<T>>,
    S: GridSource<T>,
{
    let extent = source.extent();
    Raster::from_fn(extent.rows, extent.cols, |row, col| {
        let focal = GridPos::at(row, col);
        let mut acc = indicator.accumulator();
        for pair in indicator.window().members() {
            if let (Some((ar, ac)), Some((br, bc))) =
                (extent.locate(focal + pair.a), extent.locate(focal + pair.b))
            {
                let a = source.get(ar, ac).expect("oracle source read");
                let b = source.get(br, bc).expect("oracle source read");
                acc.insert(EdgeSample { a, b });
            }
        }
        acc.extract(focal)
    })
}
