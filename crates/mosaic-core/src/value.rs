//! Element types accepted by the engine.

use std::fmt::Debug;
use std::hash::Hash;

/// A raster element the engine can sample.
///
/// Missing-ness is never encoded in the value itself: cells are carried as
/// `Option<T>` throughout the engine. `to_f64` is used by the continuous
/// indicators (mean) and by the runtime `compute` path to widen outputs.
pub trait CellValue: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// Widen to `f64` for arithmetic accumulation.
    ///
    /// Exact for every value of the 8, 16 and 32-bit integer types and for
    /// `f32`. A 64-bit integer (or `isize`/`usize`) whose magnitude exceeds
    /// 2^53 rounds to the nearest representable `f64`, so distinct codes
    /// above that bound can widen to the same number. Indicators that work
    /// on class codes keep them in their native type; only means and the
    /// `f64` outputs of the runtime `compute` path see the rounded value.
    fn to_f64(self) -> f64;
}

/// A categorical raster element: hashable, totally ordered class codes.
///
/// Required by frequency-table, edge, and patch indicators. Floating point
/// types are deliberately excluded.
pub trait ClassValue: CellValue + Eq + Hash + Ord {}

macro_rules! impl_class_value {
    ($($t:ty),* $(,)?) => {
        $(
            impl CellValue for $t {
                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }

            impl ClassValue for $t {}
        )*
    };
}

impl_class_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl CellValue for f32 {
    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }
}

impl CellValue for f64 {
    #[inline]
    fn to_f64(self) -> f64 {
        self
    }
}
