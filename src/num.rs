//! Utilities related to numbers.

use ndarray::{Array2, ArrayView2};
use std::fmt;

/// Floating point marker trait for the precision of derived grid metrics.
pub trait GridFloat:
    Sync + Send + num::Float + num::cast::FromPrimitive + num::cast::ToPrimitive + fmt::Debug + 'static
{
    /// Name of the precision as used on the command line.
    const NAME: &'static str;

    /// Converts from double precision, rounding to the nearest representable value.
    fn from_f64_lossy(value: f64) -> Self;
}

impl GridFloat for f32 {
    const NAME: &'static str = "f32";

    fn from_f64_lossy(value: f64) -> Self {
        value as f32
    }
}

impl GridFloat for f64 {
    const NAME: &'static str = "f64";

    fn from_f64_lossy(value: f64) -> Self {
        value
    }
}

/// Narrows a double precision array to the given precision.
pub fn narrow<F: GridFloat>(values: ArrayView2<f64>) -> Array2<F> {
    values.mapv(F::from_f64_lossy)
}

/// Widens an array of the given precision to double precision.
pub fn widen<F: GridFloat>(values: ArrayView2<F>) -> Array2<f64> {
    values.mapv(|value| value.to_f64().unwrap_or(f64::NAN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn narrowing_rounds_to_single_precision() {
        let values = array![[0.1_f64, 1.0], [1e40, -2.5]];
        let narrowed = narrow::<f32>(values.view());
        assert_eq!(narrowed[[0, 0]], 0.1_f32);
        assert_eq!(narrowed[[0, 1]], 1.0_f32);
        assert!(narrowed[[1, 0]].is_infinite());
        assert_eq!(narrowed[[1, 1]], -2.5_f32);
    }

    #[test]
    fn widening_is_exact() {
        let values = array![[0.5_f32, -3.25]];
        assert_eq!(widen(values.view()), array![[0.5_f64, -3.25]]);
    }
}
