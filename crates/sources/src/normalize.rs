//! Min-max score normalization.

use crate::ScoreVector;
use ndarray::Array1;

/// Relative tolerance for treating the minimum and maximum as equal
const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Rescale `values` linearly so the minimum maps to 0 and the maximum to 1.
///
/// - empty input is returned unchanged
/// - if every value is (numerically) the same, the result is all zeros:
///   a flat signal carries no ranking information
pub fn min_max_scale(values: &ScoreVector) -> ScoreVector {
    if values.is_empty() {
        return values.clone();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if is_close(min, max) {
        return Array1::zeros(values.len());
    }

    let range = max - min;
    values.mapv(|v| (v - min) / range)
}

fn is_close(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= RELATIVE_TOLERANCE * a.abs().max(b.abs())
}
