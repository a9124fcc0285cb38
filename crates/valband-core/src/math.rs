/// Above this magnitude every `f64` is already an integer.
const INTEGRAL_MAGNITUDE: f64 = 4_503_599_627_370_496.0;

/// Rounds half away from zero to a fixed number of decimal places.
///
/// Values too large to scale without overflowing are returned unchanged, so a finite
/// input always yields a finite output.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() || value.abs() >= INTEGRAL_MAGNITUDE {
        return value;
    }
    scaled.round() / factor
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
