//! Signed-multiple dispersion bands around a trend curve.

use serde::{Deserialize, Serialize};

use crate::math::round_to;
use crate::TrendModel;

/// Multiples displayed when none are configured.
pub const DEFAULT_MULTIPLES: [f64; 4] = [-2.0, -1.0, 1.0, 2.0];

/// Decimal places kept on displayed curve values.
pub const DISPLAY_DECIMALS: i32 = 2;

/// Trend curve scaled by `exp(multiple * dispersion)` at every index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub multiple: f64,
    pub curve: Vec<f64>,
}

impl Band {
    /// Short label such as `+2σ` or `-1.5σ`.
    pub fn label(&self) -> String {
        format!("{:+}σ", self.multiple)
    }
}

/// Builds one band per multiple. Rounding happens after the exponential.
pub fn build(model: &TrendModel, multiples: &[f64]) -> Vec<Band> {
    multiples
        .iter()
        .map(|&multiple| {
            let scale = (multiple * model.dispersion).exp();
            Band {
                multiple,
                curve: model
                    .trend_curve
                    .iter()
                    .map(|trend| round_to(trend * scale, DISPLAY_DECIMALS))
                    .collect(),
            }
        })
        .collect()
}
