//! Log-linear trend and residual dispersion for a ratio series.
//!
//! The trend is an exponential curve obtained by fitting a straight line to
//! `ln(value)` against the point index. Dispersion is the sample standard
//! deviation of the log residuals, optionally recalibrated so that the band at
//! `peak_override_divisor` multiples passes through a known historical peak.

use serde::{Deserialize, Serialize};

use crate::domain::{validate_positive, PeakWindow, Series};
use crate::regression::{self, RegressionResult};
use crate::ValidationError;

/// Minimum value (percentage points) applied before taking the logarithm.
pub const DEFAULT_SAFE_FLOOR: f64 = 0.1;

/// Band multiple forced through the peak: dispersion becomes `target_diff / divisor`.
pub const DEFAULT_PEAK_OVERRIDE_DIVISOR: f64 = 2.0;

/// Calibration constants of the trend model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendConfig {
    pub safe_floor: f64,
    pub peak_override_divisor: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            safe_floor: DEFAULT_SAFE_FLOOR,
            peak_override_divisor: DEFAULT_PEAK_OVERRIDE_DIVISOR,
        }
    }
}

impl TrendConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_positive("safe_floor", self.safe_floor)?;
        validate_positive("peak_override_divisor", self.peak_override_divisor)?;
        Ok(())
    }
}

/// Where the calibration anchor was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeakSource {
    Window,
    GlobalMaximum,
}

/// Diagnostic record of the peak-anchored calibration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakAnchor {
    pub index: usize,
    pub date: String,
    pub value: f64,
    pub source: PeakSource,
    /// `ln(safe[index]) - trend_log[index]`.
    pub target_diff: f64,
    pub applied: bool,
}

/// Exponentiated trend curve plus log-space dispersion, aligned with the input series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendModel {
    pub trend_curve: Vec<f64>,
    /// Final log-space dispersion, after any peak override.
    pub dispersion: f64,
    /// Sample standard deviation of the log residuals.
    pub residual_dispersion: f64,
    pub regression: RegressionResult,
    pub peak: Option<PeakAnchor>,
}

impl TrendModel {
    pub fn len(&self) -> usize {
        self.trend_curve.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trend_curve.is_empty()
    }

    pub fn override_applied(&self) -> bool {
        self.peak.as_ref().is_some_and(|peak| peak.applied)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TrendEstimator {
    config: TrendConfig,
}

impl TrendEstimator {
    pub fn new(config: TrendConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    pub fn estimate(&self, series: &Series, window: &PeakWindow) -> TrendModel {
        let n = series.len();
        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let log_safe: Vec<f64> = series
            .points()
            .iter()
            .map(|point| self.safe_value(point.value).ln())
            .collect();

        let regression = regression::fit(&xs, &log_safe);
        let log_pred: Vec<f64> = xs.iter().map(|&x| regression.predict(x)).collect();
        let trend_curve = log_pred.iter().map(|value| value.exp()).collect();

        // Folded from +0.0: an empty `sum` of f64 is -0.0.
        let sum_squares = log_safe
            .iter()
            .zip(&log_pred)
            .fold(0.0_f64, |acc, (actual, predicted)| acc + (actual - predicted).powi(2));
        let residual_dispersion = (sum_squares / n.saturating_sub(1).max(1) as f64).sqrt();

        let mut dispersion = residual_dispersion;
        let peak = find_peak(series, window).map(|(index, source)| {
            let target_diff = log_safe[index] - log_pred[index];
            let candidate = target_diff / self.config.peak_override_divisor;
            let applied = target_diff.is_finite() && target_diff > 0.0 && candidate.is_finite();
            if applied {
                dispersion = candidate;
            }

            let point = &series.points()[index];
            tracing::debug!(
                index,
                date = %point.date,
                ?source,
                target_diff,
                applied,
                "peak anchor evaluated"
            );

            PeakAnchor {
                index,
                date: point.date.clone(),
                value: point.value,
                source,
                target_diff,
                applied,
            }
        });

        tracing::debug!(
            points = n,
            slope = regression.slope,
            intercept = regression.intercept,
            residual_dispersion,
            dispersion,
            "trend estimated"
        );

        TrendModel {
            trend_curve,
            dispersion,
            residual_dispersion,
            regression,
            peak,
        }
    }

    /// Clamps to the floor; non-finite values collapse onto the floor as well.
    fn safe_value(&self, value: f64) -> f64 {
        if value.is_finite() {
            value.max(self.config.safe_floor)
        } else {
            self.config.safe_floor
        }
    }
}

/// Index of the largest value dated inside `window`, else of the global maximum.
/// Ties resolve to the earliest point; NaN values never win.
fn find_peak(series: &Series, window: &PeakWindow) -> Option<(usize, PeakSource)> {
    let points = series.points();
    let in_window = argmax(
        points
            .iter()
            .enumerate()
            .filter(|(_, point)| window.contains_label(&point.date))
            .map(|(index, point)| (index, point.value)),
    );

    in_window
        .map(|index| (index, PeakSource::Window))
        .or_else(|| {
            argmax(points.iter().map(|point| point.value).enumerate())
                .map(|index| (index, PeakSource::GlobalMaximum))
        })
}

fn argmax(values: impl Iterator<Item = (usize, f64)>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, value) in values {
        if value.is_nan() {
            continue;
        }
        match best {
            Some((_, current)) if value <= current => {}
            _ => best = Some((index, value)),
        }
    }
    best.map(|(index, _)| index)
}
