//! Ordinary least-squares fit of a scalar series against its index.

use serde::{Deserialize, Serialize};

use crate::math::mean;

/// Slope and intercept of a fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    pub slope: f64,
    pub intercept: f64,
}

impl RegressionResult {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits `ys` against `xs` by ordinary least squares.
///
/// Empty input yields a zero line. When every `x` is equal (including a single
/// point) the slope is zero and the intercept is the mean of `ys`.
pub fn fit(xs: &[f64], ys: &[f64]) -> RegressionResult {
    debug_assert_eq!(xs.len(), ys.len(), "regression inputs must be aligned");
    let n = xs.len().min(ys.len());
    if n == 0 {
        return RegressionResult::default();
    }

    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mean_x = mean(xs);
    let mean_y = mean(ys);

    let (covariance, variance) = xs
        .iter()
        .zip(ys)
        .fold((0.0, 0.0), |(cov, var), (&x, &y)| {
            let dx = x - mean_x;
            (cov + dx * (y - mean_y), var + dx * dx)
        });

    if variance == 0.0 {
        return RegressionResult {
            slope: 0.0,
            intercept: mean_y,
        };
    }

    let slope = covariance / variance;
    RegressionResult {
        slope,
        intercept: mean_y - slope * mean_x,
    }
}
