//! Behavior tests for the numerical guarantees of the trend and band pipeline.

use valband_core::regression;
use valband_tests::*;

// =============================================================================
// Regression
// =============================================================================

#[test]
fn regression_recovers_exact_linear_parameters() {
    // Given: points lying exactly on y = 3x + 5
    let xs: Vec<f64> = (0..20).map(f64::from).collect();
    let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x + 5.0).collect();

    // When: the line is fitted
    let fit = regression::fit(&xs, &ys);

    // Then: slope and intercept are recovered
    assert!(approx_eq(fit.slope, 3.0, 1e-9), "slope was {}", fit.slope);
    assert!(approx_eq(fit.intercept, 5.0, 1e-9), "intercept was {}", fit.intercept);
}

#[test]
fn exponential_series_has_log_linear_trend() {
    // Given: a series growing 5% per step
    let points: Vec<(String, f64)> = (0..12)
        .map(|i| (format!("2010-{:02}-01", i + 1), 100.0 * 1.05_f64.powi(i)))
        .collect();
    let series: Series = points.into_iter().collect();

    // When: the trend is estimated
    let model = TrendEstimator::default().estimate(&series, &PeakWindow::default());

    // Then: the trend reproduces the series and the residual dispersion vanishes
    assert!(approx_eq(model.regression.slope, 1.05_f64.ln(), 1e-12));
    for (trend, actual) in model.trend_curve.iter().zip(series.values()) {
        assert!(approx_eq(*trend, actual, 1e-9));
    }
    assert!(model.residual_dispersion < 1e-9);
}

// =============================================================================
// Bands
// =============================================================================

#[test]
fn opposite_bands_are_reciprocal_around_the_trend() {
    // Given: a noisy history and symmetric multiples
    let series = bubble_series();
    let model = TrendEstimator::default().estimate(&series, &PeakWindow::default());

    // When: bands at -1 and +1 are built
    let built = bands::build(&model, &[-1.0, 1.0]);

    // Then: lower * upper equals trend squared at every index, up to display rounding
    for (index, trend) in model.trend_curve.iter().enumerate() {
        let product = built[0].curve[index] * built[1].curve[index];
        let expected = trend * trend;
        assert!(
            approx_eq(product, expected, expected * 1e-3),
            "index {index}: {product} vs {expected}"
        );
    }
}

#[test]
fn positive_multiples_sit_above_the_trend() {
    let series = bubble_series();
    let model = TrendEstimator::default().estimate(&series, &PeakWindow::default());
    let built = bands::build(&model, &[-2.0, 2.0]);

    for (index, trend) in model.trend_curve.iter().enumerate() {
        assert!(built[0].curve[index] < *trend);
        assert!(built[1].curve[index] > *trend);
    }
}

// =============================================================================
// Peak-anchored calibration
// =============================================================================

#[test]
fn upper_two_sigma_band_passes_through_window_peak() {
    // Given: a history whose year-2000 peak sits above its log trend
    let series = bubble_series();
    let window = PeakWindow::parse("2000-01-01", "2000-12-31").expect("valid window");

    // When: the trend and the +2σ band are computed
    let model = TrendEstimator::default().estimate(&series, &window);
    let upper = &bands::build(&model, &[2.0])[0];

    // Then: the override is applied and the band meets the peak value
    let peak = model.peak.as_ref().expect("peak located");
    assert_eq!(peak.source, PeakSource::Window);
    assert_eq!(peak.date, "2000-03-01");
    assert!(peak.applied);
    assert!(approx_eq(upper.curve[peak.index], 160.0, 0.01));
    assert!(approx_eq(model.dispersion, peak.target_diff / 2.0, 1e-12));
}

#[test]
fn divisor_is_a_calibration_parameter() {
    // Given: a divisor of 1 instead of 2
    let estimator = TrendEstimator::new(TrendConfig {
        peak_override_divisor: 1.0,
        ..TrendConfig::default()
    })
    .expect("valid config");

    // When: the trend is estimated
    let model = estimator.estimate(&bubble_series(), &PeakWindow::default());

    // Then: the +1σ band now passes through the peak
    let peak = model.peak.as_ref().expect("peak located");
    let upper = &bands::build(&model, &[1.0])[0];
    assert!(approx_eq(upper.curve[peak.index], 160.0, 0.01));
}

#[test]
fn peak_below_trend_keeps_residual_dispersion() {
    // Given: a window containing only a trough
    let series = bubble_series();
    let window = PeakWindow::parse("2002-01-01", "2002-12-31").expect("valid window");

    // When: the trend is estimated
    let model = TrendEstimator::default().estimate(&series, &window);

    // Then: the negative target leaves the residual dispersion in place
    let peak = model.peak.as_ref().expect("peak located");
    assert!(peak.target_diff < 0.0);
    assert!(!peak.applied);
    assert_eq!(model.dispersion, model.residual_dispersion);
}

// =============================================================================
// End to end
// =============================================================================

#[test]
fn doubling_series_outside_window_yields_increasing_trend() {
    // Given: three doubling points, none inside the default peak window
    let series = series(&[
        ("2020-01-01", 1.0),
        ("2020-02-01", 2.0),
        ("2020-03-01", 4.0),
    ]);

    // When: the full analysis runs
    let analysis = analyze(&series, &AnalysisConfig::default(), &ChartStyle::default())
        .expect("default config is valid");

    // Then: the trend is the exact log-linear fit and increases monotonically
    let trend = &analysis.model.trend_curve;
    assert!(approx_eq(trend[0], 1.0, 1e-9));
    assert!(approx_eq(trend[1], 2.0, 1e-9));
    assert!(approx_eq(trend[2], 4.0, 1e-9));
    assert!(trend.windows(2).all(|pair| pair[0] < pair[1]));

    // And: dispersion comes from the (zero) residuals; the fallback peak changes nothing
    let peak = analysis.model.peak.as_ref().expect("global maximum used");
    assert_eq!(peak.source, PeakSource::GlobalMaximum);
    assert_eq!(peak.index, 2);
    assert!(analysis.model.dispersion < 1e-9);
    assert_eq!(analysis.payload.curves.len(), 6);
}
