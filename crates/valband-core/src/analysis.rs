//! One refresh of the analytical pipeline: trend, bands, chart payload.

use serde::{Deserialize, Serialize};

use crate::{bands, AnalysisConfig, Band, ChartPayload, ChartStyle, Series, TrendEstimator};
use crate::{TrendModel, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub model: TrendModel,
    pub bands: Vec<Band>,
    pub payload: ChartPayload,
}

/// Runs the estimator and band builder over `series` and assembles the chart payload.
///
/// Only configuration problems are errors; degenerate series produce empty or flat curves.
pub fn analyze(
    series: &Series,
    config: &AnalysisConfig,
    style: &ChartStyle,
) -> Result<Analysis, ValidationError> {
    config.validate()?;
    let estimator = TrendEstimator::new(config.trend)?;

    let model = estimator.estimate(series, &config.peak_window);
    let bands = bands::build(&model, &config.multiples);
    let payload = ChartPayload::assemble(series, &model, &bands, style);

    tracing::info!(
        points = series.len(),
        bands = bands.len(),
        dispersion = model.dispersion,
        peak_override = model.override_applied(),
        "analysis complete"
    );

    Ok(Analysis {
        model,
        bands,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeriesPoint;

    #[test]
    fn produces_one_curve_per_band_plus_raw_and_trend() {
        let series = Series::new(vec![
            SeriesPoint::new("1999-06-01", 120.0),
            SeriesPoint::new("2000-03-01", 150.0),
            SeriesPoint::new("2001-06-01", 90.0),
            SeriesPoint::new("2002-06-01", 70.0),
        ]);

        let analysis = analyze(&series, &AnalysisConfig::default(), &ChartStyle::default())
            .expect("valid config");

        assert_eq!(analysis.bands.len(), 4);
        assert_eq!(analysis.payload.curves.len(), 6);
        assert!(analysis.model.override_applied());
        let plus_two = analysis.payload.curve("band+2").expect("+2 band");
        assert!((plus_two.values[1] - 150.0).abs() <= 0.01);
    }

    #[test]
    fn rejects_invalid_configuration() {
        let config = AnalysisConfig {
            multiples: vec![f64::INFINITY],
            ..AnalysisConfig::default()
        };
        let err = analyze(&Series::default(), &config, &ChartStyle::default())
            .expect_err("must fail");
        assert_eq!(err, ValidationError::NonFiniteMultiple { index: 0 });
    }
}
