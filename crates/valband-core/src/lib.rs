//! # Valband Core
//!
//! Analytical core for charting a market valuation ratio against its long-run
//! trend and dispersion bands.
//!
//! ## Overview
//!
//! - **Domain records** for the ratio series, latest snapshot and peak window
//! - **Log-linear trend** fitted by ordinary least squares on `ln(value)`
//! - **Dispersion bands** at signed multiples of the log-residual deviation,
//!   with a peak-anchored calibration override
//! - **Chart payload** of named, styled, labelled curves for the rendering host
//! - **Ratio assembly** from index closes and forward-filled aggregate observations
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`analysis`] | One refresh of the pipeline |
//! | [`bands`] | Band construction |
//! | [`chart`] | Curves, styles and labels for the host |
//! | [`config`] | Analysis configuration and environment overrides |
//! | [`domain`] | Series, snapshot, peak window, timestamps |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Core error types |
//! | [`ratio`] | Ratio series assembly |
//! | [`regression`] | Least-squares line fit |
//! | [`trend`] | Trend and dispersion estimation |
//!
//! ## Quick Start
//!
//! ```rust
//! use valband_core::{bands, PeakWindow, Series, SeriesPoint, TrendEstimator};
//!
//! let series = Series::new(vec![
//!     SeriesPoint::new("2020-01-01", 1.0),
//!     SeriesPoint::new("2020-02-01", 2.0),
//!     SeriesPoint::new("2020-03-01", 4.0),
//! ]);
//! let window = PeakWindow::parse("2000-01-01", "2000-12-31").unwrap();
//!
//! let model = TrendEstimator::default().estimate(&series, &window);
//! let bands = bands::build(&model, &[-2.0, 2.0]);
//!
//! assert_eq!(model.trend_curve.len(), 3);
//! assert_eq!(bands[1].curve.len(), 3);
//! ```
//!
//! ## Error Handling
//!
//! Estimation never fails: empty or degenerate series produce flat or empty
//! curves and zero dispersion. Errors are limited to configuration validation
//! ([`ValidationError`]) and ratio assembly ([`RatioError`]).

pub mod analysis;
pub mod bands;
pub mod chart;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod math;
pub mod ratio;
pub mod regression;
pub mod trend;

pub use analysis::{analyze, Analysis};
pub use bands::{Band, DEFAULT_MULTIPLES};
pub use chart::{
    ChartPayload, ChartStyle, CurveKind, CurveStyle, LabelSpec, LabeledCurve, Offset, TextAlign,
    TextBaseline,
};
pub use config::AnalysisConfig;
pub use domain::{
    parse_calendar_date, validate_non_negative, HistoryRecord, LatestSnapshot, PeakWindow, Series,
    SeriesPoint, UtcDateTime,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, SCHEMA_VERSION};
pub use error::{RatioError, ValidationError};
pub use math::round_to;
pub use ratio::{AggregateObservation, IndexClose, RatioAssembly, RatioRow};
pub use regression::RegressionResult;
pub use trend::{PeakAnchor, PeakSource, TrendConfig, TrendEstimator, TrendModel};
