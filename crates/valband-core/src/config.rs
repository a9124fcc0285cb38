//! Analysis configuration with environment overrides.
//!
//! | Variable | Default | Field |
//! |----------|---------|-------|
//! | `VALBAND_PEAK_START` | `2000-01-01` | [`AnalysisConfig::peak_window`] start |
//! | `VALBAND_PEAK_END` | `2000-12-31` | [`AnalysisConfig::peak_window`] end |
//! | `VALBAND_SAFE_FLOOR` | `0.1` | [`TrendConfig::safe_floor`] |
//! | `VALBAND_PEAK_OVERRIDE_DIVISOR` | `2.0` | [`TrendConfig::peak_override_divisor`] |
//! | `VALBAND_BILLIONS_PER_POINT` | `1.05` | [`AnalysisConfig::billions_per_point`] |

use std::env;

use serde::{Deserialize, Serialize};

use crate::bands::DEFAULT_MULTIPLES;
use crate::domain::{parse_calendar_date, validate_positive};
use crate::ratio::DEFAULT_BILLIONS_PER_POINT;
use crate::{PeakWindow, TrendConfig, ValidationError};

pub const ENV_PEAK_START: &str = "VALBAND_PEAK_START";
pub const ENV_PEAK_END: &str = "VALBAND_PEAK_END";
pub const ENV_SAFE_FLOOR: &str = "VALBAND_SAFE_FLOOR";
pub const ENV_PEAK_OVERRIDE_DIVISOR: &str = "VALBAND_PEAK_OVERRIDE_DIVISOR";
pub const ENV_BILLIONS_PER_POINT: &str = "VALBAND_BILLIONS_PER_POINT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub trend: TrendConfig,
    pub peak_window: PeakWindow,
    pub multiples: Vec<f64>,
    pub billions_per_point: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            trend: TrendConfig::default(),
            peak_window: PeakWindow::default(),
            multiples: DEFAULT_MULTIPLES.to_vec(),
            billions_per_point: DEFAULT_BILLIONS_PER_POINT,
        }
    }
}

impl AnalysisConfig {
    pub fn from_env() -> Result<Self, ValidationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup, starting from defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ValidationError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_SAFE_FLOOR) {
            config.trend.safe_floor = parse_number(ENV_SAFE_FLOOR, &value)?;
        }
        if let Some(value) = lookup(ENV_PEAK_OVERRIDE_DIVISOR) {
            config.trend.peak_override_divisor = parse_number(ENV_PEAK_OVERRIDE_DIVISOR, &value)?;
        }
        if let Some(value) = lookup(ENV_BILLIONS_PER_POINT) {
            config.billions_per_point = parse_number(ENV_BILLIONS_PER_POINT, &value)?;
        }

        let start = lookup(ENV_PEAK_START)
            .map(|value| parse_calendar_date(&value))
            .transpose()?
            .unwrap_or(config.peak_window.start());
        let end = lookup(ENV_PEAK_END)
            .map(|value| parse_calendar_date(&value))
            .transpose()?
            .unwrap_or(config.peak_window.end());
        config.peak_window = PeakWindow::new(start, end)?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.trend.validate()?;
        validate_positive("billions_per_point", self.billions_per_point)?;
        if let Some(index) = self.multiples.iter().position(|multiple| !multiple.is_finite()) {
            return Err(ValidationError::NonFiniteMultiple { index });
        }
        Ok(())
    }
}

fn parse_number(key: &'static str, value: &str) -> Result<f64, ValidationError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidEnvValue {
            key,
            value: value.to_owned(),
        })
}
