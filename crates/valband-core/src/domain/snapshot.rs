use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

/// Latest computed values as written to `latest.json` by the update job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestSnapshot {
    pub generated_at: UtcDateTime,
    pub w5000_close: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billions_per_point: Option<f64>,
    pub market_cap_billion: f64,
    pub gdp_billion_saar: f64,
    pub buffett_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ticker: Option<String>,
}

impl LatestSnapshot {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_non_negative("w5000_close", self.w5000_close)?;
        validate_non_negative("market_cap_billion", self.market_cap_billion)?;
        validate_non_negative("buffett_ratio", self.buffett_ratio)?;
        validate_positive("gdp_billion_saar", self.gdp_billion_saar)?;
        if let Some(points) = self.billions_per_point {
            validate_positive("billions_per_point", points)?;
        }
        Ok(())
    }

    /// Ratio expressed in percentage points, the unit of the charted series.
    pub fn ratio_percent(&self) -> f64 {
        self.buffett_ratio * 100.0
    }
}

/// Accepts finite values at or above zero.
pub fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

pub(crate) fn validate_positive(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value <= 0.0 {
        return Err(ValidationError::NonPositiveValue { field });
    }
    Ok(())
}
