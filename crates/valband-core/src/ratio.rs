//! Ratio assembly from already-retrieved index closes and aggregate observations.
//!
//! Index closes are converted to a market-cap estimate with a fixed
//! billions-per-point factor and divided by the aggregate (billions, SAAR)
//! observation in force on that date. Quarterly observations are carried
//! forward until the next one is published.

use serde::{Deserialize, Serialize};
use time::Date;

use crate::domain::{parse_calendar_date, validate_positive};
use crate::math::round_to;
use crate::{HistoryRecord, LatestSnapshot, RatioError, UtcDateTime};

/// Market-cap billions represented by one index point.
pub const DEFAULT_BILLIONS_PER_POINT: f64 = 1.05;

/// Daily close of the broad market index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexClose {
    pub date: String,
    pub close: f64,
}

/// One aggregate observation, in billions of currency at a seasonally adjusted annual rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateObservation {
    pub date: String,
    pub value: f64,
}

/// A joined row of the ratio table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioRow {
    pub date: String,
    pub index_close: f64,
    pub market_cap_billion: f64,
    pub gdp_billion_saar: f64,
    pub buffett_ratio: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatioAssembly {
    pub rows: Vec<RatioRow>,
    pub billions_per_point: f64,
    /// Closes that were discarded (no aggregate yet, or non-positive inputs).
    pub dropped: usize,
}

impl RatioAssembly {
    /// History rows with the ratio rounded to 4 decimals.
    pub fn history(&self) -> Vec<HistoryRecord> {
        self.rows
            .iter()
            .map(|row| HistoryRecord {
                date: row.date.clone(),
                buffett_ratio: round_to(row.buffett_ratio, 4),
            })
            .collect()
    }

    /// Snapshot of the most recent row.
    pub fn latest(
        &self,
        generated_at: UtcDateTime,
        source_ticker: Option<String>,
    ) -> Option<LatestSnapshot> {
        self.rows.last().map(|row| LatestSnapshot {
            generated_at,
            w5000_close: round_to(row.index_close, 2),
            billions_per_point: Some(self.billions_per_point),
            market_cap_billion: round_to(row.market_cap_billion, 2),
            gdp_billion_saar: round_to(row.gdp_billion_saar, 2),
            buffett_ratio: round_to(row.buffett_ratio, 4),
            source_ticker,
        })
    }
}

/// Joins closes with forward-filled aggregate observations.
pub fn assemble(
    closes: &[IndexClose],
    observations: &[AggregateObservation],
    billions_per_point: f64,
) -> Result<RatioAssembly, RatioError> {
    validate_positive("billions_per_point", billions_per_point)?;

    let mut aggregate = observations
        .iter()
        .filter(|observation| observation.value.is_finite() && observation.value > 0.0)
        .map(|observation| -> Result<(Date, f64), RatioError> {
            Ok((parse_calendar_date(&observation.date)?, observation.value))
        })
        .collect::<Result<Vec<_>, _>>()?;
    aggregate.sort_by_key(|(date, _)| *date);

    let mut dated_closes = closes
        .iter()
        .map(|close| -> Result<(Date, &IndexClose), RatioError> {
            Ok((parse_calendar_date(&close.date)?, close))
        })
        .collect::<Result<Vec<_>, _>>()?;
    dated_closes.sort_by_key(|(date, _)| *date);

    let mut rows = Vec::with_capacity(dated_closes.len());
    let mut dropped = 0;
    for (date, close) in dated_closes {
        let in_force = aggregate.partition_point(|(published, _)| *published <= date);
        let gdp = in_force.checked_sub(1).map(|index| aggregate[index].1);

        match gdp {
            Some(gdp) if close.close.is_finite() && close.close > 0.0 => {
                let market_cap_billion = close.close * billions_per_point;
                rows.push(RatioRow {
                    date: close.date.clone(),
                    index_close: close.close,
                    market_cap_billion,
                    gdp_billion_saar: gdp,
                    buffett_ratio: market_cap_billion / gdp,
                });
            }
            _ => dropped += 1,
        }
    }

    if rows.is_empty() {
        return Err(RatioError::EmptyJoin);
    }

    tracing::debug!(rows = rows.len(), dropped, "ratio series assembled");

    Ok(RatioAssembly {
        rows,
        billions_per_point,
        dropped,
    })
}
