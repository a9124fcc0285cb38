//! # Domain Models
//!
//! Records consumed by the analytical pipeline.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Series`] | Chronological ratio series in percentage points |
//! | [`HistoryRecord`] | Raw `history.json` row (fractional ratio) |
//! | [`LatestSnapshot`] | Raw `latest.json` record |
//! | [`PeakWindow`] | Inclusive date range used for peak-anchored calibration |
//! | [`UtcDateTime`] | UTC timestamp |

mod series;
mod snapshot;
mod timestamp;
mod window;

pub use series::{HistoryRecord, Series, SeriesPoint};
pub use snapshot::LatestSnapshot;
pub use snapshot::validate_non_negative;
pub(crate) use snapshot::validate_positive;
pub use timestamp::UtcDateTime;
pub use window::{parse_calendar_date, PeakWindow};
