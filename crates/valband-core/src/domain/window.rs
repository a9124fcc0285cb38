use serde::{Deserialize, Serialize};
use time::macros::{date, format_description};
use time::Date;

use crate::ValidationError;

time::serde::format_description!(calendar_date, Date, "[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` label into a calendar date.
pub fn parse_calendar_date(input: &str) -> Result<Date, ValidationError> {
    Date::parse(input.trim(), format_description!("[year]-[month]-[day]")).map_err(|_| {
        ValidationError::InvalidDate {
            value: input.to_owned(),
        }
    })
}

/// Inclusive calendar range searched for the historical peak used to calibrate dispersion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPeakWindow")]
pub struct PeakWindow {
    #[serde(with = "calendar_date")]
    start: Date,
    #[serde(with = "calendar_date")]
    end: Date,
}

#[derive(Deserialize)]
struct RawPeakWindow {
    #[serde(with = "calendar_date")]
    start: Date,
    #[serde(with = "calendar_date")]
    end: Date,
}

impl TryFrom<RawPeakWindow> for PeakWindow {
    type Error = ValidationError;

    fn try_from(raw: RawPeakWindow) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
    }
}

impl Default for PeakWindow {
    /// Calendar year 2000, the dot-com era extreme of the ratio.
    fn default() -> Self {
        Self {
            start: date!(2000 - 01 - 01),
            end: date!(2000 - 12 - 31),
        }
    }
}

impl PeakWindow {
    pub fn new(start: Date, end: Date) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedPeakWindow {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, ValidationError> {
        Self::new(parse_calendar_date(start)?, parse_calendar_date(end)?)
    }

    pub const fn start(&self) -> Date {
        self.start
    }

    pub const fn end(&self) -> Date {
        self.end
    }

    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Labels that are not calendar dates never fall inside the window.
    pub fn contains_label(&self, label: &str) -> bool {
        parse_calendar_date(label).is_ok_and(|date| self.contains(date))
    }
}
