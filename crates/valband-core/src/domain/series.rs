use serde::{Deserialize, Serialize};

use crate::math::round_to;

/// One row of `history.json` as produced by the update job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub date: String,
    pub buffett_ratio: f64,
}

/// A dated ratio observation in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(date: impl Into<String>, value: f64) -> Self {
        Self {
            date: date.into(),
            value,
        }
    }
}

/// Chronologically ordered ratio series. Insertion order is chronological order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(points: Vec<SeriesPoint>) -> Self {
        Self { points }
    }

    /// Converts fractional ratios into percentage points rounded to 2 decimals.
    pub fn from_history(records: &[HistoryRecord]) -> Self {
        let points = records
            .iter()
            .map(|record| {
                SeriesPoint::new(record.date.clone(), round_to(record.buffett_ratio * 100.0, 2))
            })
            .collect();
        Self { points }
    }

    pub fn points(&self) -> &[SeriesPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|point| point.date.clone()).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.value).collect()
    }
}

impl FromIterator<(String, f64)> for Series {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            points: iter
                .into_iter()
                .map(|(date, value)| SeriesPoint { date, value })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_ratios_become_rounded_percentages() {
        let records = vec![
            HistoryRecord {
                date: String::from("2024-01-02"),
                buffett_ratio: 1.87456,
            },
            HistoryRecord {
                date: String::from("2024-01-03"),
                buffett_ratio: 0.5,
            },
        ];

        let series = Series::from_history(&records);

        assert_eq!(series.labels(), vec!["2024-01-02", "2024-01-03"]);
        assert_eq!(series.values(), vec![187.46, 50.0]);
    }

    #[test]
    fn deserializes_from_plain_array() {
        let series: Series =
            serde_json::from_str(r#"[{"date":"2020-01-01","value":1.5}]"#).expect("valid json");
        assert_eq!(series.len(), 1);
        assert_eq!(series.points()[0].value, 1.5);
    }
}
