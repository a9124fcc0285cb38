//! Minimal host layout: maps a chart payload onto pixel space to build a frame.

use valband_core::ChartPayload;

use crate::{ActivePoint, ChartFrame, FrameOptions, PixelPoint, PlotArea, RenderedSeries};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            left: 56.0,
            top: 24.0,
            right: 24.0,
            bottom: 40.0,
        }
    }
}

/// Canvas size and padding around the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 480.0,
            padding: Padding::default(),
        }
    }
}

/// Value range of the y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    /// Span of all finite values; `0..1` when there are none, widened by one unit when flat.
    pub fn of<'a>(values: impl IntoIterator<Item = &'a f64>) -> Self {
        let (min, max) = values
            .into_iter()
            .filter(|value| value.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &value| {
                (min.min(value), max.max(value))
            });

        if min > max {
            Self { min: 0.0, max: 1.0 }
        } else if min == max {
            Self {
                min: min - 1.0,
                max: max + 1.0,
            }
        } else {
            Self { min, max }
        }
    }
}

impl ChartLayout {
    pub fn area(&self) -> PlotArea {
        PlotArea::new(
            self.padding.left,
            self.padding.top,
            self.width - self.padding.right,
            self.height - self.padding.bottom,
        )
    }

    pub fn x_for(&self, index: usize, count: usize) -> f64 {
        let area = self.area();
        if count <= 1 {
            return area.left + area.width() / 2.0;
        }
        area.left + area.width() * index as f64 / (count - 1) as f64
    }

    pub fn y_for(&self, value: f64, range: ValueRange) -> f64 {
        let area = self.area();
        area.bottom - (value - range.min) / (range.max - range.min) * area.height()
    }

    /// Lays out every curve. `hover_index` beyond the data marks nothing active.
    pub fn frame(
        &self,
        payload: &ChartPayload,
        hover_index: Option<usize>,
        options: FrameOptions,
    ) -> ChartFrame {
        let count = payload.len();
        let range = ValueRange::of(payload.curves.iter().flat_map(|curve| curve.values.iter()));

        let series: Vec<RenderedSeries> = payload
            .curves
            .iter()
            .map(|curve| RenderedSeries {
                id: curve.id.clone(),
                points: curve
                    .values
                    .iter()
                    .enumerate()
                    .map(|(index, &value)| {
                        PixelPoint::new(self.x_for(index, count), self.y_for(value, range))
                    })
                    .collect(),
                label: curve.label.clone(),
            })
            .collect();

        let active = hover_index
            .filter(|&index| index < count)
            .map(|index| {
                series
                    .iter()
                    .enumerate()
                    .filter_map(|(series_index, rendered)| {
                        rendered.points.get(index).map(|&position| ActivePoint {
                            series_index,
                            index,
                            position,
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        ChartFrame {
            area: self.area(),
            active,
            series,
            label_count: count,
            options,
        }
    }
}

#[cfg(test)]
mod tests {
    use valband_core::{analyze, AnalysisConfig, ChartStyle, Series, SeriesPoint};

    use super::*;

    fn payload() -> ChartPayload {
        let series = Series::new(vec![
            SeriesPoint::new("2020-01-01", 100.0),
            SeriesPoint::new("2020-02-01", 120.0),
            SeriesPoint::new("2020-03-01", 110.0),
        ]);
        analyze(&series, &AnalysisConfig::default(), &ChartStyle::default())
            .expect("valid config")
            .payload
    }

    #[test]
    fn spreads_points_across_plot_width() {
        let layout = ChartLayout::default();
        let frame = layout.frame(&payload(), None, FrameOptions::default());
        let raw = &frame.series[0];

        assert_eq!(raw.points[0].x, frame.area.left);
        assert_eq!(raw.points[2].x, frame.area.right);
        assert!(frame.active.is_empty());
    }

    #[test]
    fn hover_marks_one_active_point_per_series() {
        let frame = ChartLayout::default().frame(&payload(), Some(1), FrameOptions::default());

        assert_eq!(frame.active.len(), frame.series.len());
        assert!(frame.active.iter().all(|active| active.index == 1));
    }

    #[test]
    fn hover_beyond_data_is_inactive() {
        let frame = ChartLayout::default().frame(&payload(), Some(3), FrameOptions::default());
        assert!(frame.active.is_empty());
    }

    #[test]
    fn flat_and_empty_ranges_stay_drawable() {
        assert_eq!(ValueRange::of(&[5.0, 5.0]), ValueRange { min: 4.0, max: 6.0 });
        assert_eq!(ValueRange::of(&[] as &[f64]), ValueRange { min: 0.0, max: 1.0 });
        assert_eq!(
            ValueRange::of(&[f64::NAN, 2.0, 3.0]),
            ValueRange { min: 2.0, max: 3.0 }
        );
    }

    #[test]
    fn single_point_is_centred() {
        let layout = ChartLayout::default();
        let area = layout.area();
        assert_eq!(layout.x_for(0, 1), area.left + area.width() / 2.0);
    }
}
