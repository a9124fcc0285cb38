//! Per-frame chart state read by overlays. Owned by the host; overlays never mutate it.

use serde::{Deserialize, Serialize};
use valband_core::LabelSpec;

use crate::HoverLineConfig;

/// Plot rectangle in pixels; `top < bottom` in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Clamps a point into the area shrunk by `margin` on every side. When the
    /// shrunk area is empty along an axis the point is centred on that axis.
    pub fn clamp_inset(&self, x: f64, y: f64, margin: f64) -> (f64, f64) {
        (
            clamp_between(x, self.left + margin, self.right - margin),
            clamp_between(y, self.top + margin, self.bottom - margin),
        )
    }
}

fn clamp_between(value: f64, low: f64, high: f64) -> f64 {
    if low > high {
        (low + high) / 2.0
    } else {
        value.max(low).min(high)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A data point currently highlighted by interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivePoint {
    pub series_index: usize,
    pub index: usize,
    pub position: PixelPoint,
}

/// A drawn series with its pixel points and optional floating label.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSeries {
    pub id: String,
    pub points: Vec<PixelPoint>,
    pub label: Option<LabelSpec>,
}

/// Per-invocation overrides of overlay configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameOptions {
    pub hover_line: Option<HoverLineConfig>,
    pub label_margin: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub area: PlotArea,
    pub active: Vec<ActivePoint>,
    pub series: Vec<RenderedSeries>,
    /// Number of category labels on the x axis.
    pub label_count: usize,
    pub options: FrameOptions,
}

impl ChartFrame {
    pub fn new(area: PlotArea, label_count: usize) -> Self {
        Self {
            area,
            active: Vec::new(),
            series: Vec::new(),
            label_count,
            options: FrameOptions::default(),
        }
    }

    pub fn with_series(mut self, series: RenderedSeries) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_active(mut self, active: ActivePoint) -> Self {
        self.active.push(active);
        self
    }

    pub fn with_options(mut self, options: FrameOptions) -> Self {
        self.options = options;
        self
    }
}
