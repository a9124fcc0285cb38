//! Named, styled curves handed to the rendering host.

use serde::{Deserialize, Serialize};

use crate::bands::DISPLAY_DECIMALS;
use crate::math::round_to;
use crate::{Band, PeakAnchor, Series, TrendModel};

/// Horizontal text alignment relative to the label position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text anchoring relative to the label position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextBaseline {
    Top,
    #[default]
    Middle,
    Bottom,
    Alphabetic,
}

/// Pixel offset applied to a label relative to its anchor point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Stroke appearance of a curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveStyle {
    pub color: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dash: Vec<f64>,
    pub width: f64,
}

impl CurveStyle {
    pub fn solid(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            dash: Vec::new(),
            width,
        }
    }

    pub fn dashed(color: impl Into<String>, width: f64, dash: Vec<f64>) -> Self {
        Self {
            color: color.into(),
            dash,
            width,
        }
    }
}

/// Floating label attached to one point of a curve. Unset fields fall back to the
/// label overlay's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LabelSpec {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_index: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<Offset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<TextBaseline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl LabelSpec {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_anchor(mut self, index: usize) -> Self {
        self.anchor_index = Some(index);
        self
    }

    pub fn with_outline(mut self, color: impl Into<String>, width: f64) -> Self {
        self.stroke_color = Some(color.into());
        self.stroke_width = Some(width);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CurveKind {
    Raw,
    Trend,
    Band { multiple: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledCurve {
    pub id: String,
    pub kind: CurveKind,
    pub values: Vec<f64>,
    pub style: CurveStyle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelSpec>,
}

/// Colours and label placement for assembled curves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartStyle {
    pub raw: CurveStyle,
    pub trend: CurveStyle,
    pub inner_band: CurveStyle,
    pub outer_band: CurveStyle,
    pub label_outline: Option<(String, f64)>,
    pub label_anchor: Option<usize>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            raw: CurveStyle::solid("#4ea1ff", 2.0),
            trend: CurveStyle::dashed("#f5c542", 1.5, vec![8.0, 4.0]),
            inner_band: CurveStyle::dashed("#7bd389", 1.0, vec![4.0, 4.0]),
            outer_band: CurveStyle::dashed("#ff6b6b", 1.0, vec![2.0, 4.0]),
            label_outline: Some((String::from("rgba(0,0,0,0.75)"), 3.0)),
            label_anchor: None,
        }
    }
}

impl ChartStyle {
    /// Bands within one dispersion of the trend use the inner style.
    fn band_style(&self, multiple: f64) -> &CurveStyle {
        if multiple.abs() <= 1.0 {
            &self.inner_band
        } else {
            &self.outer_band
        }
    }

    fn label(&self, text: impl Into<String>, color: &str) -> LabelSpec {
        let mut label = LabelSpec::new(text).with_color(color);
        if let Some((outline, width)) = &self.label_outline {
            label = label.with_outline(outline.clone(), *width);
        }
        if let Some(anchor) = self.label_anchor {
            label = label.with_anchor(anchor);
        }
        label
    }
}

/// Everything the host needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    pub labels: Vec<String>,
    pub curves: Vec<LabeledCurve>,
    pub dispersion: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peak: Option<PeakAnchor>,
}

impl ChartPayload {
    /// Raw series, trend, then bands in the order given. Every curve has one value per label.
    pub fn assemble(
        series: &Series,
        model: &TrendModel,
        bands: &[Band],
        style: &ChartStyle,
    ) -> Self {
        debug_assert_eq!(series.len(), model.len());

        let mut curves = Vec::with_capacity(bands.len() + 2);
        curves.push(LabeledCurve {
            id: String::from("ratio"),
            kind: CurveKind::Raw,
            values: series.values(),
            style: style.raw.clone(),
            label: None,
        });
        curves.push(LabeledCurve {
            id: String::from("trend"),
            kind: CurveKind::Trend,
            values: model
                .trend_curve
                .iter()
                .map(|value| round_to(*value, DISPLAY_DECIMALS))
                .collect(),
            style: style.trend.clone(),
            label: Some(style.label("Trend", &style.trend.color)),
        });
        for band in bands {
            let band_style = style.band_style(band.multiple);
            curves.push(LabeledCurve {
                id: format!("band{:+}", band.multiple),
                kind: CurveKind::Band {
                    multiple: band.multiple,
                },
                values: band.curve.clone(),
                style: band_style.clone(),
                label: Some(style.label(band.label(), &band_style.color)),
            });
        }

        Self {
            labels: series.labels(),
            curves,
            dispersion: model.dispersion,
            peak: model.peak.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn curve(&self, id: &str) -> Option<&LabeledCurve> {
        self.curves.iter().find(|curve| curve.id == id)
    }
}
