//! Floating per-series text labels, clamped inside the plot area.

use serde::{Deserialize, Serialize};
use valband_core::{
    validate_non_negative, LabelSpec, Offset, TextAlign, TextBaseline, ValidationError,
};

use crate::canvas::{DrawContext, ScopedState};
use crate::{ChartFrame, FrameOverlay, PixelPoint, RenderedSeries};

/// Pixels kept between a label and the plot-area edges.
pub const DEFAULT_CLAMP_MARGIN: f64 = 12.0;

/// Overlay-wide label defaults; each [`LabelSpec`] field overrides its counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelOverlayConfig {
    pub font: String,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub offset: Offset,
    pub color: String,
    pub stroke_color: Option<String>,
    pub stroke_width: f64,
    pub clamp_margin: f64,
}

impl Default for LabelOverlayConfig {
    fn default() -> Self {
        Self {
            font: String::from("12px sans-serif"),
            align: TextAlign::Left,
            baseline: TextBaseline::Middle,
            offset: Offset::new(6.0, 0.0),
            color: String::from("#ffffff"),
            stroke_color: None,
            stroke_width: 0.0,
            clamp_margin: DEFAULT_CLAMP_MARGIN,
        }
    }
}

impl LabelOverlayConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_non_negative("stroke_width", self.stroke_width)?;
        validate_non_negative("clamp_margin", self.clamp_margin)
    }
}

#[derive(Debug, Clone, Default)]
pub struct LabelOverlay {
    config: LabelOverlayConfig,
}

/// A label resolved against its series and the overlay defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLabel<'a> {
    pub text: &'a str,
    pub position: PixelPoint,
    pub font: &'a str,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub color: &'a str,
    pub outline: Option<(&'a str, f64)>,
}

impl LabelOverlay {
    pub fn new(config: LabelOverlayConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LabelOverlayConfig {
        &self.config
    }

    /// Resolves where and how a series label is drawn, or `None` when there is nothing to draw.
    pub fn place<'a>(
        &'a self,
        frame: &ChartFrame,
        series: &'a RenderedSeries,
    ) -> Option<PlacedLabel<'a>> {
        let label = series.label.as_ref()?;
        if label.text.is_empty() {
            return None;
        }

        let last = series.points.len().checked_sub(1)?;
        let index = label.anchor_index.unwrap_or(frame.label_count / 2).min(last);
        let anchor = series.points[index];
        if !anchor.is_finite() {
            return None;
        }

        let offset = label.offset.unwrap_or(self.config.offset);
        let margin = frame
            .options
            .label_margin
            .filter(|margin| margin.is_finite() && *margin >= 0.0)
            .unwrap_or(self.config.clamp_margin);
        let (x, y) = frame
            .area
            .clamp_inset(anchor.x + offset.dx, anchor.y + offset.dy, margin);

        Some(PlacedLabel {
            text: &label.text,
            position: PixelPoint::new(x, y),
            font: label.font.as_deref().unwrap_or(&self.config.font),
            align: label.align.unwrap_or(self.config.align),
            baseline: label.baseline.unwrap_or(self.config.baseline),
            color: label.color.as_deref().unwrap_or(&self.config.color),
            outline: self.outline(label),
        })
    }

    fn outline<'a>(&'a self, label: &'a LabelSpec) -> Option<(&'a str, f64)> {
        let color = label
            .stroke_color
            .as_deref()
            .or(self.config.stroke_color.as_deref())?;
        let width = label.stroke_width.unwrap_or(self.config.stroke_width);
        (width > 0.0).then_some((color, width))
    }
}

impl FrameOverlay for LabelOverlay {
    fn id(&self) -> &'static str {
        "point_labels"
    }

    fn on_frame_rendered(&self, frame: &ChartFrame, ctx: &mut dyn DrawContext) {
        for series in &frame.series {
            let Some(placed) = self.place(frame, series) else {
                continue;
            };

            let PixelPoint { x, y } = placed.position;
            let mut ctx = ScopedState::acquire(&mut *ctx);
            ctx.set_font(placed.font);
            ctx.set_text_align(placed.align);
            ctx.set_text_baseline(placed.baseline);
            if let Some((color, width)) = placed.outline {
                ctx.set_stroke_style(color);
                ctx.set_line_width(width);
                ctx.stroke_text(placed.text, x, y);
            }
            ctx.set_fill_style(placed.color);
            ctx.fill_text(placed.text, x, y);
        }
    }
}
