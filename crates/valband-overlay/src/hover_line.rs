//! Vertical reference line at the highlighted data index.

use serde::{Deserialize, Serialize};

use crate::canvas::{DrawContext, ScopedState};
use crate::{ChartFrame, FrameOverlay};

/// Stroke settings of the hover line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoverLineConfig {
    pub line_width: f64,
    pub color: String,
    pub dash: Vec<f64>,
}

impl Default for HoverLineConfig {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            color: String::from("rgba(255,255,255,0.5)"),
            dash: vec![4.0, 4.0],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct HoverLineOverlay {
    config: HoverLineConfig,
}

impl HoverLineOverlay {
    pub fn new(config: HoverLineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &HoverLineConfig {
        &self.config
    }
}

impl FrameOverlay for HoverLineOverlay {
    fn id(&self) -> &'static str {
        "hover_line"
    }

    fn on_frame_rendered(&self, frame: &ChartFrame, ctx: &mut dyn DrawContext) {
        let Some(active) = frame.active.first() else {
            return;
        };
        let x = active.position.x;
        if !x.is_finite() {
            return;
        }

        let config = frame.options.hover_line.as_ref().unwrap_or(&self.config);
        let mut ctx = ScopedState::acquire(ctx);
        ctx.begin_path();
        ctx.move_to(x, frame.area.top);
        ctx.line_to(x, frame.area.bottom);
        ctx.set_line_width(config.line_width);
        ctx.set_stroke_style(&config.color);
        ctx.set_line_dash(&config.dash);
        ctx.stroke();
    }
}
