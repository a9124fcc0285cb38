//! SVG implementation of the overlay drawing context.

use valband_core::{ChartPayload, TextAlign, TextBaseline};
use valband_overlay::{ChartFrame, DrawContext, ScopedState, StateStack};

const BACKGROUND: &str = "#0b1020";

/// Accumulates SVG elements; styling follows the canvas save/restore model.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    width: f64,
    height: f64,
    state: StateStack,
    path: String,
    elements: Vec<String>,
}

impl SvgCanvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            state: StateStack::default(),
            path: String::new(),
            elements: Vec::new(),
        }
    }

    /// Strokes every payload curve at its laid-out pixel points. Gaps break the line.
    pub fn draw_curves(&mut self, payload: &ChartPayload, frame: &ChartFrame) {
        for (curve, rendered) in payload.curves.iter().zip(&frame.series) {
            let mut ctx = ScopedState::acquire(&mut *self);
            ctx.set_stroke_style(&curve.style.color);
            ctx.set_line_width(curve.style.width);
            ctx.set_line_dash(&curve.style.dash);
            ctx.begin_path();

            let mut pen_down = false;
            for point in &rendered.points {
                if !point.is_finite() {
                    pen_down = false;
                } else if pen_down {
                    ctx.line_to(point.x, point.y);
                } else {
                    ctx.move_to(point.x, point.y);
                    pen_down = true;
                }
            }
            ctx.stroke();
        }
    }

    pub fn finish(&self) -> String {
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" \
             viewBox=\"0 0 {w} {h}\">\n\
             <rect width=\"100%\" height=\"100%\" fill=\"{BACKGROUND}\"/>\n",
            w = self.width,
            h = self.height,
        );
        for element in &self.elements {
            svg.push_str(element);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn dash_attribute(&self) -> String {
        let dash = &self.state.current().line_dash;
        if dash.is_empty() {
            return String::new();
        }
        let values: Vec<String> = dash.iter().map(|value| value.to_string()).collect();
        format!(" stroke-dasharray=\"{}\"", values.join(","))
    }

    fn text_element(&self, text: &str, x: f64, y: f64, paint: &str) -> String {
        let state = self.state.current();
        format!(
            "<text x=\"{x:.2}\" y=\"{y:.2}\" style=\"font: {}\" text-anchor=\"{}\" \
             dominant-baseline=\"{}\" {paint}>{}</text>",
            escape(&state.font),
            text_anchor(state.text_align),
            dominant_baseline(state.text_baseline),
            escape(text),
        )
    }
}

impl DrawContext for SvgCanvas {
    fn save(&mut self) {
        self.state.save();
    }

    fn restore(&mut self) {
        self.state.restore();
    }

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.path.push_str(&format!("M{x:.2} {y:.2} "));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.path.push_str(&format!("L{x:.2} {y:.2} "));
    }

    fn stroke(&mut self) {
        let d = self.path.trim_end();
        if d.is_empty() {
            return;
        }
        let state = self.state.current();
        let element = format!(
            "<path d=\"{d}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"{}/>",
            escape(&state.stroke_style),
            state.line_width,
            self.dash_attribute(),
        );
        self.elements.push(element);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.state.current_mut().stroke_style = color.to_owned();
    }

    fn set_fill_style(&mut self, color: &str) {
        self.state.current_mut().fill_style = color.to_owned();
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.current_mut().line_width = width;
    }

    fn set_line_dash(&mut self, dash: &[f64]) {
        self.state.current_mut().line_dash = dash.to_vec();
    }

    fn set_font(&mut self, font: &str) {
        self.state.current_mut().font = font.to_owned();
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.current_mut().text_align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.current_mut().text_baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let paint = format!("fill=\"{}\"", escape(&self.state.current().fill_style));
        let element = self.text_element(text, x, y, &paint);
        self.elements.push(element);
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) {
        let state = self.state.current();
        let paint = format!(
            "fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linejoin=\"round\"",
            escape(&state.stroke_style),
            state.line_width,
        );
        let element = self.text_element(text, x, y, &paint);
        self.elements.push(element);
    }
}

fn text_anchor(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "start",
        TextAlign::Center => "middle",
        TextAlign::Right => "end",
    }
}

fn dominant_baseline(baseline: TextBaseline) -> &'static str {
    match baseline {
        TextBaseline::Top => "hanging",
        TextBaseline::Middle => "middle",
        TextBaseline::Bottom => "text-after-edge",
        TextBaseline::Alphabetic => "alphabetic",
    }
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
