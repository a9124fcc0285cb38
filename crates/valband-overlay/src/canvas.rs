//! Drawing-context abstraction shared by all overlays.
//!
//! The context is mutable state shared between independently registered
//! overlays. Every overlay acquires a [`ScopedState`] before touching styling
//! state; dropping the guard restores the context on every exit path.

use std::ops::{Deref, DerefMut};

use valband_core::{TextAlign, TextBaseline};

/// Immediate-mode 2D drawing surface with a save/restore state stack.
pub trait DrawContext {
    fn save(&mut self);
    fn restore(&mut self);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn stroke(&mut self);

    fn set_stroke_style(&mut self, color: &str);
    fn set_fill_style(&mut self, color: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_dash(&mut self, dash: &[f64]);

    fn set_font(&mut self, font: &str);
    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn stroke_text(&mut self, text: &str, x: f64, y: f64);
}

/// Saves the context on acquisition and restores it when dropped.
pub struct ScopedState<'a, C: DrawContext + ?Sized> {
    ctx: &'a mut C,
}

impl<'a, C: DrawContext + ?Sized> ScopedState<'a, C> {
    pub fn acquire(ctx: &'a mut C) -> Self {
        ctx.save();
        Self { ctx }
    }
}

impl<C: DrawContext + ?Sized> Deref for ScopedState<'_, C> {
    type Target = C;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl<C: DrawContext + ?Sized> DerefMut for ScopedState<'_, C> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl<C: DrawContext + ?Sized> Drop for ScopedState<'_, C> {
    fn drop(&mut self) {
        self.ctx.restore();
    }
}

/// Styling state tracked by concrete canvases.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub stroke_style: String,
    pub fill_style: String,
    pub line_width: f64,
    pub line_dash: Vec<f64>,
    pub font: String,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            stroke_style: String::from("#000000"),
            fill_style: String::from("#000000"),
            line_width: 1.0,
            line_dash: Vec::new(),
            font: String::from("10px sans-serif"),
            text_align: TextAlign::Left,
            text_baseline: TextBaseline::Alphabetic,
        }
    }
}

/// Current state plus the saved stack. An unbalanced `restore` is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateStack {
    current: DrawState,
    saved: Vec<DrawState>,
}

impl StateStack {
    pub fn current(&self) -> &DrawState {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut DrawState {
        &mut self.current
    }

    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    pub fn save(&mut self) {
        self.saved.push(self.current.clone());
    }

    pub fn restore(&mut self) {
        if let Some(previous) = self.saved.pop() {
            self.current = previous;
        }
    }
}

/// One call made against a [`RecordingCanvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Save,
    Restore,
    BeginPath,
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    Stroke,
    SetStrokeStyle(String),
    SetFillStyle(String),
    SetLineWidth(f64),
    SetLineDash(Vec<f64>),
    SetFont(String),
    SetTextAlign(TextAlign),
    SetTextBaseline(TextBaseline),
    FillText { text: String, x: f64, y: f64 },
    StrokeText { text: String, x: f64, y: f64 },
}

/// Canvas that records every call and tracks state; used to inspect overlay output.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    calls: Vec<DrawCall>,
    state: StateStack,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn state(&self) -> &DrawState {
        self.state.current()
    }

    pub fn depth(&self) -> usize {
        self.state.depth()
    }

    /// Text calls in draw order as `(text, x, y, stroked)`.
    pub fn texts(&self) -> Vec<(&str, f64, f64, bool)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::FillText { text, x, y } => Some((text.as_str(), *x, *y, false)),
                DrawCall::StrokeText { text, x, y } => Some((text.as_str(), *x, *y, true)),
                _ => None,
            })
            .collect()
    }
}

impl DrawContext for RecordingCanvas {
    fn save(&mut self) {
        self.state.save();
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        self.state.restore();
        self.calls.push(DrawCall::Restore);
    }

    fn begin_path(&mut self) {
        self.calls.push(DrawCall::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.calls.push(DrawCall::LineTo { x, y });
    }

    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke);
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.state.current_mut().stroke_style = color.to_owned();
        self.calls.push(DrawCall::SetStrokeStyle(color.to_owned()));
    }

    fn set_fill_style(&mut self, color: &str) {
        self.state.current_mut().fill_style = color.to_owned();
        self.calls.push(DrawCall::SetFillStyle(color.to_owned()));
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.current_mut().line_width = width;
        self.calls.push(DrawCall::SetLineWidth(width));
    }

    fn set_line_dash(&mut self, dash: &[f64]) {
        self.state.current_mut().line_dash = dash.to_vec();
        self.calls.push(DrawCall::SetLineDash(dash.to_vec()));
    }

    fn set_font(&mut self, font: &str) {
        self.state.current_mut().font = font.to_owned();
        self.calls.push(DrawCall::SetFont(font.to_owned()));
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.current_mut().text_align = align;
        self.calls.push(DrawCall::SetTextAlign(align));
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.current_mut().text_baseline = baseline;
        self.calls.push(DrawCall::SetTextBaseline(baseline));
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.calls.push(DrawCall::FillText {
            text: text.to_owned(),
            x,
            y,
        });
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) {
        self.calls.push(DrawCall::StrokeText {
            text: text.to_owned(),
            x,
            y,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_state_restores_on_drop() {
        let mut canvas = RecordingCanvas::new();
        {
            let mut scoped = ScopedState::acquire(&mut canvas);
            scoped.set_line_width(4.0);
            scoped.set_font("bold 20px serif");
        }

        assert_eq!(canvas.depth(), 0);
        assert_eq!(canvas.state(), &DrawState::default());
        assert_eq!(canvas.calls().first(), Some(&DrawCall::Save));
        assert_eq!(canvas.calls().last(), Some(&DrawCall::Restore));
    }

    #[test]
    fn scoped_state_works_through_trait_objects() {
        let mut canvas = RecordingCanvas::new();
        let ctx: &mut dyn DrawContext = &mut canvas;
        {
            let mut scoped = ScopedState::acquire(ctx);
            scoped.set_stroke_style("red");
        }

        assert_eq!(canvas.state().stroke_style, "#000000");
    }

    #[test]
    fn unbalanced_restore_keeps_current_state() {
        let mut stack = StateStack::default();
        stack.current_mut().line_width = 3.0;
        stack.restore();
        assert_eq!(stack.current().line_width, 3.0);
    }
}
