//! Overlay extension point and registration.

use crate::canvas::DrawContext;
use crate::{ChartFrame, HoverLineOverlay, LabelOverlay};

/// Draw extension invoked by the host once per rendered frame.
pub trait FrameOverlay {
    fn id(&self) -> &'static str;

    /// Draws on top of the finished frame. Must leave `ctx` state as it found it.
    fn on_frame_rendered(&self, frame: &ChartFrame, ctx: &mut dyn DrawContext);
}

/// Ordered set of overlays run after every frame.
#[derive(Default)]
pub struct OverlayRegistry {
    overlays: Vec<Box<dyn FrameOverlay>>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Point labels first, hover line last so it stays on top.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register(LabelOverlay::default())
            .register(HoverLineOverlay::default());
        registry
    }

    /// Adds an overlay; an overlay with the same id replaces the earlier one in place.
    pub fn register(&mut self, overlay: impl FrameOverlay + 'static) -> &mut Self {
        let overlay: Box<dyn FrameOverlay> = Box::new(overlay);
        match self
            .overlays
            .iter()
            .position(|existing| existing.id() == overlay.id())
        {
            Some(index) => self.overlays[index] = overlay,
            None => self.overlays.push(overlay),
        }
        self
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.overlays.iter().map(|overlay| overlay.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    pub fn render(&self, frame: &ChartFrame, ctx: &mut dyn DrawContext) {
        for overlay in &self.overlays {
            tracing::trace!(overlay = overlay.id(), "running frame overlay");
            overlay.on_frame_rendered(frame, ctx);
        }
    }
}

impl std::fmt::Debug for OverlayRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayRegistry")
            .field("overlays", &self.ids())
            .finish()
    }
}
