//! Chart overlays for valband.
//!
//! Two independent draw extensions run by the rendering host after each frame:
//!
//! - [`HoverLineOverlay`] draws a vertical line at the first active point.
//! - [`LabelOverlay`] draws one floating label per labelled series, clamped
//!   inside the plot area.
//!
//! Both implement [`FrameOverlay`] and are composed through an
//! [`OverlayRegistry`]. They draw through the [`DrawContext`] trait and scope
//! every state change with [`ScopedState`], so neither leaks styling into later
//! draws.

pub mod canvas;
pub mod frame;
pub mod hover_line;
pub mod labels;
pub mod layout;
pub mod registry;

pub use canvas::{DrawCall, DrawContext, DrawState, RecordingCanvas, ScopedState, StateStack};
pub use frame::{ActivePoint, ChartFrame, FrameOptions, PixelPoint, PlotArea, RenderedSeries};
pub use hover_line::{HoverLineConfig, HoverLineOverlay};
pub use labels::{LabelOverlay, LabelOverlayConfig, PlacedLabel, DEFAULT_CLAMP_MARGIN};
pub use layout::{ChartLayout, Padding, ValueRange};
pub use registry::{FrameOverlay, OverlayRegistry};
