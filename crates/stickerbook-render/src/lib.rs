//! Stickerbook Render Library
//!
//! Pure render pipeline for the sticker-book canvas: turns a scene and
//! its overlays into an ordered draw-command frame the host rasterizes
//! on its own schedule, plus the independent minimap pipeline and the
//! repaint-skip tracker.

mod commands;
mod minimap;
mod pipeline;

pub use commands::{DrawCommand, Frame};
pub use minimap::render_minimap;
pub use pipeline::{RenderContext, RepaintTracker, render};
