//! Backend-independent draw commands.
//!
//! The pipeline emits geometry in canvas space together with the view
//! transform; the host's rasterizer (GPU scene builder, HTML canvas,
//! test harness) applies the transform and paints in order.

use kurbo::{Affine, Point, Rect};
use peniko::Color;
use stickerbook_core::objects::{FontWeight, StrokePaint};

/// One paint operation. Commands are ordered back to front.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill a circle.
    FillCircle {
        center: Point,
        radius: f64,
        color: Color,
    },
    /// Stroke a circle outline.
    StrokeCircle {
        center: Point,
        radius: f64,
        width: f64,
        color: Color,
    },
    /// Stroke an open polyline with the given paint.
    Polyline {
        points: Vec<Point>,
        paint: StrokePaint,
    },
    /// Draw a sticker glyph (emoji or image reference) centered on a
    /// point. `fallback` is drawn as text when the glyph cannot be
    /// resolved.
    Glyph {
        glyph: String,
        fallback: String,
        center: Point,
        size: f64,
        rotation: f64,
        background: Color,
    },
    /// Draw a text label anchored at a point.
    Text {
        content: String,
        position: Point,
        font_size: f64,
        font_weight: FontWeight,
        font_family: Option<String>,
        rotation: f64,
        color: Color,
    },
    /// Stroke a rectangle outline.
    StrokeRect { rect: Rect, width: f64, color: Color },
    /// Fill a rectangle.
    FillRect { rect: Rect, color: Color },
}

/// A fully described frame: the canvas-to-screen transform, the clear
/// color, and the ordered command list.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Canvas-to-screen transform for this frame.
    pub transform: Affine,
    /// Background clear color.
    pub background: Color,
    /// Draw commands, back to front.
    pub commands: Vec<DrawCommand>,
}
