//! A sticker placed on the canvas.

use super::{ObjectId, Timestamp, now_millis};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A placed instance of a catalog sticker.
///
/// The sticker definition itself (glyph, name) lives in the catalog and
/// is referenced by id, never copied into the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedSticker {
    pub id: ObjectId,
    /// Id of the catalog sticker this instance refers to.
    pub sticker_ref: String,
    /// Position in canvas space.
    pub position: Point,
    /// Rotation in radians.
    pub rotation: f64,
    /// Uniform scale factor (>= 0).
    pub scale: f64,
    /// When the sticker was placed, unix millis.
    pub placed_at: Timestamp,
}

impl PlacedSticker {
    /// Place a catalog sticker at a canvas position with default
    /// rotation 0 and scale 1.
    pub fn new(sticker_ref: impl Into<String>, position: Point) -> Self {
        Self::with_timestamp(sticker_ref, position, now_millis())
    }

    /// Place a sticker with an explicit creation timestamp.
    pub fn with_timestamp(
        sticker_ref: impl Into<String>,
        position: Point,
        placed_at: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            sticker_ref: sticker_ref.into(),
            position,
            rotation: 0.0,
            scale: 1.0,
            placed_at,
        }
    }

    /// Move the sticker by a canvas-space delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }

    /// Set the uniform scale, clamped to non-negative.
    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale.max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placement_defaults() {
        let s = PlacedSticker::new("star", Point::new(100.0, 100.0));
        assert_eq!(s.sticker_ref, "star");
        assert!((s.rotation).abs() < f64::EPSILON);
        assert!((s.scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_translate() {
        let mut s = PlacedSticker::new("star", Point::new(100.0, 100.0));
        s.translate(Vec2::new(50.0, 20.0));
        assert_eq!(s.position, Point::new(150.0, 120.0));
    }

    #[test]
    fn test_scale_clamped_non_negative() {
        let mut s = PlacedSticker::new("star", Point::ZERO);
        s.set_scale(-2.0);
        assert!((s.scale).abs() < f64::EPSILON);
    }
}
