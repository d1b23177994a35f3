//! Projection between canvas space and minimap pixel space.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Content bounds used when the scene is empty: a 1000x1000 canvas-unit
/// square centered on the origin.
pub const DEFAULT_CONTENT_BOUNDS: Rect = Rect::new(-500.0, -500.0, 500.0, 500.0);

/// Stateless mapping of a canvas-space content region onto a fixed-size
/// minimap.
///
/// `to_minimap` and `to_canvas` are exact inverses up to floating-point
/// tolerance. Construction substitutes [`DEFAULT_CONTENT_BOUNDS`] for
/// empty or degenerate content so the projection never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimapProjection {
    /// Canvas-space region the minimap covers.
    pub content_bounds: Rect,
    /// Minimap size in pixels.
    pub size: Size,
}

impl MinimapProjection {
    /// Create a projection for the given content bounds.
    ///
    /// `None` or a zero-area rectangle falls back to the default bounds.
    pub fn new(content_bounds: Option<Rect>, size: Size) -> Self {
        let content_bounds = match content_bounds {
            Some(b) if !b.is_zero_area() => b,
            _ => DEFAULT_CONTENT_BOUNDS,
        };
        Self {
            content_bounds,
            size,
        }
    }

    /// Convert a canvas point to minimap pixel coordinates.
    pub fn to_minimap(&self, canvas_point: Point) -> Point {
        let b = self.content_bounds;
        Point::new(
            (canvas_point.x - b.x0) / b.width() * self.size.width,
            (canvas_point.y - b.y0) / b.height() * self.size.height,
        )
    }

    /// Convert a minimap pixel coordinate back to canvas space.
    pub fn to_canvas(&self, minimap_point: Point) -> Point {
        let b = self.content_bounds;
        Point::new(
            minimap_point.x / self.size.width * b.width() + b.x0,
            minimap_point.y / self.size.height * b.height() + b.y0,
        )
    }

    /// Project a canvas-space rectangle into minimap space.
    pub fn rect_to_minimap(&self, rect: Rect) -> Rect {
        let p0 = self.to_minimap(Point::new(rect.x0, rect.y0));
        let p1 = self.to_minimap(Point::new(rect.x1, rect.y1));
        Rect::new(p0.x, p0.y, p1.x, p1.y)
    }

    /// Scale factor from canvas units to minimap pixels (the smaller of
    /// the two axes, for radius projection).
    pub fn radius_scale(&self) -> f64 {
        let b = self.content_bounds;
        (self.size.width / b.width()).min(self.size.height / b.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> MinimapProjection {
        MinimapProjection::new(
            Some(Rect::new(-200.0, -100.0, 600.0, 300.0)),
            Size::new(160.0, 120.0),
        )
    }

    #[test]
    fn test_corners_map_to_minimap_extents() {
        let proj = projection();
        let tl = proj.to_minimap(Point::new(-200.0, -100.0));
        let br = proj.to_minimap(Point::new(600.0, 300.0));
        assert!((tl.x).abs() < 1e-10 && (tl.y).abs() < 1e-10);
        assert!((br.x - 160.0).abs() < 1e-10);
        assert!((br.y - 120.0).abs() < 1e-10);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let proj = projection();
        let original = Point::new(123.0, 45.0);
        let mini = proj.to_minimap(original);
        let back = proj.to_canvas(mini);
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_empty_bounds_use_default() {
        let proj = MinimapProjection::new(None, Size::new(100.0, 100.0));
        assert_eq!(proj.content_bounds, DEFAULT_CONTENT_BOUNDS);

        // Origin sits in the middle of the default region
        let mid = proj.to_minimap(Point::ZERO);
        assert!((mid.x - 50.0).abs() < 1e-10);
        assert!((mid.y - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_degenerate_bounds_use_default() {
        let proj = MinimapProjection::new(
            Some(Rect::new(10.0, 10.0, 10.0, 10.0)),
            Size::new(100.0, 100.0),
        );
        assert_eq!(proj.content_bounds, DEFAULT_CONTENT_BOUNDS);
    }
}
