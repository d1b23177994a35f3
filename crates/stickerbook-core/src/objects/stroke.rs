//! Committed freehand ink strokes.

use super::{ObjectId, SerializableColor, Timestamp, now_millis};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stroke end-cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineCap {
    Butt,
    #[default]
    Round,
    Square,
}

/// Stroke join style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LineJoin {
    Miter,
    #[default]
    Round,
    Bevel,
}

/// Paint descriptor derived when a stroke is committed. Immutable after
/// commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokePaint {
    pub color: SerializableColor,
    pub width: f64,
    pub cap: LineCap,
    pub join: LineJoin,
}

/// A committed freehand stroke.
///
/// Strokes are append-only: once the gesture is released and the point
/// sequence committed, it is never edited, only removed wholesale by
/// erase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingStroke {
    pub id: ObjectId,
    /// Ordered canvas-space points; always at least one.
    pub points: Vec<Point>,
    /// Stroke color.
    pub color: SerializableColor,
    /// Stroke width in canvas units.
    pub width: f64,
    /// Derived paint descriptor.
    pub paint: StrokePaint,
    /// When the stroke was committed, unix millis.
    pub created_at: Timestamp,
}

impl DrawingStroke {
    /// Commit a buffered point sequence into a stroke.
    ///
    /// Returns `None` for an empty buffer; a single point is a valid
    /// stroke and renders as a filled dot.
    pub fn commit(points: Vec<Point>, color: SerializableColor, width: f64) -> Option<Self> {
        Self::commit_with_timestamp(points, color, width, now_millis())
    }

    /// Commit with an explicit creation timestamp.
    pub fn commit_with_timestamp(
        points: Vec<Point>,
        color: SerializableColor,
        width: f64,
        created_at: Timestamp,
    ) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        Some(Self {
            id: Uuid::new_v4(),
            points,
            color,
            width,
            paint: StrokePaint {
                color,
                width,
                cap: LineCap::Round,
                join: LineJoin::Round,
            },
            created_at,
        })
    }

    /// Bounding box of the stroke points.
    pub fn bounds(&self) -> Rect {
        let mut min_x = f64::MAX;
        let mut min_y = f64::MAX;
        let mut max_x = f64::MIN;
        let mut max_y = f64::MIN;
        for point in &self.points {
            min_x = min_x.min(point.x);
            min_y = min_y.min(point.y);
            max_x = max_x.max(point.x);
            max_y = max_y.max(point.y);
        }
        Rect::new(min_x, min_y, max_x, max_y)
    }

    /// Whether any point of the stroke lies within `radius` of `center`.
    pub fn any_point_within(&self, center: Point, radius: f64) -> bool {
        self.points
            .iter()
            .any(|p| p.distance(center) <= radius)
    }

    /// Whether any point lies inside the given canvas-space rectangle.
    pub fn intersects_rect(&self, rect: Rect) -> bool {
        self.points.iter().any(|p| rect.contains(*p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_buffer_not_committed() {
        assert!(DrawingStroke::commit(Vec::new(), SerializableColor::black(), 4.0).is_none());
    }

    #[test]
    fn test_single_point_commits() {
        let stroke =
            DrawingStroke::commit(vec![Point::new(5.0, 5.0)], SerializableColor::black(), 4.0)
                .unwrap();
        assert_eq!(stroke.points.len(), 1);
        assert_eq!(stroke.paint.cap, LineCap::Round);
        assert!((stroke.paint.width - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        let stroke = DrawingStroke::commit(
            vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 50.0),
                Point::new(50.0, 100.0),
            ],
            SerializableColor::black(),
            2.0,
        )
        .unwrap();
        let bounds = stroke.bounds();
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_any_point_within() {
        let stroke = DrawingStroke::commit(
            vec![Point::new(10.0, 10.0), Point::new(10.0, 50.0)],
            SerializableColor::black(),
            2.0,
        )
        .unwrap();
        assert!(stroke.any_point_within(Point::new(10.0, 30.0), 25.0));
        assert!(!stroke.any_point_within(Point::new(500.0, 500.0), 25.0));
    }
}
