//! Named circular zones for grouping stickers.

use super::{ObjectId, SerializableColor, Timestamp, now_millis};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum zone radius in canvas units.
pub const ZONE_MIN_RADIUS: f64 = 50.0;
/// Maximum zone radius in canvas units.
pub const ZONE_MAX_RADIUS: f64 = 500.0;

/// A named circular region used for visual grouping and navigation.
///
/// Zones never physically constrain their members; `sticker_ids` is an
/// advisory list captured at creation time and not consulted by
/// hit-testing or erase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StickerZone {
    pub id: ObjectId,
    /// Display name.
    pub name: String,
    /// Free-form theme tag.
    pub theme: String,
    /// Center in canvas space.
    pub center: Point,
    /// Radius, clamped to [`ZONE_MIN_RADIUS`, `ZONE_MAX_RADIUS`].
    pub radius: f64,
    /// Zone color.
    pub color: SerializableColor,
    /// When the zone was created, unix millis.
    pub created_at: Timestamp,
    /// Advisory member sticker ids.
    #[serde(default)]
    pub sticker_ids: Vec<ObjectId>,
}

impl StickerZone {
    /// Create a zone; the radius is clamped, so a degenerate two-tap
    /// gesture still produces a zone of the minimum size.
    pub fn new(
        name: impl Into<String>,
        theme: impl Into<String>,
        center: Point,
        radius: f64,
        color: SerializableColor,
    ) -> Self {
        Self::with_timestamp(name, theme, center, radius, color, now_millis())
    }

    /// Create a zone with an explicit creation timestamp.
    pub fn with_timestamp(
        name: impl Into<String>,
        theme: impl Into<String>,
        center: Point,
        radius: f64,
        color: SerializableColor,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            theme: theme.into(),
            center,
            radius: radius.clamp(ZONE_MIN_RADIUS, ZONE_MAX_RADIUS),
            color,
            created_at,
            sticker_ids: Vec::new(),
        }
    }

    /// Whether a canvas point lies inside the zone.
    pub fn contains(&self, point: Point) -> bool {
        point.distance(self.center) <= self.radius
    }

    /// Bounding box of the zone circle.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius,
            self.center.y - self.radius,
            self.center.x + self.radius,
            self.center.y + self.radius,
        )
    }

    /// Whether the zone circle intersects a canvas-space rectangle.
    pub fn intersects_rect(&self, rect: Rect) -> bool {
        let nearest = Point::new(
            self.center.x.clamp(rect.x0, rect.x1),
            self.center.y.clamp(rect.y0, rect.y1),
        );
        nearest.distance(self.center) <= self.radius
    }
}
