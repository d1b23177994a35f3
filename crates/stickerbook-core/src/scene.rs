//! Scene aggregate: everything placed on the canvas plus the viewport.

use crate::objects::{
    CanvasText, DrawingStroke, ObjectId, PlacedSticker, StickerZone, Timestamp, now_millis,
};
use crate::viewport::Viewport;
use kurbo::{Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Nominal visual half-extent of a sticker, used for content bounds.
const STICKER_EXTENT: f64 = 30.0;

/// The kind of a placed object, used by hit results and removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Sticker,
    Text,
    Stroke,
    Zone,
}

/// The root aggregate for one sticker-book project.
///
/// Owns all placed objects by value, in insertion order, plus the
/// viewport so a reopened project resumes where the user left off.
/// Object ids are unique within the scene. The scene is the unit of
/// persistence; snapshots handed to collaborators are plain clones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Project identifier.
    pub id: String,
    /// Placed stickers, in insertion order.
    pub stickers: Vec<PlacedSticker>,
    /// Text labels, in insertion order.
    pub texts: Vec<CanvasText>,
    /// Committed strokes, in insertion order.
    pub strokes: Vec<DrawingStroke>,
    /// Sticker zones, in insertion order.
    pub zones: Vec<StickerZone>,
    /// Current view into the canvas.
    pub viewport: Viewport,
    /// Last modification time, unix millis.
    pub modified_at: Timestamp,
    /// Monotonic change counter; not persisted. The render pipeline
    /// uses it to detect whether anything changed since the last frame.
    #[serde(skip)]
    pub revision: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            stickers: Vec::new(),
            texts: Vec::new(),
            strokes: Vec::new(),
            zones: Vec::new(),
            viewport: Viewport::new(),
            modified_at: now_millis(),
            revision: 0,
        }
    }

    pub(crate) fn touch(&mut self) {
        self.revision += 1;
        self.modified_at = now_millis();
    }

    /// Record a viewport change. The viewport is persisted scene
    /// state, so this also moves the modification timestamp.
    pub fn touch_viewport(&mut self) {
        self.touch();
    }

    /// Whether any object in the scene carries this id.
    pub fn contains_id(&self, id: ObjectId) -> bool {
        self.stickers.iter().any(|s| s.id == id)
            || self.texts.iter().any(|t| t.id == id)
            || self.strokes.iter().any(|s| s.id == id)
            || self.zones.iter().any(|z| z.id == id)
    }

    /// Add a placed sticker.
    pub fn add_sticker(&mut self, sticker: PlacedSticker) -> ObjectId {
        let id = sticker.id;
        debug_assert!(!self.contains_id(id));
        self.stickers.push(sticker);
        self.touch();
        id
    }

    /// Add a text label.
    pub fn add_text(&mut self, text: CanvasText) -> ObjectId {
        let id = text.id;
        debug_assert!(!self.contains_id(id));
        self.texts.push(text);
        self.touch();
        id
    }

    /// Add a committed stroke.
    pub fn add_stroke(&mut self, stroke: DrawingStroke) -> ObjectId {
        let id = stroke.id;
        debug_assert!(!self.contains_id(id));
        self.strokes.push(stroke);
        self.touch();
        id
    }

    /// Add a zone.
    pub fn add_zone(&mut self, zone: StickerZone) -> ObjectId {
        let id = zone.id;
        debug_assert!(!self.contains_id(id));
        self.zones.push(zone);
        self.touch();
        id
    }

    /// Get a sticker by id.
    pub fn sticker(&self, id: ObjectId) -> Option<&PlacedSticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    /// Get a mutable sticker by id.
    pub fn sticker_mut(&mut self, id: ObjectId) -> Option<&mut PlacedSticker> {
        self.stickers.iter_mut().find(|s| s.id == id)
    }

    /// Get a text label by id.
    pub fn text(&self, id: ObjectId) -> Option<&CanvasText> {
        self.texts.iter().find(|t| t.id == id)
    }

    /// Get a mutable text label by id.
    pub fn text_mut(&mut self, id: ObjectId) -> Option<&mut CanvasText> {
        self.texts.iter_mut().find(|t| t.id == id)
    }

    /// Get a stroke by id.
    pub fn stroke(&self, id: ObjectId) -> Option<&DrawingStroke> {
        self.strokes.iter().find(|s| s.id == id)
    }

    /// Get a zone by id.
    pub fn zone(&self, id: ObjectId) -> Option<&StickerZone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// The kind of the object carrying this id, if any.
    pub fn kind_of(&self, id: ObjectId) -> Option<ObjectKind> {
        if self.stickers.iter().any(|s| s.id == id) {
            Some(ObjectKind::Sticker)
        } else if self.texts.iter().any(|t| t.id == id) {
            Some(ObjectKind::Text)
        } else if self.strokes.iter().any(|s| s.id == id) {
            Some(ObjectKind::Stroke)
        } else if self.zones.iter().any(|z| z.id == id) {
            Some(ObjectKind::Zone)
        } else {
            None
        }
    }

    /// Remove the object carrying this id from whichever collection
    /// holds it. Returns the kind that was removed.
    pub fn remove(&mut self, id: ObjectId) -> Option<ObjectKind> {
        let kind = self.kind_of(id)?;
        match kind {
            ObjectKind::Sticker => self.stickers.retain(|s| s.id != id),
            ObjectKind::Text => self.texts.retain(|t| t.id != id),
            ObjectKind::Stroke => self.strokes.retain(|s| s.id != id),
            ObjectKind::Zone => self.zones.retain(|z| z.id != id),
        }
        self.touch();
        Some(kind)
    }

    /// Move a sticker, text or zone by a canvas-space delta. Strokes
    /// are immutable once committed and are not moved.
    pub fn translate(&mut self, id: ObjectId, delta: Vec2) -> bool {
        if let Some(s) = self.sticker_mut(id) {
            s.translate(delta);
        } else if let Some(t) = self.text_mut(id) {
            t.translate(delta);
        } else if let Some(z) = self.zones.iter_mut().find(|z| z.id == id) {
            z.center += delta;
        } else {
            return false;
        }
        self.touch();
        true
    }

    /// Replace the content of a text label (re-edit).
    pub fn update_text(&mut self, id: ObjectId, content: impl Into<String>) -> bool {
        let Some(text) = self.text_mut(id) else {
            return false;
        };
        text.set_text(content);
        self.touch();
        true
    }

    /// Check if the scene has no placed objects.
    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
            && self.texts.is_empty()
            && self.strokes.is_empty()
            && self.zones.is_empty()
    }

    /// Total number of placed objects.
    pub fn len(&self) -> usize {
        self.stickers.len() + self.texts.len() + self.strokes.len() + self.zones.len()
    }

    /// Bounding box of all scene content, or `None` when empty.
    pub fn content_bounds(&self) -> Option<Rect> {
        let mut result: Option<Rect> = None;
        let mut extend = |rect: Rect| {
            result = Some(match result {
                Some(r) => r.union(rect),
                None => rect,
            });
        };

        for sticker in &self.stickers {
            extend(Rect::from_center_size(
                sticker.position,
                kurbo::Size::new(STICKER_EXTENT * 2.0, STICKER_EXTENT * 2.0),
            ));
        }
        for text in &self.texts {
            extend(Rect::from_center_size(
                text.position,
                kurbo::Size::new(text.font_size * 2.0, text.font_size * 2.0),
            ));
        }
        for stroke in &self.strokes {
            extend(stroke.bounds());
        }
        for zone in &self.zones {
            extend(zone.bounds());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::SerializableColor;
    use kurbo::Point;

    #[test]
    fn test_scene_creation() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert!(scene.content_bounds().is_none());
    }

    #[test]
    fn test_add_and_remove() {
        let mut scene = Scene::new();
        let id = scene.add_sticker(PlacedSticker::new("star", Point::new(10.0, 10.0)));
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.kind_of(id), Some(ObjectKind::Sticker));

        assert_eq!(scene.remove(id), Some(ObjectKind::Sticker));
        assert!(scene.is_empty());
        assert_eq!(scene.remove(id), None);
    }

    #[test]
    fn test_translate_sticker() {
        let mut scene = Scene::new();
        let id = scene.add_sticker(PlacedSticker::new("star", Point::new(100.0, 100.0)));
        assert!(scene.translate(id, Vec2::new(50.0, 20.0)));
        assert_eq!(scene.sticker(id).unwrap().position, Point::new(150.0, 120.0));
    }

    #[test]
    fn test_translate_unknown_id() {
        let mut scene = Scene::new();
        assert!(!scene.translate(Uuid::new_v4(), Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn test_update_text() {
        let mut scene = Scene::new();
        let id = scene.add_text(CanvasText::new(
            "hi",
            Point::ZERO,
            SerializableColor::black(),
        ));
        assert!(scene.update_text(id, "hello"));
        assert_eq!(scene.text(id).unwrap().text, "hello");
    }

    #[test]
    fn test_revision_bumps_on_mutation() {
        let mut scene = Scene::new();
        let before = scene.revision;
        scene.add_sticker(PlacedSticker::new("star", Point::ZERO));
        assert!(scene.revision > before);
    }

    #[test]
    fn test_viewport_touch_moves_modified_at() {
        let mut scene = Scene::new();
        scene.modified_at = 0;
        let before = scene.revision;

        scene.touch_viewport();
        assert!(scene.revision > before);
        assert!(scene.modified_at > 0);
    }

    #[test]
    fn test_content_bounds_union() {
        let mut scene = Scene::new();
        scene.add_sticker(PlacedSticker::new("star", Point::new(0.0, 0.0)));
        scene.add_zone(StickerZone::new(
            "z",
            "t",
            Point::new(400.0, 0.0),
            100.0,
            SerializableColor::black(),
        ));
        let bounds = scene.content_bounds().unwrap();
        assert!(bounds.x0 <= -30.0);
        assert!(bounds.x1 >= 500.0);
    }

    #[test]
    fn test_json_roundtrip() {
        let mut scene = Scene::new();
        scene.add_sticker(PlacedSticker::new("star", Point::new(1.0, 2.0)));
        let json = serde_json::to_string(&scene).unwrap();
        let back: Scene = serde_json::from_str(&json).unwrap();
        assert_eq!(back.stickers.len(), 1);
        assert_eq!(back.id, scene.id);
    }
}
