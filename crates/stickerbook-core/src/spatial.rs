//! Spatial queries over the scene: hit-testing and radius erase.
//!
//! Every query is a linear scan over the scene collections. At the
//! object counts this engine targets that is well within frame budget;
//! it is a known scalability ceiling, not an oversight.

use crate::objects::ObjectId;
use crate::scene::{ObjectKind, Scene};
use kurbo::Point;

/// Fixed hit radius around a sticker's position, independent of its
/// scale (an intentional simplification).
pub const STICKER_HIT_RADIUS: f64 = 30.0;
/// Fixed hit radius around a text label's position.
pub const TEXT_HIT_RADIUS: f64 = 50.0;

/// A hit-test result: the topmost object under a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub id: ObjectId,
    pub kind: ObjectKind,
}

/// Find the topmost object at a canvas point.
///
/// Priority is stickers, then texts, then zones, each scanned in
/// reverse insertion order so later-placed objects win ties. Strokes
/// are not selectable.
pub fn hit_test(scene: &Scene, point: Point) -> Option<Hit> {
    for sticker in scene.stickers.iter().rev() {
        if sticker.position.distance(point) <= STICKER_HIT_RADIUS {
            return Some(Hit {
                id: sticker.id,
                kind: ObjectKind::Sticker,
            });
        }
    }
    for text in scene.texts.iter().rev() {
        if text.position.distance(point) <= TEXT_HIT_RADIUS {
            return Some(Hit {
                id: text.id,
                kind: ObjectKind::Text,
            });
        }
    }
    for zone in scene.zones.iter().rev() {
        if zone.contains(point) {
            return Some(Hit {
                id: zone.id,
                kind: ObjectKind::Zone,
            });
        }
    }
    None
}

/// Remove everything near a canvas point.
///
/// Stickers and texts are removed when their center lies within
/// `radius`; a stroke is removed when any of its points does
/// (whole-stroke granularity, no partial erasure). Zones are not
/// erasable. Returns the ids of removed objects.
pub fn erase_near(scene: &mut Scene, point: Point, radius: f64) -> Vec<ObjectId> {
    let mut removed = Vec::new();

    scene.stickers.retain(|s| {
        let keep = s.position.distance(point) > radius;
        if !keep {
            removed.push(s.id);
        }
        keep
    });
    scene.texts.retain(|t| {
        let keep = t.position.distance(point) > radius;
        if !keep {
            removed.push(t.id);
        }
        keep
    });
    scene.strokes.retain(|s| {
        let keep = !s.any_point_within(point, radius);
        if !keep {
            removed.push(s.id);
        }
        keep
    });

    if !removed.is_empty() {
        scene.touch();
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{CanvasText, DrawingStroke, PlacedSticker, SerializableColor, StickerZone};

    fn color() -> SerializableColor {
        SerializableColor::black()
    }

    #[test]
    fn test_hit_priority_sticker_over_text_over_zone() {
        let mut scene = Scene::new();
        let zone = scene.add_zone(StickerZone::new("z", "t", Point::ZERO, 100.0, color()));
        let text = scene.add_text(CanvasText::new("hi", Point::ZERO, color()));
        let sticker = scene.add_sticker(PlacedSticker::new("star", Point::ZERO));

        let hit = hit_test(&scene, Point::ZERO).unwrap();
        assert_eq!(hit.id, sticker);

        scene.remove(sticker);
        assert_eq!(hit_test(&scene, Point::ZERO).unwrap().id, text);

        scene.remove(text);
        assert_eq!(hit_test(&scene, Point::ZERO).unwrap().id, zone);
    }

    #[test]
    fn test_later_placed_object_wins_ties() {
        let mut scene = Scene::new();
        let _first = scene.add_sticker(PlacedSticker::new("a", Point::new(0.0, 0.0)));
        let second = scene.add_sticker(PlacedSticker::new("b", Point::new(5.0, 0.0)));

        let hit = hit_test(&scene, Point::new(2.0, 0.0)).unwrap();
        assert_eq!(hit.id, second);
    }

    #[test]
    fn test_zone_containment_boundary() {
        let mut scene = Scene::new();
        let zone = scene.add_zone(StickerZone::new(
            "z",
            "t",
            Point::new(100.0, 0.0),
            100.0,
            color(),
        ));

        assert_eq!(hit_test(&scene, Point::new(200.0, 0.0)).unwrap().id, zone);
        assert!(hit_test(&scene, Point::new(200.5, 0.0)).is_none());
    }

    #[test]
    fn test_erase_locality() {
        let mut scene = Scene::new();
        let near = scene.add_sticker(PlacedSticker::new("a", Point::new(10.0, 0.0)));
        let far = scene.add_sticker(PlacedSticker::new("b", Point::new(100.0, 0.0)));

        let removed = erase_near(&mut scene, Point::ZERO, 25.0);
        assert_eq!(removed, vec![near]);
        assert!(scene.sticker(far).is_some());
        // No remaining sticker within the erase radius
        assert!(
            scene
                .stickers
                .iter()
                .all(|s| s.position.distance(Point::ZERO) > 25.0)
        );
    }

    #[test]
    fn test_erase_stroke_whole_granularity() {
        let mut scene = Scene::new();
        let hit = scene.add_stroke(
            DrawingStroke::commit(
                vec![Point::new(10.0, 10.0), Point::new(10.0, 50.0)],
                color(),
                4.0,
            )
            .unwrap(),
        );
        let missed = scene.add_stroke(
            DrawingStroke::commit(vec![Point::new(500.0, 500.0)], color(), 4.0).unwrap(),
        );

        let removed = erase_near(&mut scene, Point::new(10.0, 30.0), 25.0);
        assert_eq!(removed, vec![hit]);
        assert!(scene.stroke(missed).is_some());
    }

    #[test]
    fn test_erase_does_not_touch_zones() {
        let mut scene = Scene::new();
        let zone = scene.add_zone(StickerZone::new("z", "t", Point::ZERO, 100.0, color()));
        let removed = erase_near(&mut scene, Point::ZERO, 50.0);
        assert!(removed.is_empty());
        assert!(scene.zone(zone).is_some());
    }
}
