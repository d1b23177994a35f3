//! Minimap pipeline, independent of the main canvas pipeline.
//!
//! Draws a simplified projection into minimap pixel space: stickers as
//! dots, zones as scaled circles, and a rectangle for the current
//! viewport. Input on the minimap is converted back to canvas space by
//! the session, not here.

use crate::commands::DrawCommand;
use kurbo::{Point, Size};
use peniko::Color;
use stickerbook_core::minimap::MinimapProjection;
use stickerbook_core::scene::Scene;

/// Sticker dot radius in minimap pixels.
const DOT_RADIUS: f64 = 2.0;

/// Render the minimap for a scene. Commands are in minimap pixel
/// space; no transform applies.
pub fn render_minimap(scene: &Scene, minimap_size: Size, screen_size: Size) -> Vec<DrawCommand> {
    let projection = MinimapProjection::new(scene.content_bounds(), minimap_size);
    let mut commands = Vec::new();

    commands.push(DrawCommand::FillRect {
        rect: kurbo::Rect::from_origin_size(Point::ZERO, minimap_size),
        color: Color::from_rgba8(240, 240, 240, 230),
    });

    for zone in &scene.zones {
        commands.push(DrawCommand::StrokeCircle {
            center: projection.to_minimap(zone.center),
            radius: zone.radius * projection.radius_scale(),
            width: 1.0,
            color: zone.color.into(),
        });
    }

    for sticker in &scene.stickers {
        commands.push(DrawCommand::FillCircle {
            center: projection.to_minimap(sticker.position),
            radius: DOT_RADIUS,
            color: Color::from_rgba8(80, 80, 80, 255),
        });
    }

    commands.push(DrawCommand::StrokeRect {
        rect: projection.rect_to_minimap(scene.viewport.visible_rect(screen_size)),
        width: 1.5,
        color: Color::from_rgba8(59, 130, 246, 255),
    });

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use stickerbook_core::objects::{PlacedSticker, SerializableColor, StickerZone};

    #[test]
    fn test_minimap_projects_objects_and_viewport() {
        let mut scene = Scene::new();
        scene.add_sticker(PlacedSticker::new("star", Point::ZERO));
        scene.add_zone(StickerZone::new(
            "z",
            "t",
            Point::new(100.0, 100.0),
            80.0,
            SerializableColor::black(),
        ));

        let commands = render_minimap(&scene, Size::new(160.0, 120.0), Size::new(800.0, 600.0));

        // Background, one zone circle, one sticker dot, one viewport rect
        assert_eq!(commands.len(), 4);
        assert!(matches!(commands[0], DrawCommand::FillRect { .. }));
        assert!(matches!(commands[1], DrawCommand::StrokeCircle { .. }));
        assert!(matches!(commands[2], DrawCommand::FillCircle { .. }));
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::StrokeRect { .. })
        ));
    }

    #[test]
    fn test_empty_scene_still_renders_viewport_rect() {
        let scene = Scene::new();
        let commands = render_minimap(&scene, Size::new(100.0, 100.0), Size::new(800.0, 600.0));

        // Default content bounds center the origin; the viewport rect
        // sits in the middle of the minimap
        let Some(DrawCommand::StrokeRect { rect, .. }) = commands.last() else {
            panic!("expected a viewport rect");
        };
        assert!((rect.center().x - 50.0).abs() < 1e-10);
        assert!((rect.center().y - 50.0).abs() < 1e-10);
    }
}
