//! Scene wire format: JSON snapshot encode/decode.
//!
//! The wire schema is decoupled from the in-memory model so the model
//! can evolve without breaking stored projects. Fields are camelCase,
//! colors are hex strings, positions are flattened to `x`/`y` pairs.
//! Decoding validates what the model cannot represent (bad colors,
//! empty strokes, duplicate ids) and clamps what it can (zoom, zone
//! radius).

use crate::objects::{
    CanvasText, DrawingStroke, FontWeight, ObjectId, PlacedSticker, SerializableColor,
    StickerZone, Timestamp, ZONE_MAX_RADIUS, ZONE_MIN_RADIUS,
};
use crate::scene::Scene;
use crate::viewport::Viewport;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while encoding or decoding a scene snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid color string {0:?}")]
    InvalidColor(String),
    #[error("stroke {0} has no points")]
    EmptyStroke(ObjectId),
    #[error("duplicate object id {0}")]
    DuplicateId(ObjectId),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneDoc {
    id: String,
    viewport: ViewportDoc,
    stickers: Vec<StickerDoc>,
    texts: Vec<TextDoc>,
    drawings: Vec<DrawingDoc>,
    zones: Vec<ZoneDoc>,
    #[serde(default)]
    modified_at: Timestamp,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ViewportDoc {
    zoom: f64,
    center_x: f64,
    center_y: f64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StickerDoc {
    id: ObjectId,
    sticker_ref: String,
    x: f64,
    y: f64,
    rotation: f64,
    scale: f64,
    placed_at: Timestamp,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TextDoc {
    id: ObjectId,
    text: String,
    x: f64,
    y: f64,
    rotation: f64,
    color: String,
    font_size: f64,
    #[serde(default)]
    font_weight: FontWeight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    font_family: Option<String>,
    created_at: Timestamp,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DrawingDoc {
    id: ObjectId,
    points: Vec<PointDoc>,
    color: String,
    stroke_width: f64,
    created_at: Timestamp,
}

#[derive(Serialize, Deserialize)]
struct PointDoc {
    x: f64,
    y: f64,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ZoneDoc {
    id: ObjectId,
    name: String,
    theme: String,
    center_x: f64,
    center_y: f64,
    radius: f64,
    color: String,
    created_at: Timestamp,
    #[serde(default)]
    sticker_ids: Vec<ObjectId>,
}

fn parse_color(hex: &str) -> Result<SerializableColor, SnapshotError> {
    SerializableColor::from_hex(hex).ok_or_else(|| SnapshotError::InvalidColor(hex.to_owned()))
}

/// Encode a scene as a JSON snapshot string.
pub fn encode(scene: &Scene) -> Result<String, SnapshotError> {
    let doc = SceneDoc {
        id: scene.id.clone(),
        viewport: ViewportDoc {
            zoom: scene.viewport.zoom,
            center_x: scene.viewport.center.x,
            center_y: scene.viewport.center.y,
        },
        stickers: scene
            .stickers
            .iter()
            .map(|s| StickerDoc {
                id: s.id,
                sticker_ref: s.sticker_ref.clone(),
                x: s.position.x,
                y: s.position.y,
                rotation: s.rotation,
                scale: s.scale,
                placed_at: s.placed_at,
            })
            .collect(),
        texts: scene
            .texts
            .iter()
            .map(|t| TextDoc {
                id: t.id,
                text: t.text.clone(),
                x: t.position.x,
                y: t.position.y,
                rotation: t.rotation,
                color: t.color.to_hex(),
                font_size: t.font_size,
                font_weight: t.font_weight,
                font_family: t.font_family.clone(),
                created_at: t.created_at,
            })
            .collect(),
        drawings: scene
            .strokes
            .iter()
            .map(|s| DrawingDoc {
                id: s.id,
                points: s.points.iter().map(|p| PointDoc { x: p.x, y: p.y }).collect(),
                color: s.color.to_hex(),
                stroke_width: s.width,
                created_at: s.created_at,
            })
            .collect(),
        zones: scene
            .zones
            .iter()
            .map(|z| ZoneDoc {
                id: z.id,
                name: z.name.clone(),
                theme: z.theme.clone(),
                center_x: z.center.x,
                center_y: z.center.y,
                radius: z.radius,
                color: z.color.to_hex(),
                created_at: z.created_at,
                sticker_ids: z.sticker_ids.clone(),
            })
            .collect(),
        modified_at: scene.modified_at,
    };
    Ok(serde_json::to_string(&doc)?)
}

/// Decode a JSON snapshot string back into a scene.
///
/// Validates id uniqueness and stroke non-emptiness; clamps zoom and
/// zone radii back into their legal ranges.
pub fn decode(json: &str) -> Result<Scene, SnapshotError> {
    let doc: SceneDoc = serde_json::from_str(json)?;

    let mut seen: Vec<ObjectId> = Vec::new();
    let mut claim = |id: ObjectId| {
        if seen.contains(&id) {
            Err(SnapshotError::DuplicateId(id))
        } else {
            seen.push(id);
            Ok(())
        }
    };

    let mut scene = Scene {
        id: doc.id,
        stickers: Vec::with_capacity(doc.stickers.len()),
        texts: Vec::with_capacity(doc.texts.len()),
        strokes: Vec::with_capacity(doc.drawings.len()),
        zones: Vec::with_capacity(doc.zones.len()),
        viewport: Viewport::with_view(
            Point::new(doc.viewport.center_x, doc.viewport.center_y),
            doc.viewport.zoom,
        ),
        modified_at: doc.modified_at,
        revision: 0,
    };

    for s in doc.stickers {
        claim(s.id)?;
        scene.stickers.push(PlacedSticker {
            id: s.id,
            sticker_ref: s.sticker_ref,
            position: Point::new(s.x, s.y),
            rotation: s.rotation,
            scale: s.scale.max(0.0),
            placed_at: s.placed_at,
        });
    }
    for t in doc.texts {
        claim(t.id)?;
        let color = parse_color(&t.color)?;
        let mut text = CanvasText::with_timestamp(t.text, Point::new(t.x, t.y), color, t.created_at);
        text.id = t.id;
        text.rotation = t.rotation;
        text.font_size = t.font_size;
        text.font_weight = t.font_weight;
        text.font_family = t.font_family;
        scene.texts.push(text);
    }
    for d in doc.drawings {
        claim(d.id)?;
        let color = parse_color(&d.color)?;
        let points = d.points.iter().map(|p| Point::new(p.x, p.y)).collect();
        let mut stroke = DrawingStroke::commit_with_timestamp(points, color, d.stroke_width, d.created_at)
            .ok_or(SnapshotError::EmptyStroke(d.id))?;
        stroke.id = d.id;
        scene.strokes.push(stroke);
    }
    for z in doc.zones {
        claim(z.id)?;
        let color = parse_color(&z.color)?;
        let mut zone = StickerZone::with_timestamp(
            z.name,
            z.theme,
            Point::new(z.center_x, z.center_y),
            z.radius.clamp(ZONE_MIN_RADIUS, ZONE_MAX_RADIUS),
            color,
            z.created_at,
        );
        zone.id = z.id;
        zone.sticker_ids = z.sticker_ids;
        scene.zones.push(zone);
    }

    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        scene.viewport = Viewport::with_view(Point::new(120.0, -40.0), 1.5);
        scene.add_sticker(PlacedSticker::new("star", Point::new(10.0, 20.0)));
        let mut text = CanvasText::new(
            "hello",
            Point::new(-5.0, 8.0),
            SerializableColor::new(255, 0, 0, 255),
        );
        text.font_family = Some("Comic".to_owned());
        scene.add_text(text);
        scene.add_stroke(
            DrawingStroke::commit(
                vec![Point::new(0.0, 0.0), Point::new(3.0, 4.0)],
                SerializableColor::black(),
                4.0,
            )
            .unwrap(),
        );
        scene.add_zone(StickerZone::new(
            "Space",
            "planets",
            Point::new(200.0, 200.0),
            120.0,
            SerializableColor::new(0, 0, 255, 128),
        ));
        scene
    }

    #[test]
    fn test_roundtrip_preserves_all_fields() {
        let scene = sample_scene();
        let json = encode(&scene).unwrap();
        let back = decode(&json).unwrap();

        assert_eq!(back.id, scene.id);
        assert_eq!(back.viewport, scene.viewport);
        assert_eq!(back.stickers, scene.stickers);
        assert_eq!(back.texts, scene.texts);
        assert_eq!(back.strokes, scene.strokes);
        assert_eq!(back.zones, scene.zones);
        assert_eq!(back.modified_at, scene.modified_at);
    }

    #[test]
    fn test_wire_shape_is_camel_case_hex() {
        let json = encode(&sample_scene()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["viewport"]["centerX"].is_number());
        assert_eq!(value["stickers"][0]["stickerRef"], "star");
        assert_eq!(value["texts"][0]["color"], "#ff0000");
        assert!(value["drawings"][0]["strokeWidth"].is_number());
        // Alpha below 255 round-trips as 8-digit hex
        assert_eq!(value["zones"][0]["color"], "#0000ff80");
    }

    #[test]
    fn test_decode_rejects_bad_color() {
        let mut value: serde_json::Value =
            serde_json::from_str(&encode(&sample_scene()).unwrap()).unwrap();
        value["texts"][0]["color"] = "purple".into();
        let err = decode(&value.to_string()).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidColor(_)));
    }

    #[test]
    fn test_decode_rejects_non_ascii_color() {
        // Byte length lands on a valid hex arm; must be an error, not
        // a char-boundary panic
        let mut value: serde_json::Value =
            serde_json::from_str(&encode(&sample_scene()).unwrap()).unwrap();
        value["texts"][0]["color"] = "#\u{20ac}\u{20ac}".into();
        let err = decode(&value.to_string()).unwrap_err();
        assert!(matches!(err, SnapshotError::InvalidColor(_)));
    }

    #[test]
    fn test_decode_rejects_empty_stroke() {
        let mut value: serde_json::Value =
            serde_json::from_str(&encode(&sample_scene()).unwrap()).unwrap();
        value["drawings"][0]["points"] = serde_json::json!([]);
        let err = decode(&value.to_string()).unwrap_err();
        assert!(matches!(err, SnapshotError::EmptyStroke(_)));
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let mut value: serde_json::Value =
            serde_json::from_str(&encode(&sample_scene()).unwrap()).unwrap();
        value["texts"][0]["id"] = value["stickers"][0]["id"].clone();
        let err = decode(&value.to_string()).unwrap_err();
        assert!(matches!(err, SnapshotError::DuplicateId(_)));
    }

    #[test]
    fn test_decode_clamps_out_of_range_values() {
        let mut value: serde_json::Value =
            serde_json::from_str(&encode(&sample_scene()).unwrap()).unwrap();
        value["viewport"]["zoom"] = 99.0.into();
        value["zones"][0]["radius"] = 10_000.0.into();

        let scene = decode(&value.to_string()).unwrap();
        assert!((scene.viewport.zoom - 5.0).abs() < 1e-10);
        assert!((scene.zones[0].radius - 500.0).abs() < 1e-10);
    }
}
