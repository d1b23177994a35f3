//! The main render pipeline: scene plus overlays to a draw-command
//! frame, and the repaint-skip policy.

use crate::commands::{DrawCommand, Frame};
use kurbo::{Point, Size};
use peniko::Color;
use stickerbook_core::catalog::StickerCatalog;
use stickerbook_core::objects::{ObjectId, SerializableColor, StrokePaint};
use stickerbook_core::scene::Scene;
use stickerbook_core::tools::BrushStyle;

/// Nominal rendered size of a sticker at scale 1.0, canvas units.
const STICKER_SIZE: f64 = 60.0;
/// Selection ring radius around a selected object's position.
const SELECTION_RING_RADIUS: f64 = 40.0;
/// Zone fill alpha out of 255.
const ZONE_FILL_ALPHA: u8 = 40;

/// Everything a single frame needs, borrowed from the session.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a Scene,
    /// Host surface size in screen pixels.
    pub screen_size: Size,
    /// Background clear color.
    pub background_color: Color,
    /// Selection highlight color.
    pub selection_color: Color,
    /// Id of the selected object, if any.
    pub selection: Option<ObjectId>,
    /// Buffered points of an in-progress draw gesture.
    pub in_progress_stroke: Option<&'a [Point]>,
    /// Brush used for the in-progress stroke preview.
    pub brush: BrushStyle,
    /// First tap of a zone-creation gesture, for the preview overlay.
    pub zone_preview_start: Option<Point>,
    /// Current pointer position in canvas space, for previews and the
    /// erase cursor.
    pub pointer: Option<Point>,
    /// Erase cursor radius; drawn at the pointer when set.
    pub erase_cursor_radius: Option<f64>,
    /// Whether to cull objects outside the visible rectangle.
    pub cull: bool,
    /// Catalog for resolving sticker glyphs.
    pub catalog: Option<&'a StickerCatalog>,
}

impl<'a> RenderContext<'a> {
    /// Create a render context with default colors and no overlays.
    pub fn new(scene: &'a Scene, screen_size: Size) -> Self {
        Self {
            scene,
            screen_size,
            background_color: Color::from_rgba8(250, 250, 250, 255),
            selection_color: Color::from_rgba8(59, 130, 246, 255),
            selection: None,
            in_progress_stroke: None,
            brush: BrushStyle::default(),
            zone_preview_start: None,
            pointer: None,
            erase_cursor_radius: None,
            cull: false,
            catalog: None,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the selected object.
    pub fn with_selection(mut self, selection: Option<ObjectId>) -> Self {
        self.selection = selection;
        self
    }

    /// Set the in-progress stroke buffer and its brush.
    pub fn with_in_progress_stroke(mut self, points: Option<&'a [Point]>, brush: BrushStyle) -> Self {
        self.in_progress_stroke = points;
        self.brush = brush;
        self
    }

    /// Set the zone-creation preview anchor.
    pub fn with_zone_preview(mut self, start: Option<Point>) -> Self {
        self.zone_preview_start = start;
        self
    }

    /// Set the pointer position in canvas space.
    pub fn with_pointer(mut self, pointer: Option<Point>) -> Self {
        self.pointer = pointer;
        self
    }

    /// Show the erase cursor with this radius.
    pub fn with_erase_cursor(mut self, radius: Option<f64>) -> Self {
        self.erase_cursor_radius = radius;
        self
    }

    /// Enable visibility culling (unbounded-canvas variant).
    pub fn with_culling(mut self, cull: bool) -> Self {
        self.cull = cull;
        self
    }

    /// Set the sticker catalog for glyph resolution.
    pub fn with_catalog(mut self, catalog: &'a StickerCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }
}

fn with_alpha(color: SerializableColor, alpha: u8) -> Color {
    Color::from_rgba8(color.r, color.g, color.b, alpha)
}

/// Render one frame as a pure function of the context.
///
/// Command order, back to front: zones, committed strokes, in-progress
/// stroke, stickers, texts, selection ring, zone preview, erase cursor.
pub fn render(ctx: &RenderContext) -> Frame {
    let scene = ctx.scene;
    let visible = scene.viewport.visible_rect(ctx.screen_size);
    let mut commands = Vec::new();

    for zone in &scene.zones {
        if ctx.cull && !zone.intersects_rect(visible) {
            continue;
        }
        commands.push(DrawCommand::FillCircle {
            center: zone.center,
            radius: zone.radius,
            color: with_alpha(zone.color, ZONE_FILL_ALPHA),
        });
        commands.push(DrawCommand::StrokeCircle {
            center: zone.center,
            radius: zone.radius,
            width: 2.0,
            color: zone.color.into(),
        });
        commands.push(DrawCommand::Text {
            content: zone.name.clone(),
            position: Point::new(zone.center.x, zone.center.y - zone.radius),
            font_size: 16.0,
            font_weight: Default::default(),
            font_family: None,
            rotation: 0.0,
            color: zone.color.into(),
        });
    }

    for stroke in &scene.strokes {
        if ctx.cull && !stroke.intersects_rect(visible) {
            continue;
        }
        commands.push(stroke_command(&stroke.points, stroke.paint));
    }

    // The in-progress buffer sits above committed ink but below objects
    if let Some(points) = ctx.in_progress_stroke {
        if !points.is_empty() {
            let paint = StrokePaint {
                color: ctx.brush.color,
                width: ctx.brush.width,
                cap: Default::default(),
                join: Default::default(),
            };
            commands.push(stroke_command(points, paint));
        }
    }

    for sticker in &scene.stickers {
        if ctx.cull && !visible.contains(sticker.position) {
            continue;
        }
        let definition = ctx.catalog.and_then(|c| c.get(&sticker.sticker_ref));
        commands.push(DrawCommand::Glyph {
            glyph: definition
                .map(|d| d.glyph.clone())
                .unwrap_or_else(|| sticker.sticker_ref.clone()),
            fallback: definition
                .map(|d| d.name.clone())
                .unwrap_or_else(|| sticker.sticker_ref.clone()),
            center: sticker.position,
            size: STICKER_SIZE * sticker.scale,
            rotation: sticker.rotation,
            background: definition
                .map(|d| d.background.into())
                .unwrap_or(Color::TRANSPARENT),
        });
    }

    for text in &scene.texts {
        if ctx.cull && !visible.contains(text.position) {
            continue;
        }
        commands.push(DrawCommand::Text {
            content: text.text.clone(),
            position: text.position,
            font_size: text.font_size,
            font_weight: text.font_weight,
            font_family: text.font_family.clone(),
            rotation: text.rotation,
            color: text.color.into(),
        });
    }

    if let Some(id) = ctx.selection {
        if let Some(center) = selection_anchor(scene, id) {
            commands.push(DrawCommand::StrokeCircle {
                center,
                radius: SELECTION_RING_RADIUS,
                width: 2.0,
                color: ctx.selection_color,
            });
        }
    }

    if let Some(start) = ctx.zone_preview_start {
        commands.push(DrawCommand::FillCircle {
            center: start,
            radius: 5.0,
            color: ctx.selection_color,
        });
        if let Some(pointer) = ctx.pointer {
            let center = start.midpoint(pointer);
            let radius = start.distance(pointer) / 2.0;
            commands.push(DrawCommand::StrokeCircle {
                center,
                radius,
                width: 1.5,
                color: ctx.selection_color,
            });
        }
    }

    if let (Some(radius), Some(pointer)) = (ctx.erase_cursor_radius, ctx.pointer) {
        commands.push(DrawCommand::StrokeCircle {
            center: pointer,
            radius,
            width: 1.0,
            color: Color::from_rgba8(120, 120, 120, 200),
        });
    }

    log::trace!("frame: {} commands, revision {}", commands.len(), scene.revision);
    Frame {
        transform: scene.viewport.transform(ctx.screen_size),
        background: ctx.background_color,
        commands,
    }
}

/// A single point renders as a filled dot of the brush width.
fn stroke_command(points: &[Point], paint: StrokePaint) -> DrawCommand {
    if let [point] = points {
        DrawCommand::FillCircle {
            center: *point,
            radius: paint.width / 2.0,
            color: paint.color.into(),
        }
    } else {
        DrawCommand::Polyline {
            points: points.to_vec(),
            paint,
        }
    }
}

fn selection_anchor(scene: &Scene, id: ObjectId) -> Option<Point> {
    scene
        .sticker(id)
        .map(|s| s.position)
        .or_else(|| scene.text(id).map(|t| t.position))
        .or_else(|| scene.zone(id).map(|z| z.center))
}

/// Decides whether a frame needs repainting at all.
///
/// Two modes. While a draw gesture is in progress, only stroke-related
/// state forces a repaint (brush color, brush width, the buffered point
/// count); freehand drawing is the only latency-sensitive path. Outside
/// a gesture, a repaint is forced whenever the scene revision moved.
#[derive(Debug, Default)]
pub struct RepaintTracker {
    last_revision: Option<u64>,
    last_stroke: Option<(usize, SerializableColor, u64)>,
}

impl RepaintTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check and record the current state; true means repaint.
    pub fn should_repaint(
        &mut self,
        scene: &Scene,
        in_progress_stroke: Option<&[Point]>,
        brush: &BrushStyle,
    ) -> bool {
        if let Some(points) = in_progress_stroke {
            let fingerprint = (points.len(), brush.color, brush.width.to_bits());
            let changed = self.last_stroke != Some(fingerprint);
            self.last_stroke = Some(fingerprint);
            changed
        } else {
            self.last_stroke = None;
            let changed = self.last_revision != Some(scene.revision);
            self.last_revision = Some(scene.revision);
            changed
        }
    }
}
