//! Canvas session: routes pointer gestures, owns the scene and tool
//! state, and notifies the persistence collaborator.
//!
//! The session runs entirely on its host's event/render loop. Gestures
//! arrive in screen space and are converted through the viewport before
//! tool dispatch. Persistence is a fire-and-forget callback invoked
//! after each discrete committed mutation and after gesture-complete
//! viewport changes, never per drag delta.

use crate::animation::ViewportAnimation;
use crate::catalog::StickerCatalog;
use crate::minimap::MinimapProjection;
use crate::objects::{CanvasText, ObjectId, PlacedSticker, SerializableColor, StickerZone};
use crate::scene::Scene;
use crate::tools::{
    self, BrushStyle, GestureEvent, ToolEffect, ToolKind, ToolState, ZoneDraft, ZonePlacement,
};
use crate::viewport::Viewport;
use kurbo::{Point, Size, Vec2};
use std::sync::Arc;

/// Which canvas surface this session drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CanvasVariant {
    /// The fixed-size drawing surface.
    Bounded,
    /// The unbounded pannable canvas.
    #[default]
    Infinite,
}

impl CanvasVariant {
    /// Erase radius in canvas units.
    pub fn erase_radius(self) -> f64 {
        match self {
            CanvasVariant::Bounded => 20.0,
            CanvasVariant::Infinite => 30.0,
        }
    }

    /// Whether the render pipeline applies visibility culling.
    pub fn culls(self) -> bool {
        matches!(self, CanvasVariant::Infinite)
    }
}

/// A synchronous collaborator request raised by a gesture and answered
/// by the host (chooser dialog, text entry, zone form).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PendingRequest {
    /// Pick a catalog sticker to place at this canvas point.
    StickerChoice { at: Point },
    /// Enter text for a new label at this canvas point.
    TextInput { at: Point },
    /// Re-edit an existing text label.
    TextEdit { id: ObjectId },
    /// Fill in name/theme/color for a zone with this geometry.
    ZoneDetails { placement: ZonePlacement },
}

/// Callback invoked with a scene snapshot after committed mutations.
pub type SceneChangedCallback = Box<dyn FnMut(&Scene)>;

/// One editing session over a scene.
pub struct CanvasSession {
    scene: Scene,
    catalog: Arc<StickerCatalog>,
    variant: CanvasVariant,
    tool: ToolState,
    /// Brush settings for the draw tool; also the color of new text.
    pub brush: BrushStyle,
    selection: Option<ObjectId>,
    zone_mode: bool,
    zone_draft: ZoneDraft,
    pending: Option<PendingRequest>,
    animation: Option<ViewportAnimation>,
    screen_size: Size,
    viewport_gesture_active: bool,
    on_scene_changed: Option<SceneChangedCallback>,
}

impl CanvasSession {
    /// Start a session over a fresh scene.
    pub fn new(catalog: Arc<StickerCatalog>, variant: CanvasVariant) -> Self {
        Self::with_scene(Scene::new(), catalog, variant)
    }

    /// Start a session over a loaded scene (reopened project).
    pub fn with_scene(scene: Scene, catalog: Arc<StickerCatalog>, variant: CanvasVariant) -> Self {
        Self {
            scene,
            catalog,
            variant,
            tool: ToolState::default(),
            brush: BrushStyle::default(),
            selection: None,
            zone_mode: false,
            zone_draft: ZoneDraft::default(),
            pending: None,
            animation: None,
            screen_size: Size::new(800.0, 600.0),
            viewport_gesture_active: false,
            on_scene_changed: None,
        }
    }

    /// Replace the scene (project switch), resetting all session state.
    pub fn load_scene(&mut self, scene: Scene) {
        self.scene = scene;
        self.tool = ToolState::for_tool(self.tool.kind());
        self.selection = None;
        self.zone_draft.cancel();
        self.pending = None;
        self.animation = None;
        self.viewport_gesture_active = false;
    }

    /// Register the persistence callback.
    pub fn set_on_scene_changed(&mut self, callback: SceneChangedCallback) {
        self.on_scene_changed = Some(callback);
    }

    /// Set the host surface size in screen pixels.
    pub fn set_screen_size(&mut self, width: f64, height: f64) {
        self.screen_size = Size::new(width, height);
    }

    /// The current scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// A plain-value snapshot of the scene, safe to serialize.
    pub fn scene_snapshot(&self) -> Scene {
        self.scene.clone()
    }

    /// The sticker catalog this session resolves references against.
    pub fn catalog(&self) -> &StickerCatalog {
        &self.catalog
    }

    /// The session variant.
    pub fn variant(&self) -> CanvasVariant {
        self.variant
    }

    /// The active tool.
    pub fn tool_kind(&self) -> ToolKind {
        self.tool.kind()
    }

    /// Switch tools, cancelling any in-progress gesture.
    pub fn set_tool(&mut self, kind: ToolKind) {
        self.tool = ToolState::for_tool(kind);
        self.pending = None;
    }

    /// Id of the currently selected object, if it still exists.
    pub fn selection(&self) -> Option<ObjectId> {
        self.selection.filter(|&id| self.scene.contains_id(id))
    }

    /// The in-progress stroke buffer, for the render overlay.
    pub fn in_progress_stroke(&self) -> Option<&[Point]> {
        self.tool.in_progress_stroke()
    }

    /// The pending collaborator request, if any.
    pub fn pending_request(&self) -> Option<&PendingRequest> {
        self.pending.as_ref()
    }

    /// The zone-creation overlay state: `(enabled, first tap)`.
    pub fn zone_overlay(&self) -> (bool, Option<Point>) {
        (self.zone_mode, self.zone_draft.start)
    }

    /// Convert a screen point to canvas space under the current view.
    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        self.scene
            .viewport
            .screen_to_canvas(screen_point, self.screen_size)
    }

    fn notify_scene_changed(&mut self) {
        log::trace!("scene changed, revision {}", self.scene.revision);
        if let Some(callback) = &mut self.on_scene_changed {
            callback(&self.scene);
        }
    }

    fn apply_effects(&mut self, effects: Vec<ToolEffect>) {
        for effect in effects {
            match effect {
                ToolEffect::SelectionChanged(selection) => self.selection = selection,
                ToolEffect::StickerChoiceRequested { at } => {
                    self.pending = Some(PendingRequest::StickerChoice { at });
                }
                ToolEffect::TextInputRequested { at } => {
                    // The infinite canvas anchors new text at the
                    // viewport center rather than the tap point.
                    let at = match self.variant {
                        CanvasVariant::Infinite => self.scene.viewport.center,
                        CanvasVariant::Bounded => at,
                    };
                    self.pending = Some(PendingRequest::TextInput { at });
                }
                ToolEffect::TextEditRequested { id } => {
                    self.pending = Some(PendingRequest::TextEdit { id });
                }
                ToolEffect::SceneChanged => self.notify_scene_changed(),
            }
        }
    }

    fn dispatch(&mut self, event: GestureEvent) {
        let state = std::mem::take(&mut self.tool);
        let scene = std::mem::take(&mut self.scene);
        let transition = tools::handle_event(
            state,
            event,
            scene,
            self.selection,
            &self.brush,
            self.variant.erase_radius(),
        );
        self.tool = transition.state;
        self.scene = transition.scene;
        self.apply_effects(transition.effects);
    }

    // --- Pointer entry points (screen space) ---

    /// Pointer down. Cancels any in-flight fly-to; zone-creation taps
    /// are captured before tool dispatch.
    pub fn pointer_down(&mut self, screen_point: Point) {
        self.animation = None;
        let canvas_point = self.screen_to_canvas(screen_point);

        if self.zone_mode {
            if let Some(placement) = self.zone_draft.tap(canvas_point) {
                self.pending = Some(PendingRequest::ZoneDetails { placement });
            }
            return;
        }

        self.dispatch(GestureEvent::PointerDown(canvas_point));
    }

    /// Pointer drag update with a screen-space delta.
    pub fn pointer_drag_update(&mut self, screen_point: Point, screen_delta: Vec2) {
        if self.zone_mode {
            return;
        }
        let canvas_point = self.screen_to_canvas(screen_point);
        let canvas_delta = screen_delta / self.scene.viewport.zoom;
        self.dispatch(GestureEvent::DragUpdate {
            position: canvas_point,
            delta: canvas_delta,
        });
    }

    /// Pointer up, completing the gesture.
    pub fn pointer_up(&mut self, screen_point: Point) {
        if self.zone_mode {
            return;
        }
        let canvas_point = self.screen_to_canvas(screen_point);
        self.dispatch(GestureEvent::PointerUp(canvas_point));
    }

    /// Double tap; re-edits a text label under the point. Cancels any
    /// in-flight fly-to, like every direct-manipulation gesture.
    pub fn double_tap(&mut self, screen_point: Point) {
        self.animation = None;
        let canvas_point = self.screen_to_canvas(screen_point);
        self.dispatch(GestureEvent::DoubleTap(canvas_point));
    }

    /// Two-finger scale gesture, routed directly to the viewport and
    /// bypassing tool dispatch. Cancels any in-flight fly-to.
    pub fn scale_gesture(&mut self, focal_screen: Point, scale_delta: f64, pan_delta: Vec2) {
        self.animation = None;
        self.scene
            .viewport
            .apply_gesture(pan_delta, scale_delta, focal_screen, self.screen_size);
        self.scene.touch_viewport();
        self.viewport_gesture_active = true;
    }

    /// Complete a viewport gesture (scale or minimap drag); persists
    /// the final viewport.
    pub fn end_viewport_gesture(&mut self) {
        if self.viewport_gesture_active {
            self.viewport_gesture_active = false;
            self.notify_scene_changed();
        }
    }

    // --- Navigation ---

    /// Advance the fly-to animation, if one is running.
    pub fn tick(&mut self, dt: f64) {
        let Some(animation) = &mut self.animation else {
            return;
        };
        animation.tick(dt);
        self.scene.viewport = animation.current();
        self.scene.touch_viewport();
        if animation.is_finished() {
            self.animation = None;
            self.notify_scene_changed();
        }
    }

    /// Whether a fly-to is in flight.
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Fly to a canvas point at a target zoom over `duration` seconds.
    pub fn fly_to(&mut self, center: Point, zoom: f64, duration: f64) {
        let target = Viewport::with_view(center, zoom);
        self.animation = Some(ViewportAnimation::new(self.scene.viewport, target, duration));
    }

    /// Fly back to the origin at zoom 1.0.
    pub fn fly_home(&mut self, duration: f64) {
        self.fly_to(Point::ZERO, 1.0, duration);
    }

    /// Fly so all content fits on screen with the given margin factor.
    pub fn fit_to_content(&mut self, margin_factor: f64, duration: f64) {
        let mut target = self.scene.viewport;
        target.fit_to_content(self.scene.content_bounds(), self.screen_size, margin_factor);
        self.animation = Some(ViewportAnimation::new(self.scene.viewport, target, duration));
    }

    /// Projection of the current content bounds onto a minimap.
    pub fn minimap_projection(&self, minimap_size: Size) -> MinimapProjection {
        MinimapProjection::new(self.scene.content_bounds(), minimap_size)
    }

    /// Tap on the minimap: fly the viewport to the tapped canvas point.
    pub fn minimap_tap(&mut self, minimap_point: Point, minimap_size: Size, duration: f64) {
        let target = self
            .minimap_projection(minimap_size)
            .to_canvas(minimap_point);
        self.fly_to(target, self.scene.viewport.zoom, duration);
    }

    /// Drag on the minimap: reposition the viewport directly. Complete
    /// with [`CanvasSession::end_viewport_gesture`].
    pub fn minimap_drag(&mut self, minimap_point: Point, minimap_size: Size) {
        self.animation = None;
        self.scene.viewport.center = self
            .minimap_projection(minimap_size)
            .to_canvas(minimap_point);
        self.scene.touch_viewport();
        self.viewport_gesture_active = true;
    }

    // --- Collaborator completions ---

    /// Answer a pending sticker choice with a catalog sticker id.
    /// Returns the placed object's id, or `None` if there is no pending
    /// choice or the id is not in the catalog.
    pub fn choose_sticker(&mut self, sticker_id: &str) -> Option<ObjectId> {
        let Some(PendingRequest::StickerChoice { at }) = self.pending else {
            return None;
        };
        if self.catalog.get(sticker_id).is_none() {
            log::warn!("sticker choice refers to unknown catalog id {sticker_id:?}");
            self.pending = None;
            return None;
        }
        self.pending = None;
        let id = self.scene.add_sticker(PlacedSticker::new(sticker_id, at));
        self.notify_scene_changed();
        Some(id)
    }

    /// Answer a pending text request. Empty (or whitespace-only)
    /// content cancels a new-label request and leaves a re-edit
    /// unchanged. Returns the affected text id.
    pub fn submit_text(&mut self, content: &str) -> Option<ObjectId> {
        let pending = self.pending.take()?;
        let content = content.trim();
        match pending {
            PendingRequest::TextInput { at } => {
                if content.is_empty() {
                    return None;
                }
                let id = self
                    .scene
                    .add_text(CanvasText::new(content, at, self.brush.color));
                self.notify_scene_changed();
                Some(id)
            }
            PendingRequest::TextEdit { id } => {
                if content.is_empty() || !self.scene.update_text(id, content) {
                    return None;
                }
                self.notify_scene_changed();
                Some(id)
            }
            other => {
                self.pending = Some(other);
                None
            }
        }
    }

    /// Answer a pending zone form. Captures the stickers inside the new
    /// radius as advisory members. Returns the zone's id.
    pub fn submit_zone(
        &mut self,
        name: &str,
        theme: &str,
        color: SerializableColor,
    ) -> Option<ObjectId> {
        let Some(PendingRequest::ZoneDetails { placement }) = self.pending else {
            return None;
        };
        self.pending = None;

        let mut zone = StickerZone::new(name, theme, placement.center, placement.radius, color);
        zone.sticker_ids = self
            .scene
            .stickers
            .iter()
            .filter(|s| s.position.distance(placement.center) <= zone.radius)
            .map(|s| s.id)
            .collect();
        let id = self.scene.add_zone(zone);
        self.notify_scene_changed();
        Some(id)
    }

    /// Dismiss the pending collaborator request without acting on it.
    pub fn cancel_request(&mut self) {
        self.pending = None;
    }

    // --- Zone mode and explicit edits ---

    /// Enable or disable the zone-creation overlay.
    pub fn set_zone_mode(&mut self, enabled: bool) {
        self.zone_mode = enabled;
        if !enabled {
            self.zone_draft.cancel();
        }
    }

    /// Delete the selected object, if any.
    pub fn delete_selected(&mut self) -> bool {
        let Some(id) = self.selection() else {
            return false;
        };
        self.selection = None;
        if self.scene.remove(id).is_some() {
            self.notify_scene_changed();
            true
        } else {
            false
        }
    }
}
