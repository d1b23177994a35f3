//! Tool state machine: interprets pointer gestures according to the
//! active tool.
//!
//! The machine is a tagged variant plus a pure transition function, so
//! tool behavior is testable without any rendering surface. Gesture
//! positions here are already in canvas space; the session converts
//! from screen space before dispatching.

use crate::objects::{DrawingStroke, ObjectId, SerializableColor};
use crate::scene::{ObjectKind, Scene};
use crate::spatial;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Minimum distance in canvas units between consecutive buffered stroke
/// points, to suppress input noise while preserving responsiveness.
pub const MIN_POINT_DISTANCE: f64 = 1.0;

/// Available tools, one active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    PlaceSticker,
    AddText,
    Draw,
    Erase,
}

/// Drag-in-progress bookkeeping for the select tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragState {
    /// Object being moved.
    pub target: ObjectId,
    /// Whether any drag delta was applied since pointer-down.
    pub moved: bool,
}

/// The active tool together with its in-progress gesture state.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolState {
    Select { drag: Option<DragState> },
    PlaceSticker,
    AddText,
    Draw { buffer: Vec<Point> },
    Erase { erased_any: bool },
}

impl Default for ToolState {
    fn default() -> Self {
        Self::Select { drag: None }
    }
}

impl ToolState {
    /// Fresh idle state for a tool.
    pub fn for_tool(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Select => Self::Select { drag: None },
            ToolKind::PlaceSticker => Self::PlaceSticker,
            ToolKind::AddText => Self::AddText,
            ToolKind::Draw => Self::Draw { buffer: Vec::new() },
            ToolKind::Erase => Self::Erase { erased_any: false },
        }
    }

    /// Which tool this state belongs to.
    pub fn kind(&self) -> ToolKind {
        match self {
            Self::Select { .. } => ToolKind::Select,
            Self::PlaceSticker => ToolKind::PlaceSticker,
            Self::AddText => ToolKind::AddText,
            Self::Draw { .. } => ToolKind::Draw,
            Self::Erase { .. } => ToolKind::Erase,
        }
    }

    /// The in-progress stroke buffer, when a draw gesture is active.
    pub fn in_progress_stroke(&self) -> Option<&[Point]> {
        match self {
            Self::Draw { buffer } if !buffer.is_empty() => Some(buffer),
            _ => None,
        }
    }

    /// Whether a gesture is currently in progress.
    pub fn is_active(&self) -> bool {
        match self {
            Self::Select { drag } => drag.is_some(),
            Self::Draw { buffer } => !buffer.is_empty(),
            Self::Erase { erased_any } => *erased_any,
            _ => false,
        }
    }
}

/// Current brush settings for the draw tool (and text color).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushStyle {
    pub color: SerializableColor,
    pub width: f64,
}

impl Default for BrushStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            width: 4.0,
        }
    }
}

/// A discrete gesture event in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    PointerDown(Point),
    DragUpdate { position: Point, delta: Vec2 },
    PointerUp(Point),
    DoubleTap(Point),
}

/// Side effects a transition asks the session to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolEffect {
    /// Selection changed (or cleared).
    SelectionChanged(Option<ObjectId>),
    /// Open the sticker catalog chooser for a placement at this point.
    StickerChoiceRequested { at: Point },
    /// Open a text-entry surface for a new label at this point.
    TextInputRequested { at: Point },
    /// Open the text-entry surface to re-edit an existing label.
    TextEditRequested { id: ObjectId },
    /// A discrete mutation was committed; persist the scene.
    SceneChanged,
}

/// Result of one transition step.
#[derive(Debug, Clone)]
pub struct Transition {
    pub state: ToolState,
    pub scene: Scene,
    pub effects: Vec<ToolEffect>,
}

/// Apply one gesture event to the tool state machine.
///
/// `selection` is the session's current ID-based selection, consulted
/// for drag targets and cleared (via an effect) when erase removes the
/// selected object. `erase_radius` comes from the session's variant
/// configuration.
pub fn handle_event(
    state: ToolState,
    event: GestureEvent,
    mut scene: Scene,
    selection: Option<ObjectId>,
    brush: &BrushStyle,
    erase_radius: f64,
) -> Transition {
    let mut effects = Vec::new();

    // Double-tap re-edits a text label regardless of the active tool.
    if let GestureEvent::DoubleTap(point) = event {
        if let Some(hit) = spatial::hit_test(&scene, point) {
            if hit.kind == ObjectKind::Text {
                effects.push(ToolEffect::TextEditRequested { id: hit.id });
            }
        }
        return Transition {
            state,
            scene,
            effects,
        };
    }

    let state = match state {
        ToolState::Select { drag } => match event {
            GestureEvent::PointerDown(point) => {
                let hit = spatial::hit_test(&scene, point);
                let target = hit.map(|h| h.id);
                effects.push(ToolEffect::SelectionChanged(target));
                ToolState::Select {
                    drag: target.map(|target| DragState {
                        target,
                        moved: false,
                    }),
                }
            }
            GestureEvent::DragUpdate { delta, .. } => {
                let drag = drag.map(|mut d| {
                    if scene.translate(d.target, delta) {
                        d.moved = true;
                    }
                    d
                });
                ToolState::Select { drag }
            }
            GestureEvent::PointerUp(_) => {
                if drag.is_some_and(|d| d.moved) {
                    effects.push(ToolEffect::SceneChanged);
                }
                ToolState::Select { drag: None }
            }
            GestureEvent::DoubleTap(_) => ToolState::Select { drag },
        },

        ToolState::PlaceSticker => {
            if let GestureEvent::PointerDown(point) = event {
                effects.push(ToolEffect::StickerChoiceRequested { at: point });
            }
            ToolState::PlaceSticker
        }

        ToolState::AddText => {
            if let GestureEvent::PointerDown(point) = event {
                effects.push(ToolEffect::TextInputRequested { at: point });
            }
            ToolState::AddText
        }

        ToolState::Draw { mut buffer } => match event {
            GestureEvent::PointerDown(point) => {
                buffer.clear();
                buffer.push(point);
                ToolState::Draw { buffer }
            }
            GestureEvent::DragUpdate { position, .. } => {
                if !buffer.is_empty() && accept_point(&buffer, position) {
                    buffer.push(position);
                }
                ToolState::Draw { buffer }
            }
            GestureEvent::PointerUp(position) => {
                if !buffer.is_empty() && accept_point(&buffer, position) {
                    buffer.push(position);
                }
                // A buffer of exactly one point is still committed and
                // renders as a filled dot; an empty buffer is a no-op.
                if let Some(stroke) =
                    DrawingStroke::commit(std::mem::take(&mut buffer), brush.color, brush.width)
                {
                    log::debug!("committed stroke with {} points", stroke.points.len());
                    scene.add_stroke(stroke);
                    effects.push(ToolEffect::SceneChanged);
                }
                ToolState::Draw { buffer: Vec::new() }
            }
            GestureEvent::DoubleTap(_) => ToolState::Draw { buffer },
        },

        ToolState::Erase { mut erased_any } => match event {
            GestureEvent::PointerDown(point) | GestureEvent::DragUpdate { position: point, .. } => {
                let removed = spatial::erase_near(&mut scene, point, erase_radius);
                if !removed.is_empty() {
                    erased_any = true;
                    if selection.is_some_and(|id| removed.contains(&id)) {
                        effects.push(ToolEffect::SelectionChanged(None));
                    }
                }
                ToolState::Erase { erased_any }
            }
            GestureEvent::PointerUp(_) => {
                if erased_any {
                    effects.push(ToolEffect::SceneChanged);
                }
                ToolState::Erase { erased_any: false }
            }
            GestureEvent::DoubleTap(_) => ToolState::Erase { erased_any },
        },
    };

    Transition {
        state,
        scene,
        effects,
    }
}

fn accept_point(buffer: &[Point], candidate: Point) -> bool {
    buffer
        .last()
        .is_none_or(|last| last.distance(candidate) >= MIN_POINT_DISTANCE)
}

/// Two-tap zone creation state, orthogonal to the active tool.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ZoneDraft {
    /// First tap, when recorded.
    pub start: Option<Point>,
}

/// Geometry computed from a completed two-tap zone gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZonePlacement {
    pub center: Point,
    pub radius: f64,
}

impl ZoneDraft {
    /// Record a tap. The first tap stores the start point; the second
    /// produces the zone placement (center = midpoint, radius =
    /// clamped half-distance) and resets the draft.
    pub fn tap(&mut self, point: Point) -> Option<ZonePlacement> {
        match self.start.take() {
            None => {
                self.start = Some(point);
                None
            }
            Some(start) => {
                let center = start.midpoint(point);
                let radius = (start.distance(point) / 2.0)
                    .clamp(crate::objects::ZONE_MIN_RADIUS, crate::objects::ZONE_MAX_RADIUS);
                Some(ZonePlacement { center, radius })
            }
        }
    }

    /// Abandon the draft.
    pub fn cancel(&mut self) {
        self.start = None;
    }
}
