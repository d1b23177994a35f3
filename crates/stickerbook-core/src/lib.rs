//! Stickerbook Core Library
//!
//! Platform-agnostic engine for a pannable, zoomable sticker-book
//! canvas: coordinate transforms, scene model, tool state machine,
//! spatial queries, session orchestration, and persistence.

pub mod animation;
pub mod catalog;
pub mod minimap;
pub mod objects;
pub mod scene;
pub mod session;
pub mod snapshot;
pub mod spatial;
pub mod storage;
pub mod tools;
pub mod viewport;

pub use animation::ViewportAnimation;
pub use catalog::{Sticker, StickerCatalog};
pub use minimap::MinimapProjection;
pub use objects::{
    CanvasText, DrawingStroke, ObjectId, PlacedSticker, SerializableColor, StickerZone,
};
pub use scene::{ObjectKind, Scene};
pub use session::{CanvasSession, CanvasVariant, PendingRequest, SceneChangedCallback};
pub use spatial::{Hit, erase_near, hit_test};
pub use tools::{BrushStyle, GestureEvent, ToolEffect, ToolKind, ToolState};
pub use viewport::{MAX_ZOOM, MIN_ZOOM, Viewport};
