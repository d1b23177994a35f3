//! A text label placed on the canvas.

use super::{ObjectId, SerializableColor, Timestamp, now_millis};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum text length in characters; longer input is truncated.
pub const MAX_TEXT_LEN: usize = 500;

/// Font weight options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    Light,
    #[default]
    Regular,
    Heavy,
}

impl FontWeight {
    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            FontWeight::Light => "Light",
            FontWeight::Regular => "Regular",
            FontWeight::Heavy => "Heavy",
        }
    }
}

/// A text label on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasText {
    pub id: ObjectId,
    /// Literal text content, bounded to [`MAX_TEXT_LEN`] characters.
    pub text: String,
    /// Position in canvas space.
    pub position: Point,
    /// Rotation in radians.
    pub rotation: f64,
    /// Text color.
    pub color: SerializableColor,
    /// Font size in canvas units.
    pub font_size: f64,
    /// Font weight.
    #[serde(default)]
    pub font_weight: FontWeight,
    /// Optional font family name; the renderer picks its default when
    /// absent.
    #[serde(default)]
    pub font_family: Option<String>,
    /// When the text was created, unix millis.
    pub created_at: Timestamp,
}

impl CanvasText {
    /// Default font size in canvas units.
    pub const DEFAULT_FONT_SIZE: f64 = 24.0;

    /// Create a text label at a canvas position.
    pub fn new(text: impl Into<String>, position: Point, color: SerializableColor) -> Self {
        Self::with_timestamp(text, position, color, now_millis())
    }

    /// Create a text label with an explicit creation timestamp.
    pub fn with_timestamp(
        text: impl Into<String>,
        position: Point,
        color: SerializableColor,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: bounded(text.into()),
            position,
            rotation: 0.0,
            color,
            font_size: Self::DEFAULT_FONT_SIZE,
            font_weight: FontWeight::default(),
            font_family: None,
            created_at,
        }
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f64) -> Self {
        self.font_size = size;
        self
    }

    /// Replace the literal text (re-edit), keeping the bound.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = bounded(text.into());
    }

    /// Move the text by a canvas-space delta.
    pub fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

fn bounded(text: String) -> String {
    if text.chars().count() <= MAX_TEXT_LEN {
        text
    } else {
        text.chars().take(MAX_TEXT_LEN).collect()
    }
}
