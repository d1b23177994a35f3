//! Read-only catalog of available sticker definitions.

use crate::objects::SerializableColor;
use serde::{Deserialize, Serialize};

/// A sticker definition owned by the catalog.
///
/// Placed stickers reference these by id; the definition is never
/// copied into the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sticker {
    /// Stable catalog id.
    pub id: String,
    /// Display name, also the deterministic fallback when the glyph
    /// cannot be rendered.
    pub name: String,
    /// Glyph or image reference (emoji, asset path, URL).
    pub glyph: String,
    /// Default background color behind the glyph.
    pub background: SerializableColor,
}

impl Sticker {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        glyph: impl Into<String>,
        background: SerializableColor,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            glyph: glyph.into(),
            background,
        }
    }
}

/// Ordered, read-only collection of sticker definitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StickerCatalog {
    stickers: Vec<Sticker>,
}

impl StickerCatalog {
    /// Create a catalog from an ordered list of definitions.
    pub fn new(stickers: Vec<Sticker>) -> Self {
        Self { stickers }
    }

    /// Look up a sticker definition by id.
    pub fn get(&self, id: &str) -> Option<&Sticker> {
        self.stickers.iter().find(|s| s.id == id)
    }

    /// Iterate definitions in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Sticker> {
        self.stickers.iter()
    }

    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }
}
