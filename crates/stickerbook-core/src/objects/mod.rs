//! Placed-object definitions for the sticker-book canvas.

mod sticker;
mod stroke;
mod text;
mod zone;

pub use sticker::PlacedSticker;
pub use stroke::{DrawingStroke, LineCap, LineJoin, StrokePaint};
pub use text::{CanvasText, FontWeight, MAX_TEXT_LEN};
pub use zone::{StickerZone, ZONE_MAX_RADIUS, ZONE_MIN_RADIUS};

use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for placed objects.
pub type ObjectId = Uuid;

/// Creation timestamp in unix milliseconds.
pub type Timestamp = i64;

/// Current wall-clock time in unix milliseconds.
pub fn now_millis() -> Timestamp {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or(0)
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Encode as a `#rrggbb` or `#rrggbbaa` hex string (alpha omitted
    /// when fully opaque).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Parse a `#rgb`, `#rrggbb` or `#rrggbbaa` hex string.
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.strip_prefix('#')?.trim();
        // Length checks below are byte lengths; non-ASCII input would
        // slice mid-character.
        if !hex.is_ascii() {
            return None;
        }
        match hex.len() {
            3 => {
                let r = u8::from_str_radix(&hex[0..1], 16).ok()? * 17;
                let g = u8::from_str_radix(&hex[1..2], 16).ok()? * 17;
                let b = u8::from_str_radix(&hex[2..3], 16).ok()? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b, 255))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip_opaque() {
        let c = SerializableColor::new(0x12, 0xab, 0xff, 255);
        assert_eq!(c.to_hex(), "#12abff");
        assert_eq!(SerializableColor::from_hex("#12abff"), Some(c));
    }

    #[test]
    fn test_hex_roundtrip_with_alpha() {
        let c = SerializableColor::new(1, 2, 3, 128);
        assert_eq!(c.to_hex(), "#01020380");
        assert_eq!(SerializableColor::from_hex(&c.to_hex()), Some(c));
    }

    #[test]
    fn test_short_hex() {
        assert_eq!(
            SerializableColor::from_hex("#fff"),
            Some(SerializableColor::white())
        );
    }

    #[test]
    fn test_invalid_hex() {
        assert_eq!(SerializableColor::from_hex("red"), None);
        assert_eq!(SerializableColor::from_hex("#12345"), None);
    }

    #[test]
    fn test_non_ascii_hex_is_rejected_not_panicking() {
        // Multi-byte characters whose byte length lands on a valid arm
        assert_eq!(SerializableColor::from_hex("#\u{20ac}"), None);
        assert_eq!(SerializableColor::from_hex("#\u{20ac}ab"), None);
        assert_eq!(SerializableColor::from_hex("#\u{20ac}\u{20ac}ab"), None);
    }

    #[test]
    fn test_peniko_conversion() {
        let c = SerializableColor::new(10, 20, 30, 255);
        let peniko: Color = c.into();
        let back: SerializableColor = peniko.into();
        assert_eq!(c, back);
    }
}
