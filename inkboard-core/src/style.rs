//! Colors and shared drawing style
//!
//! Colors are stored as RGBA bytes but serialize as CSS hex literals
//! (`#rrggbb` / `#rrggbbaa`), which is the form board records and templates
//! carry on the wire.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use vello::peniko::{Brush, Color as PenikoColor};

/// Error returned when a hex color literal cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid color literal {0:?}")]
pub struct ParseColorError(pub String);

/// Serializable RGBA color
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create from RGB (opaque)
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };

    /// Parse a `#rrggbb` or `#rrggbbaa` literal
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.is_ascii() {
            return Err(ParseColorError(s.to_string()));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ParseColorError(s.to_string()))
        };
        match digits.len() {
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => Err(ParseColorError(s.to_string())),
        }
    }

    /// Format as a hex literal; the alpha pair is omitted when fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Convert to peniko Color
    pub fn to_peniko(&self) -> PenikoColor {
        PenikoColor::from_rgba8(self.r, self.g, self.b, self.a)
    }

    /// Convert to peniko Brush
    pub fn to_brush(&self) -> Brush {
        Brush::Solid(self.to_peniko())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// Fill, stroke and stroke width shared by every primitive
///
/// The editor threads one of these through as the "current brush": the style
/// applied to newly drawn primitives, and the target of property edits when
/// nothing is selected.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub fill: Color,
    pub stroke: Color,
    #[serde(rename = "strokeWidth")]
    pub stroke_width: f64,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: Color::rgb(217, 217, 217),
            stroke: Color::BLACK,
            stroke_width: 2.0,
        }
    }
}

impl Style {
    /// Set the fill color
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = fill;
        self
    }

    /// Set the stroke color
    pub fn with_stroke(mut self, stroke: Color) -> Self {
        self.stroke = stroke;
        self
    }

    /// Set the stroke width
    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip() {
        let color = Color::rgb(255, 0, 0);
        assert_eq!(color.to_hex(), "#ff0000");
        assert_eq!(Color::from_hex("#ff0000").unwrap(), color);

        let translucent = Color::new(0, 128, 255, 64);
        assert_eq!(translucent.to_hex(), "#0080ff40");
        assert_eq!(Color::from_hex("#0080ff40").unwrap(), translucent);
    }

    #[test]
    fn test_hex_parse_rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("red").is_err());
        assert!(Color::from_hex("#gggggg").is_err());
    }

    #[test]
    fn test_serde_as_hex_string() {
        let color = Color::rgb(18, 52, 86);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#123456\"");

        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
    }
}
