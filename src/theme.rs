//! Theme Module
//! Colors and the semantic palette shared by every chart.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Color must look like #rrggbb or #rrggbbaa, got {0:?}")]
    BadFormat(String),
}

/// An sRGB color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Gridline gray
    pub const GRID: Color = Color::rgb(0xe2, 0xe8, 0xf0);
    /// Axis and label slate
    pub const SLATE: Color = Color::rgb(0x64, 0x74, 0x8b);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let bad = || ColorParseError::BadFormat(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(bad)?;
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(bad());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| bad());
        let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, alpha))
    }

    /// Same color with the given opacity (0.0 - 1.0).
    pub fn with_alpha(self, alpha: f64) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self { a, ..self }
    }

    /// Same color with a raw 8-bit alpha, like appending `80` to a hex string.
    pub const fn with_alpha_u8(self, a: u8) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl From<Color> for egui::Color32 {
    fn from(c: Color) -> Self {
        egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
    }
}

/// Semantic color roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Danger,
    Info,
    Purple,
}

/// Role -> color mapping supplied to the renderers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub danger: Color,
    pub info: Color,
    pub purple: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Color::rgb(0x25, 0x63, 0xeb),   // Blue
            secondary: Color::rgb(0x10, 0xb9, 0x81), // Green
            accent: Color::rgb(0xf5, 0x9e, 0x0b),    // Amber
            danger: Color::rgb(0xef, 0x44, 0x44),    // Red
            info: Color::rgb(0x06, 0xb6, 0xd4),      // Cyan
            purple: Color::rgb(0x8b, 0x5c, 0xf6),    // Violet
        }
    }
}

impl Palette {
    pub fn get(&self, role: ColorRole) -> Color {
        match role {
            ColorRole::Primary => self.primary,
            ColorRole::Secondary => self.secondary,
            ColorRole::Accent => self.accent,
            ColorRole::Danger => self.danger,
            ColorRole::Info => self.info,
            ColorRole::Purple => self.purple,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_and_eight_digit_hex() {
        assert_eq!(Color::from_hex("#2563eb"), Ok(Color::rgb(0x25, 0x63, 0xeb)));
        assert_eq!(
            Color::from_hex("#2563eb80"),
            Ok(Color::rgba(0x25, 0x63, 0xeb, 0x80))
        );
    }

    #[test]
    fn rejects_malformed_hex() {
        for bad in ["2563eb", "#2563e", "#zzzzzz", "#2563eb8", "#ééé"] {
            assert!(Color::from_hex(bad).is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn hex_survives_serde() {
        let palette = Palette::default();
        let json = serde_json::to_string(&palette).unwrap();
        assert!(json.contains("\"primary\":\"#2563eb\""));
        let back: Palette = serde_json::from_str(&json).unwrap();
        assert_eq!(back, palette);
    }

    #[test]
    fn partial_palette_keeps_defaults() {
        let palette: Palette = serde_json::from_str(r##"{"danger":"#000000"}"##).unwrap();
        assert_eq!(palette.danger, Color::BLACK);
        assert_eq!(palette.primary, Palette::default().primary);
    }

    #[test]
    fn alpha_helpers() {
        let c = Color::rgb(10, 20, 30);
        assert_eq!(c.with_alpha(0.2).a, 51);
        assert_eq!(c.with_alpha(2.0).a, 255);
        assert_eq!(c.with_alpha_u8(0x80).a, 0x80);
        assert_eq!(c.with_alpha_u8(0x80).to_hex(), "#0a141e80");
    }
}
