//! Visual Theme - Immutable Render Configuration
//!
//! The palette and font-size table are a value handed to the composer,
//! never ambient globals. Colors serialize as `#RRGGBB` strings so a
//! theme file reads like the CSS palette it mimics.

use std::fmt;

use image::Rgb;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An opaque RGB color. Serde representation is `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub [u8; 3]);

impl Color {
    /// Parse a `#RRGGBB` (or `RRGGBB`) hex string.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError(s.to_string()));
        }
        let mut rgb = [0u8; 3];
        for (i, chunk) in rgb.iter_mut().enumerate() {
            // Slice bounds checked by the length test above.
            *chunk = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16)
                .map_err(|_| ColorParseError(s.to_string()))?;
        }
        Ok(Color(rgb))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }

    pub fn rgb(self) -> Rgb<u8> {
        Rgb(self.0)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("invalid color literal: {0}")]
pub struct ColorParseError(String);

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl<'de> Visitor<'de> for HexVisitor {
            type Value = Color;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a #RRGGBB color string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Color, E> {
                Color::from_hex(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

/// Font sizes in pixels, by role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontSizes {
    pub title: u32,
    pub subtitle: u32,
    pub heading: u32,
    pub subheading: u32,
    pub body: u32,
    pub small: u32,
    pub tiny: u32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            title: 28,
            subtitle: 24,
            heading: 20,
            subheading: 16,
            body: 14,
            small: 12,
            tiny: 11,
        }
    }
}

/// The full dashboard palette. Defaults reproduce the concept's
/// Tailwind-flavored colors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub primary: Color,
    pub primary_light: Color,
    pub secondary: Color,
    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub gray_50: Color,
    pub gray_100: Color,
    pub gray_200: Color,
    pub gray_300: Color,
    pub gray_400: Color,
    pub gray_500: Color,
    pub gray_600: Color,
    pub gray_700: Color,
    pub gray_800: Color,
    pub gray_900: Color,
    pub white: Color,
    pub card_bg: Color,
    pub sidebar_bg: Color,
    pub sizes: FontSizes,
}

impl Default for Theme {
    fn default() -> Self {
        // Helper only valid for the literal table below.
        fn c(hex: &str) -> Color {
            Color::from_hex(hex).unwrap_or(Color([0, 0, 0]))
        }
        Self {
            primary: c("#2563eb"),
            primary_light: c("#3b82f6"),
            secondary: c("#8b5cf6"),
            success: c("#10b981"),
            warning: c("#f59e0b"),
            danger: c("#ef4444"),
            gray_50: c("#f9fafb"),
            gray_100: c("#f3f4f6"),
            gray_200: c("#e5e7eb"),
            gray_300: c("#d1d5db"),
            gray_400: c("#9ca3af"),
            gray_500: c("#6b7280"),
            gray_600: c("#4b5563"),
            gray_700: c("#374151"),
            gray_800: c("#1f2937"),
            gray_900: c("#111827"),
            white: c("#ffffff"),
            card_bg: c("#ffffff"),
            sidebar_bg: c("#f8fafc"),
            sizes: FontSizes::default(),
        }
    }
}

/// Three-bucket classification applied to every 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Success,
    Warning,
    Danger,
}

impl Tier {
    /// score >= 80 -> Success, 60..=79 -> Warning, < 60 -> Danger.
    pub fn of(score: u8) -> Self {
        if score >= 80 {
            Tier::Success
        } else if score >= 60 {
            Tier::Warning
        } else {
            Tier::Danger
        }
    }
}

impl Theme {
    /// Map a 0-100 score onto its tier color.
    pub fn tier_color(&self, score: u8) -> Color {
        match Tier::of(score) {
            Tier::Success => self.success,
            Tier::Warning => self.warning,
            Tier::Danger => self.danger,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_roundtrip() {
        let c = Color::from_hex("#2563eb").unwrap();
        assert_eq!(c, Color([0x25, 0x63, 0xeb]));
        assert_eq!(c.to_hex(), "#2563eb");
    }

    #[test]
    fn hex_rejects_garbage() {
        assert!(Color::from_hex("#25").is_err());
        assert!(Color::from_hex("nothex").is_err());
        assert!(Color::from_hex("#12345g").is_err());
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(Tier::of(59), Tier::Danger);
        assert_eq!(Tier::of(60), Tier::Warning);
        assert_eq!(Tier::of(79), Tier::Warning);
        assert_eq!(Tier::of(80), Tier::Success);
    }

    #[test]
    fn tier_colors_follow_palette() {
        let theme = Theme::default();
        assert_eq!(theme.tier_color(95), theme.success);
        assert_eq!(theme.tier_color(70), theme.warning);
        assert_eq!(theme.tier_color(10), theme.danger);
    }

    #[test]
    fn theme_deserializes_partial_override() {
        let theme: Theme = serde_json::from_str(r##"{"primary": "#000000"}"##).unwrap();
        assert_eq!(theme.primary, Color([0, 0, 0]));
        // Untouched fields keep their defaults.
        assert_eq!(theme.success, Theme::default().success);
    }
}
