//! Label appearance.
//!
//! A label that still needs more than one key is drawn in the "first motion"
//! colours; a label one key away from jumping uses the "final motion" pair.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {0:?}, expected #RRGGBB or #RRGGBBAA")]
pub struct ParseColorError(String);

/// An sRGB colour with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(err());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Color::rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelColors {
    pub foreground: Color,
    pub background: Color,
}

/// A single colour setting, as pushed by the host on configuration change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleField {
    FirstMotionForeground,
    FirstMotionBackground,
    FinalMotionForeground,
    FinalMotionBackground,
}

impl StyleField {
    pub fn is_foreground(self) -> bool {
        matches!(
            self,
            StyleField::FirstMotionForeground | StyleField::FinalMotionForeground
        )
    }

    /// Whether a label with `remaining` keys left is drawn with this field.
    pub fn applies_to(self, remaining: usize) -> bool {
        match self {
            StyleField::FirstMotionForeground | StyleField::FirstMotionBackground => {
                remaining > 1
            }
            StyleField::FinalMotionForeground | StyleField::FinalMotionBackground => {
                remaining == 1
            }
        }
    }
}

/// Font and colours shared by every label of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelStyle {
    pub font_size: f32,
    pub typeface: String,
    pub first_motion: LabelColors,
    pub final_motion: LabelColors,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            typeface: "monospace".to_string(),
            first_motion: LabelColors {
                foreground: Color::rgb(0xFF, 0xFF, 0xFF),
                background: Color::rgb(0xB2, 0x22, 0x22),
            },
            final_motion: LabelColors {
                foreground: Color::rgb(0x00, 0x00, 0x00),
                background: Color::rgb(0xFF, 0xD7, 0x00),
            },
        }
    }
}

impl LabelStyle {
    /// Colours for a label whose remaining text is `remaining`.
    pub fn colors_for(&self, remaining: &str) -> LabelColors {
        if remaining.chars().count() > 1 {
            self.first_motion
        } else {
            self.final_motion
        }
    }

    pub fn set(&mut self, field: StyleField, color: Color) {
        match field {
            StyleField::FirstMotionForeground => self.first_motion.foreground = color,
            StyleField::FirstMotionBackground => self.first_motion.background = color,
            StyleField::FinalMotionForeground => self.final_motion.foreground = color,
            StyleField::FinalMotionBackground => self.final_motion.background = color,
        }
    }
}
