//! Colour tokens.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TesseractError};

/// An sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Brand yellow, the default stroke colour
    pub const YELLOW: Color = Color::rgb(0xFF, 0xCB, 0x00);
    /// Brand blue
    pub const BLUE: Color = Color::rgb(0x59, 0x68, 0xEA);
    /// Off-white
    pub const WHITE: Color = Color::rgb(0xF7, 0xF7, 0xF7);
    /// Background dark
    pub const DARK: Color = Color::rgb(0x1A, 0x1A, 0x1E);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB` (the `#` is optional)
    pub fn parse(value: &str) -> Result<Self> {
        let invalid = |reason: &str| TesseractError::InvalidColor {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let digits = value.trim().trim_start_matches('#');
        let expanded = match digits.len() {
            6 => digits.to_string(),
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            _ => return Err(invalid("expected 3 or 6 hex digits")),
        };

        let bytes = hex::decode(&expanded).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self::rgb(bytes[0], bytes[1], bytes[2]))
    }

    /// `#RRGGBB`, upper case
    pub fn to_hex(&self) -> String {
        format!("#{}", hex::encode_upper([self.r, self.g, self.b]))
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::YELLOW
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = TesseractError;

    fn from_str(s: &str) -> Result<Self> {
        Color::parse(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::parse(&s).map_err(serde::de::Error::custom)
    }
}
