//! RGBA colors and the `#RRGGBB[AA]` hex notation used by themes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Hex color parse failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Digit count (after an optional `#`) was neither 6 nor 8
    #[error("invalid length: expected 6 or 8 hex digits, found {len}")]
    InvalidLength { len: usize },

    /// A channel contained a non-hex character
    #[error("invalid hex digit in {fragment:?} at offset {offset}")]
    InvalidHexDigit { offset: usize, fragment: String },
}

/// Linear RGBA color with channels in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Color from float channels in [0, 1]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from 8-bit channels
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba8(r, g, b, 255)
    }

    /// Color from 8-bit channels including alpha
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        )
    }

    /// Channels quantized to bytes, clamped to [0, 1] first
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
    }

    /// `#RRGGBBAA`
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
    }
}

fn hex_digit(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        _ => None,
    }
}

/// Parse `#RRGGBB`, `#RRGGBBAA` or the same without the leading `#`.
///
/// Alpha defaults to 1 when only three channels are given. The error for a bad
/// digit carries the offending two-character channel and its byte offset in `text`.
pub fn parse_hex(text: &str) -> Result<Color, ColorParseError> {
    let (digits, prefix) = match text.strip_prefix('#') {
        Some(rest) => (rest, 1),
        None => (text, 0),
    };

    if digits.len() != 6 && digits.len() != 8 {
        return Err(ColorParseError::InvalidLength { len: digits.len() });
    }

    let mut channels = [1.0f32; 4];
    for (i, pair) in digits.as_bytes().chunks(2).enumerate() {
        match (hex_digit(pair[0]), hex_digit(pair[1])) {
            (Some(hi), Some(lo)) => channels[i] = f32::from(hi << 4 | lo) / 255.0,
            _ => {
                return Err(ColorParseError::InvalidHexDigit {
                    offset: prefix + 2 * i,
                    fragment: String::from_utf8_lossy(pair).into_owned(),
                })
            }
        }
    }

    let [r, g, b, a] = channels;
    Ok(Color::new(r, g, b, a))
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb_with_hash() {
        assert_eq!(parse_hex("#FF0000"), Ok(Color::new(1.0, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_parse_rgba_without_hash() {
        assert_eq!(parse_hex("00FF00FF"), Ok(Color::new(0.0, 1.0, 0.0, 1.0)));
    }

    #[test]
    fn test_parse_lowercase() {
        assert_eq!(parse_hex("#ff00ff80"), Ok(Color::rgba8(0xFF, 0x00, 0xFF, 0x80)));
    }

    #[test]
    fn test_invalid_digit_reports_fragment() {
        assert_eq!(
            parse_hex("#ZZZZZZ"),
            Err(ColorParseError::InvalidHexDigit { offset: 1, fragment: "ZZ".to_string() })
        );
        assert_eq!(
            parse_hex("12345G"),
            Err(ColorParseError::InvalidHexDigit { offset: 4, fragment: "5G".to_string() })
        );
    }

    #[test]
    fn test_invalid_length() {
        assert_eq!(parse_hex("#FFF"), Err(ColorParseError::InvalidLength { len: 3 }));
        assert_eq!(parse_hex(""), Err(ColorParseError::InvalidLength { len: 0 }));
        assert_eq!(parse_hex("#"), Err(ColorParseError::InvalidLength { len: 0 }));
        assert_eq!(parse_hex("#FFFFFFF"), Err(ColorParseError::InvalidLength { len: 7 }));
    }

    #[test]
    fn test_hex_output() {
        assert_eq!(Color::rgb8(0x12, 0x12, 0x14).to_hex(), "#121214FF");
        assert_eq!("#3793B2".parse::<Color>().map(Color::to_hex), Ok("#3793B2FF".to_string()));
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let json = serde_json::to_string(&Color::rgb8(0xAD, 0x62, 0x42)).unwrap();
        assert_eq!(json, "\"#AD6242FF\"");

        let back: Color = serde_json::from_str("\"#AD6242\"").unwrap();
        assert_eq!(back, Color::rgb8(0xAD, 0x62, 0x42));

        assert!(serde_json::from_str::<Color>("\"#AD62\"").is_err());
    }
}
