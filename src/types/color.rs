//! Hex color type and parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::{MapError, Result};

/// A hex color in canonical form: lowercase, `#`-prefixed, 3 or 6 digits.
///
/// Accepts `#RGB`, `#RRGGBB`, `0xRGB`, and `0xRRGGBB` on input; the digit
/// count is preserved, so `#0F0` canonicalizes to `#0f0`, not `#00ff00`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Color {
    hex: String,
}

impl Color {
    /// Parse a hex color string, normalizing the prefix and case.
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| MapError::Parse {
            message: format!("Invalid hex color: {}", s),
            help: Some("Use #RGB, #RRGGBB, 0xRGB, or 0xRRGGBB format".to_string()),
        })
    }

    /// Lenient form of [`Color::from_hex`] used by the field extractor.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let digits = s
            .strip_prefix('#')
            .or_else(|| s.strip_prefix("0x"))
            .or_else(|| s.strip_prefix("0X"))?;

        if digits.len() != 3 && digits.len() != 6 {
            return None;
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }

        Some(Self {
            hex: digits.to_ascii_lowercase(),
        })
    }

    /// The canonical `#`-prefixed string.
    pub fn as_hex(&self) -> String {
        format!("#{}", self.hex)
    }
}

impl FromStr for Color {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_6digit() {
        let c = Color::from_hex("#00FF00").unwrap();
        assert_eq!(c.as_hex(), "#00ff00");
    }

    #[test]
    fn test_from_hex_3digit() {
        let c = Color::from_hex("#0F0").unwrap();
        assert_eq!(c.as_hex(), "#0f0");
    }

    #[test]
    fn test_from_hex_0x_prefix() {
        let c = Color::from_hex("0x0F0").unwrap();
        assert_eq!(c.as_hex(), "#0f0");

        let c = Color::from_hex("0xA1B2C3").unwrap();
        assert_eq!(c.as_hex(), "#a1b2c3");
    }

    #[test]
    fn test_digit_count_preserved() {
        assert_eq!(Color::from_hex("#0F0").unwrap().as_hex(), "#0f0");
        assert_eq!(Color::from_hex("#00FF00").unwrap().as_hex(), "#00ff00");
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Color::from_hex("#GGG").is_err());
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("red").is_err());
        assert!(Color::from_hex("").is_err());
        // bare digits need a prefix
        assert!(Color::from_hex("00ff00").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Color::from_hex("#AbC").unwrap()), "#abc");
    }
}
