//! Hex color type for category accents.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`HexColor`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum HexColorError {
    /// The input does not start with `#`.
    #[error("color must start with '#'")]
    MissingHash,
    /// The input is not exactly seven characters (`#` plus six hex digits).
    #[error("color must be exactly #RRGGBB (7 characters)")]
    WrongLength,
    /// The input contains a non-hexadecimal digit.
    #[error("color must contain only hexadecimal digits")]
    InvalidDigit,
}

/// A `#RRGGBB` color string.
///
/// Categories carry an optional accent color; the backend stores it as a
/// plain string, so this type only enforces the shape, not the palette.
///
/// ```
/// use barrio_core::HexColor;
///
/// assert!(HexColor::parse("#FF9900").is_ok());
/// assert!(HexColor::parse("#ff9900").is_ok());
/// assert!(HexColor::parse("FF9900").is_err());   // missing '#'
/// assert!(HexColor::parse("#FF99").is_err());    // wrong length
/// assert!(HexColor::parse("#GG0000").is_err());  // bad digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct HexColor(String);

impl HexColor {
    /// Parse a `HexColor` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error unless the input is `#` followed by exactly six
    /// hexadecimal digits.
    pub fn parse(s: &str) -> Result<Self, HexColorError> {
        let rest = s.strip_prefix('#').ok_or(HexColorError::MissingHash)?;

        if rest.len() != 6 {
            return Err(HexColorError::WrongLength);
        }

        if !rest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HexColorError::InvalidDigit);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the color as a string slice, including the leading `#`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for HexColor {
    type Err = HexColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
