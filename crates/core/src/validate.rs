//! Pure validation predicates shared by all form pages.
//!
//! Every form validates its input with these functions before issuing any
//! network call, so a rejected submission never leaves the process. The
//! backend enforces the same rules; keeping the predicates in one pure
//! module means the two sides can only drift in one place.

use crate::types::{Email, HexColor};

/// Returns `true` if the value is non-empty after trimming whitespace.
#[must_use]
pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Returns `true` if the value parses as a structurally valid email address.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    Email::parse(value.trim()).is_ok()
}

/// Returns `true` if the value is a well-formed `#RRGGBB` color.
///
/// The empty string is accepted: the color is optional and an empty field
/// means "no color".
#[must_use]
pub fn is_valid_hex_color(value: &str) -> bool {
    value.is_empty() || HexColor::parse(value).is_ok()
}

/// Returns `true` if the value is a well-formed absolute URL.
///
/// The empty string is accepted: image URLs are optional and an empty field
/// means "no image".
#[must_use]
pub fn is_valid_url(value: &str) -> bool {
    value.is_empty() || url::Url::parse(value).is_ok()
}

/// Returns `true` if both values parse as finite coordinates.
#[must_use]
pub fn is_valid_coordinate_pair(latitude: &str, longitude: &str) -> bool {
    parse_finite(latitude).is_some() && parse_finite(longitude).is_some()
}

/// Returns `true` if the value parses as a finite percentage.
///
/// The empty string is accepted and treated as zero by callers.
#[must_use]
pub fn is_valid_percentage(value: &str) -> bool {
    value.trim().is_empty() || parse_finite(value).is_some()
}

/// Parse a string as a finite `f64`, rejecting NaN and infinities.
#[must_use]
pub fn parse_finite(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_present() {
        assert!(is_present("name"));
        assert!(is_present("  x  "));
        assert!(!is_present(""));
        assert!(!is_present("   "));
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("  a@b.com  "));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_is_valid_hex_color() {
        assert!(is_valid_hex_color("#FF9900"));
        assert!(is_valid_hex_color(""));
        assert!(!is_valid_hex_color("FF9900"));
        assert!(!is_valid_hex_color("#FF99"));
        assert!(!is_valid_hex_color("#ZZZZZZ"));
    }

    #[test]
    fn test_is_valid_url() {
        assert!(is_valid_url("https://example.com/img.png"));
        assert!(is_valid_url(""));
        assert!(!is_valid_url("not-a-url"));
        assert!(!is_valid_url("http//missing-colon"));
    }

    #[test]
    fn test_is_valid_coordinate_pair() {
        assert!(is_valid_coordinate_pair("19.4326", "-99.1332"));
        assert!(!is_valid_coordinate_pair("19.4326", "east"));
        assert!(!is_valid_coordinate_pair("", "-99.1332"));
        assert!(!is_valid_coordinate_pair("NaN", "0"));
    }

    #[test]
    fn test_is_valid_percentage() {
        assert!(is_valid_percentage("12.5"));
        assert!(is_valid_percentage("0"));
        assert!(is_valid_percentage(""));
        assert!(!is_valid_percentage("ten"));
        assert!(!is_valid_percentage("inf"));
    }

    #[test]
    fn test_parse_finite() {
        assert_eq!(parse_finite(" 1.5 "), Some(1.5));
        assert_eq!(parse_finite("abc"), None);
        assert_eq!(parse_finite("inf"), None);
        assert_eq!(parse_finite("NaN"), None);
    }
}
