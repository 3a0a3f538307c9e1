//! Session cookie construction and inspection.
//!
//! The credential is an opaque bearer token minted by the backend. The
//! console stores it in a single HTTP cookie and never looks inside it;
//! the only fact the gate consults is whether the cookie is present.

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Name of the session cookie.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Session lifetime: one hour from issuance.
pub const SESSION_TTL: Duration = Duration::hours(1);

/// Build the session cookie carrying a freshly minted token.
#[must_use]
pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token.to_owned()))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(SESSION_TTL)
        .build()
}

/// Build the cookie that clears the session: empty value, zero max-age.
#[must_use]
pub fn expired_session_cookie() -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// Whether the request carries a non-empty session cookie.
///
/// A lingering cleared cookie (empty value) does not count as a credential.
#[must_use]
pub fn has_session_cookie(headers: &HeaderMap) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            Some((name.trim(), value.trim()))
        })
        .any(|(name, value)| name == ACCESS_TOKEN_COOKIE && !value.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok-123");
        assert_eq!(cookie.name(), "access_token");
        assert_eq!(cookie.value(), "tok-123");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(SESSION_TTL));
    }

    #[test]
    fn test_expired_cookie_clears_value() {
        let cookie = expired_session_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }

    #[test]
    fn test_has_session_cookie() {
        assert!(has_session_cookie(&headers_with_cookie(
            "access_token=tok-123"
        )));
        assert!(has_session_cookie(&headers_with_cookie(
            "theme=dark; access_token=tok-123; lang=es"
        )));
    }

    #[test]
    fn test_missing_or_empty_cookie_is_absent() {
        assert!(!has_session_cookie(&HeaderMap::new()));
        assert!(!has_session_cookie(&headers_with_cookie("theme=dark")));
        assert!(!has_session_cookie(&headers_with_cookie("access_token=")));
    }
}
