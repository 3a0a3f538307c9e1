//! Access gate evaluated on every request before any handler.
//!
//! The gate is a pure, synchronous decision over three inputs: the request
//! path, its raw query string, and whether the session cookie is present.
//! It performs no I/O and reads no ambient state, so the rules can be
//! tested exhaustively without a server.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::session::has_session_cookie;

/// Outcome of the gate for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Let the request through to its handler.
    Allow,
    /// Redirect to the identification page at `/`, carrying the original
    /// destination in a `next` parameter when one exists.
    ToIdentification { next: Option<String> },
    /// Redirect an already-authenticated request to `/admin`.
    ToAdminRoot,
}

/// Decide what to do with a request. Rules, first match wins:
///
/// 1. Path under `/admin` without a credential → back to identification,
///    remembering the original path and query as `next`.
/// 2. Path exactly `/` or `/login` with a credential → straight to `/admin`.
/// 3. Path exactly `/login` without a credential and without an `email`
///    query parameter → back to identification. (The password page is only
///    reachable mid-onboarding, when the email is carried in the query.)
/// 4. Anything else is allowed through.
#[must_use]
pub fn decide(path: &str, raw_query: Option<&str>, credential_present: bool) -> GateDecision {
    if path.starts_with("/admin") && !credential_present {
        let next = match raw_query {
            Some(query) if !query.is_empty() => format!("{path}?{query}"),
            _ => path.to_string(),
        };
        return GateDecision::ToIdentification { next: Some(next) };
    }

    if (path == "/" || path == "/login") && credential_present {
        return GateDecision::ToAdminRoot;
    }

    if path == "/login" && !credential_present && !has_email_param(raw_query) {
        return GateDecision::ToIdentification { next: None };
    }

    GateDecision::Allow
}

/// Whether the raw query string contains an `email` parameter.
fn has_email_param(raw_query: Option<&str>) -> bool {
    let Some(query) = raw_query else {
        return false;
    };
    url::form_urlencoded::parse(query.as_bytes()).any(|(key, _)| key == "email")
}

/// The redirect target for a non-`Allow` decision.
#[must_use]
pub fn location(decision: &GateDecision) -> Option<String> {
    match decision {
        GateDecision::Allow => None,
        GateDecision::ToIdentification { next: Some(next) } => {
            Some(format!("/?next={}", urlencoding::encode(next)))
        }
        GateDecision::ToIdentification { next: None } => Some("/".to_string()),
        GateDecision::ToAdminRoot => Some("/admin".to_string()),
    }
}

/// Axum middleware wrapping [`decide`].
///
/// Credential presence is computed from the `Cookie` header here and passed
/// into the pure function explicitly.
pub async fn access_gate(request: Request, next: Next) -> Response {
    let credential_present = has_session_cookie(request.headers());
    let decision = decide(
        request.uri().path(),
        request.uri().query(),
        credential_present,
    );

    match location(&decision) {
        None => next.run(request).await,
        Some(target) => {
            tracing::debug!(path = %request.uri().path(), target = %target, "gate redirect");
            Redirect::to(&target).into_response()
        }
    }
}
