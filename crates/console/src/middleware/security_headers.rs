//! Security headers applied to every response.

use axum::{
    extract::Request,
    http::{
        HeaderValue,
        header::{REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS},
    },
    middleware::Next,
    response::Response,
};

/// Add baseline security headers to all responses.
///
/// - `X-Frame-Options: DENY` - the console is never embedded
/// - `X-Content-Type-Options: nosniff`
/// - `Referrer-Policy: same-origin` - the gate's `next` parameter can carry
///   admin paths; keep it off outbound referrers
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(REFERRER_POLICY, HeaderValue::from_static("same-origin"));

    response
}
