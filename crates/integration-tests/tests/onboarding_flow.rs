//! Identification, onboarding routing, and the cookie-issuing login proxy.

#![allow(clippy::unwrap_used)]

use axum::{Json, Router, routing::post};
use barrio_integration_tests::{
    RequestLog, client, logged, record_requests, request_log, spawn, spawn_console,
};
use serde_json::json;

fn stub_backend(log: RequestLog) -> Router {
    let router = Router::new()
        .route(
            "/users/login-start",
            post(|| async {
                Json(json!({
                    "id": 42,
                    "email": "a@b.com",
                    "firstName": "Ana",
                    "nextStep": "profile-info",
                }))
            }),
        )
        .route(
            "/users/login-password",
            post(|| async {
                Json(json!({
                    "accessToken": "tok-123",
                    "user": { "id": 42, "email": "a@b.com", "validated": true },
                }))
            }),
        );
    record_requests(router, log)
}

async fn setup() -> (String, RequestLog) {
    let log = request_log();
    let backend = spawn(stub_backend(log.clone())).await;
    let console = spawn_console(&backend).await;
    (console, log)
}

#[tokio::test]
async fn identify_routes_to_profile_step_with_encoded_params() {
    let (console, _log) = setup().await;

    let response = client()
        .post(format!("{console}/identify"))
        .form(&[("email", "a@b.com")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(
        response.headers()["location"],
        "/signup/profile?user_id=42&email=a%40b.com&first_name=Ana&last_name="
    );
}

#[tokio::test]
async fn malformed_email_is_rejected_before_any_backend_call() {
    let (console, log) = setup().await;

    let response = client()
        .post(format!("{console}/identify"))
        .form(&[("email", "not-an-email")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("correo electrónico válido"));
    assert!(logged(&log).is_empty());
}

#[tokio::test]
async fn login_proxy_sets_session_cookie_and_redirects_to_admin() {
    let (console, _log) = setup().await;

    let response = client()
        .post(format!("{console}/api/login"))
        .form(&[("email", "a@b.com"), ("password", "hunter2hunter2")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["location"], "/admin");

    let cookie = response.headers()["set-cookie"].to_str().unwrap();
    assert!(cookie.starts_with("access_token=tok-123"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Secure"));
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("Max-Age=3600"));
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let (console, _log) = setup().await;

    let response = client()
        .post(format!("{console}/api/logout"))
        .header("cookie", "access_token=tok-123")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["location"], "/");

    let cookie = response.headers()["set-cookie"].to_str().unwrap();
    assert!(cookie.starts_with("access_token=;"));
    assert!(cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn backend_not_found_renders_friendly_message() {
    let log = request_log();
    let router = Router::new().route(
        "/users/login-start",
        post(|| async {
            (
                axum::http::StatusCode::NOT_FOUND,
                Json(json!({ "message": "user not found" })),
            )
        }),
    );
    let backend = spawn(record_requests(router, log)).await;
    let console = spawn_console(&backend).await;

    let response = client()
        .post(format!("{console}/identify"))
        .form(&[("email", "nobody@b.com")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("No encontramos una cuenta"));
}

#[tokio::test]
async fn unknown_step_falls_back_to_identification_root() {
    let log = request_log();
    let router = Router::new().route(
        "/users/login-start",
        post(|| async {
            Json(json!({
                "id": 42,
                "email": "a@b.com",
                "nextStep": "biometric-scan",
            }))
        }),
    );
    let backend = spawn(record_requests(router, log)).await;
    let console = spawn_console(&backend).await;

    let response = client()
        .post(format!("{console}/identify"))
        .form(&[("email", "a@b.com")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["location"], "/");
}
