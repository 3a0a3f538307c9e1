//! Test harness for the Barrio console.
//!
//! Spawns the console and a stub backend on ephemeral ports. The stub is an
//! ordinary axum router assembled per test; [`record_requests`] wraps it so
//! tests can assert exactly which backend calls were (or were not) made.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{Router, extract::Request, middleware::Next};
use barrio_console::config::ConsoleConfig;
use barrio_console::state::AppState;

/// Shared log of requests the stub backend has seen, as `"METHOD /path"`.
pub type RequestLog = Arc<Mutex<Vec<String>>>;

/// Create an empty request log.
#[must_use]
pub fn request_log() -> RequestLog {
    Arc::new(Mutex::new(Vec::new()))
}

/// Record every request hitting the router into the log.
pub fn record_requests(router: Router, log: RequestLog) -> Router {
    router.layer(axum::middleware::from_fn(
        move |request: Request, next: Next| {
            let log = log.clone();
            async move {
                log.lock()
                    .unwrap()
                    .push(format!("{} {}", request.method(), request.uri().path()));
                next.run(request).await
            }
        },
    ))
}

/// Entries currently in the log.
#[must_use]
pub fn logged(log: &RequestLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

/// Serve a router on an ephemeral port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Spawn the console wired to the given backend URL; returns its base URL.
pub async fn spawn_console(backend_url: &str) -> String {
    let config = ConsoleConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost".to_string(),
        backend_api_url: backend_url.trim_end_matches('/').to_string(),
        backend_timeout: Duration::from_secs(5),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 1.0,
    };
    let state = AppState::new(config).unwrap();
    spawn(barrio_console::app(state)).await
}

/// HTTP client with redirects disabled, so redirect responses can be
/// asserted directly.
#[must_use]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
