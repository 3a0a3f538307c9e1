//! Admin CRUD pages over a stateful stub backend.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};
use barrio_integration_tests::{
    RequestLog, client, logged, record_requests, request_log, spawn, spawn_console,
};
use serde_json::{Value, json};

type Store = Arc<Mutex<Vec<Value>>>;

fn seeded_store() -> Store {
    Arc::new(Mutex::new(vec![
        json!({ "id": 1, "name": "Comida", "color": "#FF9900", "bookable": true }),
        json!({ "id": 2, "name": "Servicios", "bookable": false }),
    ]))
}

async fn list_categories(State(store): State<Store>) -> Json<Value> {
    Json(Value::Array(store.lock().unwrap().clone()))
}

async fn create_category(State(store): State<Store>, Json(body): Json<Value>) -> Json<Value> {
    let mut created = body;
    created["id"] = json!(99);
    store.lock().unwrap().push(created.clone());
    Json(created)
}

async fn delete_category(State(store): State<Store>, Path(id): Path<i64>) -> StatusCode {
    store.lock().unwrap().retain(|c| c["id"] != json!(id));
    StatusCode::NO_CONTENT
}

fn stub_backend(store: Store, log: RequestLog) -> Router {
    let router = Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route("/categories/{id}", delete(delete_category))
        .route(
            "/sites",
            get(|| async {
                let sites: Vec<Value> = (1..=12)
                    .map(|i| {
                        json!({
                            "id": i,
                            "name": format!("Sitio {i}"),
                            "state": "CDMX",
                            "city": "Ciudad de México",
                            "postalCode": "06000",
                            "neighborhood": "Centro",
                            "street": format!("Madero {i}"),
                            "latitude": 19.43,
                            "longitude": -99.13,
                            "categoryId": 1,
                            "platformPercentage": 10.0,
                            "transportPercentage": 5.0,
                            "venuePercentage": 85.0,
                        })
                    })
                    .collect();
                Json(Value::Array(sites))
            }),
        )
        .route(
            "/users",
            get(|| async {
                Json(json!([
                    { "id": 7, "email": "ana@b.com", "firstName": "Ana", "validated": true },
                ]))
            }),
        )
        .with_state(store);
    record_requests(router, log)
}

async fn setup() -> (String, RequestLog, Store) {
    let store = seeded_store();
    let log = request_log();
    let backend = spawn(stub_backend(store.clone(), log.clone())).await;
    let console = spawn_console(&backend).await;
    (console, log, store)
}

#[tokio::test]
async fn category_list_applies_text_filter() {
    let (console, _log, _store) = setup().await;

    let response = client()
        .get(format!("{console}/admin/categories?q=comida"))
        .header("cookie", "access_token=tok-123")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Comida"));
    assert!(!body.contains("Servicios"));
}

#[tokio::test]
async fn invalid_image_url_is_rejected_before_any_backend_call() {
    let (console, log, _store) = setup().await;

    let response = client()
        .post(format!("{console}/admin/categories"))
        .header("cookie", "access_token=tok-123")
        .form(&[("name", "Comida"), ("image_url", "not-a-url")])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("URL válida"));
    assert!(
        !logged(&log).contains(&"POST /categories".to_string()),
        "no create call should reach the backend"
    );
}

#[tokio::test]
async fn create_category_relays_to_backend_and_returns_to_list() {
    let (console, log, store) = setup().await;

    let response = client()
        .post(format!("{console}/admin/categories"))
        .header("cookie", "access_token=tok-123")
        .form(&[
            ("name", "Deportes"),
            ("color", "#00AA00"),
            ("bookable", "on"),
        ])
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["location"], "/admin/categories");
    assert!(logged(&log).contains(&"POST /categories".to_string()));
    assert_eq!(store.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn deleted_category_disappears_from_refetched_list() {
    let (console, _log, _store) = setup().await;

    let response = client()
        .post(format!("{console}/admin/categories/1/delete"))
        .header("cookie", "access_token=tok-123")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 303);
    assert_eq!(response.headers()["location"], "/admin/categories");

    let response = client()
        .get(format!("{console}/admin/categories"))
        .header("cookie", "access_token=tok-123")
        .send()
        .await
        .unwrap();

    let body = response.text().await.unwrap();
    assert!(!body.contains("Comida"));
    assert!(body.contains("Servicios"));
}

#[tokio::test]
async fn site_list_paginates_at_ten_rows() {
    let (console, _log, _store) = setup().await;

    let response = client()
        .get(format!("{console}/admin/sites"))
        .header("cookie", "access_token=tok-123")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("Sitio 1"));
    assert!(body.contains("Sitio 10"));
    assert!(!body.contains("Sitio 11"));
    assert!(body.contains("Página 1 de 2"));

    let response = client()
        .get(format!("{console}/admin/sites?page=2"))
        .header("cookie", "access_token=tok-123")
        .send()
        .await
        .unwrap();

    let body = response.text().await.unwrap();
    assert!(body.contains("Sitio 11"));
    assert!(body.contains("Sitio 12"));
    assert!(body.contains("Página 2 de 2"));
}

#[tokio::test]
async fn user_list_renders_rows() {
    let (console, _log, _store) = setup().await;

    let response = client()
        .get(format!("{console}/admin/users"))
        .header("cookie", "access_token=tok-123")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body = response.text().await.unwrap();
    assert!(body.contains("ana@b.com"));
    assert!(body.contains("Ana"));
}
