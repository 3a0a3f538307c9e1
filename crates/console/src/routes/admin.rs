//! Admin dashboard handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;

/// Dashboard template: section cards linking to the admin pages.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {}

/// Display the admin dashboard.
pub async fn dashboard() -> impl IntoResponse {
    DashboardTemplate {}
}
