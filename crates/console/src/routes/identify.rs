//! Identification route handlers.
//!
//! The identification page is the entry point of the whole flow: the
//! visitor submits an email, the backend reports which onboarding step the
//! account needs, and the handler redirects there.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use barrio_core::validate;
use serde::Deserialize;
use tracing::instrument;

use crate::backend::BackendError;
use crate::error::friendly_auth_message;
use crate::onboarding::next_destination;
use crate::state::AppState;

/// Query parameters for the identification page.
#[derive(Debug, Deserialize)]
pub struct IdentifyQuery {
    /// Original destination recorded by the access gate. Carried into the
    /// page as a hidden field but not otherwise consumed.
    pub next: Option<String>,
}

/// Identification form data.
#[derive(Debug, Deserialize)]
pub struct IdentifyForm {
    pub email: String,
    #[serde(default)]
    pub next: Option<String>,
}

/// Identification page template.
#[derive(Template, WebTemplate)]
#[template(path = "identify.html")]
pub struct IdentifyTemplate {
    pub email: String,
    pub next: String,
    pub error: String,
}

/// Display the identification page.
pub async fn page(Query(query): Query<IdentifyQuery>) -> impl IntoResponse {
    IdentifyTemplate {
        email: String::new(),
        next: query.next.unwrap_or_default(),
        error: String::new(),
    }
}

/// Handle the identification form submission.
///
/// The email is validated before any network call; a malformed address
/// re-renders the page without touching the backend.
#[instrument(skip(state, form))]
pub async fn identify(State(state): State<AppState>, Form(form): Form<IdentifyForm>) -> Response {
    let email = form.email.trim();
    let next = form.next.unwrap_or_default();

    if !validate::is_valid_email(email) {
        return IdentifyTemplate {
            email: email.to_string(),
            next,
            error: "Escribe un correo electrónico válido.".to_string(),
        }
        .into_response();
    }

    match state.backend().login_start(email).await {
        Ok(user) => Redirect::to(&next_destination(&user)).into_response(),
        Err(err) => {
            let message = match &err {
                BackendError::Api { status, .. } => friendly_auth_message(*status).to_string(),
                _ => {
                    tracing::error!(error = %err, "login-start failed");
                    friendly_auth_message(500).to_string()
                }
            };
            IdentifyTemplate {
                email: email.to_string(),
                next,
                error: message,
            }
            .into_response()
        }
    }
}
