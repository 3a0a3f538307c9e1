//! Onboarding page handlers.
//!
//! Each page performs one backend mutation, then re-runs identification so
//! the backend itself decides the next step. A completed account reports
//! `password-check` and lands on the password page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use barrio_core::{UserId, validate};
use serde::Deserialize;
use tracing::instrument;

use crate::backend::BackendError;
use crate::error::friendly_auth_message;
use crate::onboarding::next_destination;
use crate::state::AppState;

/// Query parameters carried between onboarding pages.
#[derive(Debug, Deserialize)]
pub struct OnboardingQuery {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Password creation form data.
#[derive(Debug, Deserialize)]
pub struct PasswordForm {
    pub user_id: i64,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// Profile information form data.
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub user_id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
}

/// Confirmation form data.
#[derive(Debug, Deserialize)]
pub struct ConfirmForm {
    pub user_id: i64,
    pub email: String,
}

/// Password creation page template.
#[derive(Template, WebTemplate)]
#[template(path = "signup/password.html")]
pub struct PasswordTemplate {
    pub user_id: String,
    pub email: String,
    pub error: String,
}

/// Profile information page template.
#[derive(Template, WebTemplate)]
#[template(path = "signup/profile.html")]
pub struct ProfileTemplate {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub error: String,
}

/// Confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "signup/confirm.html")]
pub struct ConfirmTemplate {
    pub user_id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub error: String,
}

/// Display the password creation page.
pub async fn password_page(Query(query): Query<OnboardingQuery>) -> impl IntoResponse {
    PasswordTemplate {
        user_id: query.user_id.unwrap_or_default(),
        email: query.email.unwrap_or_default(),
        error: String::new(),
    }
}

/// Set the account's password, then route to the next step.
#[instrument(skip(state, form))]
pub async fn submit_password(
    State(state): State<AppState>,
    Form(form): Form<PasswordForm>,
) -> Response {
    let render_error = |error: String| {
        PasswordTemplate {
            user_id: form.user_id.to_string(),
            email: form.email.clone(),
            error,
        }
        .into_response()
    };

    if !validate::is_present(&form.password) {
        return render_error("Escribe una contraseña.".to_string());
    }
    if form.password != form.password_confirm {
        return render_error("Las contraseñas no coinciden.".to_string());
    }

    let outcome = state
        .backend()
        .set_password(UserId::new(form.user_id), &form.password)
        .await;

    match outcome {
        Ok(()) => reroute(&state, &form.email).await,
        Err(err) => render_error(auth_error_message(&err)),
    }
}

/// Display the profile information page.
pub async fn profile_page(Query(query): Query<OnboardingQuery>) -> impl IntoResponse {
    ProfileTemplate {
        user_id: query.user_id.unwrap_or_default(),
        email: query.email.unwrap_or_default(),
        first_name: query.first_name.unwrap_or_default(),
        last_name: query.last_name.unwrap_or_default(),
        error: String::new(),
    }
}

/// Save the account's profile fields, then route to the next step.
#[instrument(skip(state, form))]
pub async fn submit_profile(
    State(state): State<AppState>,
    Form(form): Form<ProfileForm>,
) -> Response {
    let render_error = |error: String| {
        ProfileTemplate {
            user_id: form.user_id.to_string(),
            email: form.email.clone(),
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            error,
        }
        .into_response()
    };

    if !validate::is_present(&form.first_name) || !validate::is_present(&form.last_name) {
        return render_error("Escribe tu nombre y apellido.".to_string());
    }

    let outcome = state
        .backend()
        .update_profile(
            UserId::new(form.user_id),
            form.first_name.trim(),
            form.last_name.trim(),
            form.phone.trim(),
        )
        .await;

    match outcome {
        Ok(()) => reroute(&state, &form.email).await,
        Err(err) => render_error(auth_error_message(&err)),
    }
}

/// Display the final confirmation page.
pub async fn confirm_page(Query(query): Query<OnboardingQuery>) -> impl IntoResponse {
    ConfirmTemplate {
        user_id: query.user_id.unwrap_or_default(),
        email: query.email.unwrap_or_default(),
        first_name: query.first_name.unwrap_or_default(),
        last_name: query.last_name.unwrap_or_default(),
        error: String::new(),
    }
}

/// Confirm the account, then route to the next step.
#[instrument(skip(state, form))]
pub async fn submit_confirm(
    State(state): State<AppState>,
    Form(form): Form<ConfirmForm>,
) -> Response {
    let outcome = state
        .backend()
        .confirm_account(UserId::new(form.user_id))
        .await;

    match outcome {
        Ok(()) => reroute(&state, &form.email).await,
        Err(err) => ConfirmTemplate {
            user_id: form.user_id.to_string(),
            email: form.email,
            first_name: String::new(),
            last_name: String::new(),
            error: auth_error_message(&err),
        }
        .into_response(),
    }
}

/// Re-run identification and redirect to whatever step the backend now
/// reports.
async fn reroute(state: &AppState, email: &str) -> Response {
    match state.backend().login_start(email).await {
        Ok(user) => Redirect::to(&next_destination(&user)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "re-identification after onboarding step failed");
            Redirect::to("/").into_response()
        }
    }
}

fn auth_error_message(err: &BackendError) -> String {
    match err {
        BackendError::Api { status, .. } => friendly_auth_message(*status).to_string(),
        _ => {
            tracing::error!(error = %err, "onboarding mutation failed");
            friendly_auth_message(500).to_string()
        }
    }
}
