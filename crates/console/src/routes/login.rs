//! Password login and logout handlers.
//!
//! `POST /api/login` is a local proxy: it forwards the credentials to the
//! backend, and on success mints the session cookie itself. The bearer
//! token is never handed to page code.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use secrecy::ExposeSecret;
use serde::Deserialize;
use tracing::instrument;

use crate::backend::BackendError;
use crate::error::friendly_auth_message;
use crate::middleware::session::{expired_session_cookie, session_cookie};
use crate::state::AppState;

/// Query parameters for the password page, carried over from the
/// onboarding router.
#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    pub email: Option<String>,
    pub user_id: Option<String>,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Password page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub email: String,
    pub user_id: String,
    pub error: String,
}

/// Display the password page, pre-populated from the query string.
pub async fn page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    LoginTemplate {
        email: query.email.unwrap_or_default(),
        user_id: query.user_id.unwrap_or_default(),
        error: String::new(),
    }
}

/// Handle the login form submission.
///
/// On success the session cookie is set and the browser is sent to
/// `/admin`; on failure the password page re-renders with a friendly
/// message.
#[instrument(skip(state, jar, form))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let email = form.email.trim();

    if email.is_empty() || form.password.is_empty() {
        return LoginTemplate {
            email: email.to_string(),
            user_id: String::new(),
            error: "Escribe tu correo y contraseña.".to_string(),
        }
        .into_response();
    }

    match state.backend().login_password(email, &form.password).await {
        Ok((token, user)) => {
            tracing::info!(user_id = %user.id, "login succeeded");
            let jar = jar.add(session_cookie(token.expose_secret()));
            (jar, Redirect::to("/admin")).into_response()
        }
        Err(err) => {
            let message = match &err {
                BackendError::Api { status, .. } => friendly_auth_message(*status).to_string(),
                _ => {
                    tracing::error!(error = %err, "login-password failed");
                    friendly_auth_message(500).to_string()
                }
            };
            LoginTemplate {
                email: email.to_string(),
                user_id: String::new(),
                error: message,
            }
            .into_response()
        }
    }
}

/// Clear the session cookie and return to the identification page.
#[instrument(skip(jar))]
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    let jar = jar.add(expired_session_cookie());
    (jar, Redirect::to("/"))
}
