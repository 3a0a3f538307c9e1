//! Unified error handling for the console.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::backend::BackendError;

/// Application-level error type for the console.
#[derive(Debug, Error)]
pub enum AppError {
    /// Backend API operation failed.
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server errors with Sentry
        if matches!(self, Self::Backend(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Console request error"
            );
        }

        let status = match &self {
            Self::Backend(BackendError::Api { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Backend(_) => "External service error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Map a backend authentication status code to a message fit for display.
///
/// The backend's login and onboarding endpoints report failures as bare
/// status codes; the pages render these messages instead of the raw status.
#[must_use]
pub const fn friendly_auth_message(status: u16) -> &'static str {
    match status {
        404 => "No encontramos una cuenta con ese correo.",
        409 => "Ya existe una cuenta con esos datos.",
        400 | 422 => "Los datos enviados no son válidos. Revisa el formulario.",
        401 | 403 => "Correo o contraseña incorrectos.",
        500..=u16::MAX => "Ocurrió un error en el servidor. Intenta de nuevo más tarde.",
        _ => "No pudimos completar la operación. Intenta de nuevo.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("site-123".to_string());
        assert_eq!(err.to_string(), "Not found: site-123");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[test]
    fn test_app_error_status_codes() {
        fn get_status(err: AppError) -> StatusCode {
            let response = err.into_response();
            response.status()
        }

        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_backend_api_error_passes_status_through() {
        let err = AppError::Backend(BackendError::Api {
            status: 404,
            message: "not found".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_friendly_auth_message_mapping() {
        assert!(friendly_auth_message(404).contains("No encontramos"));
        assert!(friendly_auth_message(409).contains("Ya existe"));
        assert!(friendly_auth_message(400).contains("no son válidos"));
        assert!(friendly_auth_message(422).contains("no son válidos"));
        assert!(friendly_auth_message(401).contains("incorrectos"));
        assert!(friendly_auth_message(403).contains("incorrectos"));
        assert!(friendly_auth_message(500).contains("servidor"));
        assert!(friendly_auth_message(503).contains("servidor"));
    }
}
