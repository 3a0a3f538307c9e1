//! HTTP client for the Barrio backend API.
//!
//! Every read and write the console performs goes through this client.
//! JSON is camelCase on the wire; errors carry the backend's own message
//! when one can be extracted from the response body.

use std::sync::Arc;

use barrio_core::{CategoryId, SiteId, UserId};
use secrecy::SecretString;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::ConsoleConfig;
use crate::models::{Category, CategoryInput, IdentifiedUser, LoginResponse, Site, UserRow};

/// Errors from backend API calls.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("backend returned {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body.
        message: String,
    },

    /// The backend answered 2xx but the body did not parse.
    #[error("backend response did not parse: {0}")]
    Parse(String),
}

impl BackendError {
    /// The HTTP status code of an API-level error, if this is one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Client for the Barrio backend API.
///
/// Cheaply cloneable via `Arc`; one instance lives in the application state.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ConsoleConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(config.backend_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(BackendClientInner {
                client,
                base_url: config.backend_api_url.clone(),
            }),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Turn a response into a typed body, or an API error with the
    /// backend's own message.
    async fn read_json<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, BackendError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))
    }

    /// Check a response for success, discarding any body.
    async fn read_empty(response: reqwest::Response) -> Result<(), BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await?;
        Err(BackendError::Api {
            status: status.as_u16(),
            message: extract_error_message(&body),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let response = self.inner.client.get(self.url(path)).send().await?;
        Self::read_json(response).await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, BackendError> {
        let response = self
            .inner
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Probe backend reachability for the readiness endpoint.
    ///
    /// Any HTTP answer counts as reachable; only transport failures error.
    #[instrument(skip(self))]
    pub async fn ping(&self) -> Result<(), BackendError> {
        self.inner
            .client
            .get(&self.inner.base_url)
            .send()
            .await?;
        Ok(())
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// Fetch all categories.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, BackendError> {
        self.get_json("/categories").await
    }

    /// Create a category.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, BackendError> {
        self.post_json("/categories", input).await
    }

    /// Update a category.
    #[instrument(skip(self, input))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        input: &CategoryInput,
    ) -> Result<Category, BackendError> {
        let response = self
            .inner
            .client
            .patch(self.url(&format!("/categories/{id}")))
            .json(input)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Delete a category.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), BackendError> {
        let response = self
            .inner
            .client
            .delete(self.url(&format!("/categories/{id}")))
            .send()
            .await?;
        Self::read_empty(response).await
    }

    // =========================================================================
    // Sites
    // =========================================================================

    /// Fetch sites, optionally restricted to one category.
    #[instrument(skip(self))]
    pub async fn list_sites(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Site>, BackendError> {
        let path = match category {
            Some(id) => format!("/sites?categoryId={id}"),
            None => "/sites".to_string(),
        };
        self.get_json(&path).await
    }

    /// Create a site from a multipart form (text fields plus image files,
    /// streamed through unchanged).
    #[instrument(skip(self, form))]
    pub async fn create_site(
        &self,
        form: reqwest::multipart::Form,
    ) -> Result<Site, BackendError> {
        let response = self
            .inner
            .client
            .post(self.url("/sites"))
            .multipart(form)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Update a site from a multipart form.
    #[instrument(skip(self, form))]
    pub async fn update_site(
        &self,
        id: SiteId,
        form: reqwest::multipart::Form,
    ) -> Result<Site, BackendError> {
        let response = self
            .inner
            .client
            .patch(self.url(&format!("/sites/{id}")))
            .multipart(form)
            .send()
            .await?;
        Self::read_json(response).await
    }

    /// Delete a site.
    #[instrument(skip(self))]
    pub async fn delete_site(&self, id: SiteId) -> Result<(), BackendError> {
        let response = self
            .inner
            .client
            .delete(self.url(&format!("/sites/{id}")))
            .send()
            .await?;
        Self::read_empty(response).await
    }

    // =========================================================================
    // Users & authentication
    // =========================================================================

    /// Fetch all users.
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<UserRow>, BackendError> {
        self.get_json("/users").await
    }

    /// Identify an account by email and learn its next onboarding step.
    #[instrument(skip(self, email))]
    pub async fn login_start(&self, email: &str) -> Result<IdentifiedUser, BackendError> {
        self.post_json("/users/login-start", &serde_json::json!({ "email": email }))
            .await
    }

    /// Exchange email and password for a bearer token.
    ///
    /// The token is wrapped in [`SecretString`] immediately; it only leaves
    /// this form when written into the session cookie.
    #[instrument(skip(self, email, password))]
    pub async fn login_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(SecretString, UserRow), BackendError> {
        let response: LoginResponse = self
            .post_json(
                "/users/login-password",
                &serde_json::json!({ "email": email, "password": password }),
            )
            .await?;
        Ok((SecretString::from(response.access_token), response.user))
    }

    /// Set the password for an account mid-onboarding.
    #[instrument(skip(self, password))]
    pub async fn set_password(&self, id: UserId, password: &str) -> Result<(), BackendError> {
        let response = self
            .inner
            .client
            .post(self.url(&format!("/users/{id}/password")))
            .json(&serde_json::json!({ "password": password }))
            .send()
            .await?;
        Self::read_empty(response).await
    }

    /// Update profile fields for an account mid-onboarding.
    #[instrument(skip(self, first_name, last_name, phone))]
    pub async fn update_profile(
        &self,
        id: UserId,
        first_name: &str,
        last_name: &str,
        phone: &str,
    ) -> Result<(), BackendError> {
        let response = self
            .inner
            .client
            .patch(self.url(&format!("/users/{id}")))
            .json(&serde_json::json!({
                "firstName": first_name,
                "lastName": last_name,
                "phone": phone,
            }))
            .send()
            .await?;
        Self::read_empty(response).await
    }

    /// Confirm an account, completing onboarding.
    #[instrument(skip(self))]
    pub async fn confirm_account(&self, id: UserId) -> Result<(), BackendError> {
        let response = self
            .inner
            .client
            .post(self.url(&format!("/users/{id}/confirm")))
            .send()
            .await?;
        Self::read_empty(response).await
    }
}

/// Extract a human-readable message from an error response body.
///
/// The backend reports errors as JSON with a `message` field (a string, or
/// an array of strings where the first entry is the most specific) or an
/// `error` field. Bodies that are not valid JSON are used verbatim.
fn extract_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    if let Some(message) = value.get("message") {
        match message {
            serde_json::Value::String(s) => return s.clone(),
            serde_json::Value::Array(items) => {
                if let Some(serde_json::Value::String(first)) = items.first() {
                    return first.clone();
                }
            }
            _ => {}
        }
    }

    if let Some(serde_json::Value::String(s)) = value.get("error") {
        return s.clone();
    }

    body.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_string() {
        let body = r#"{"message":"category name already exists"}"#;
        assert_eq!(extract_error_message(body), "category name already exists");
    }

    #[test]
    fn test_extract_message_array_uses_first() {
        let body = r#"{"message":["name must not be empty","color must be a hex color"]}"#;
        assert_eq!(extract_error_message(body), "name must not be empty");
    }

    #[test]
    fn test_extract_error_field() {
        let body = r#"{"error":"Unauthorized"}"#;
        assert_eq!(extract_error_message(body), "Unauthorized");
    }

    #[test]
    fn test_extract_non_json_body_verbatim() {
        let body = "<html>502 Bad Gateway</html>";
        assert_eq!(extract_error_message(body), body);
    }

    #[test]
    fn test_extract_empty_message_array_falls_back() {
        let body = r#"{"message":[]}"#;
        assert_eq!(extract_error_message(body), body);
    }

    #[test]
    fn test_backend_error_status() {
        let err = BackendError::Api {
            status: 409,
            message: "conflict".to_string(),
        };
        assert_eq!(err.status(), Some(409));

        let err = BackendError::Parse("bad json".to_string());
        assert_eq!(err.status(), None);
    }
}
