//! Application state shared across handlers.

use std::sync::Arc;

use crate::backend::{BackendClient, BackendError};
use crate::config::ConsoleConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the configuration and the backend
/// API client. The console keeps no other cross-request state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ConsoleConfig,
    backend: BackendClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend HTTP client cannot be built.
    pub fn new(config: ConsoleConfig) -> Result<Self, BackendError> {
        let backend = BackendClient::new(&config)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { config, backend }),
        })
    }

    /// Get a reference to the console configuration.
    #[must_use]
    pub fn config(&self) -> &ConsoleConfig {
        &self.inner.config
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn backend(&self) -> &BackendClient {
        &self.inner.backend
    }
}
