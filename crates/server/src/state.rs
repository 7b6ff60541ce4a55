//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::db::Documents;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the configuration and the document store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    documents: Documents,
}

impl AppState {
    /// Create a new application state over an empty document store.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self::with_documents(config, Documents::new())
    }

    /// Create application state over an existing document store.
    #[must_use]
    pub fn with_documents(config: ServerConfig, documents: Documents) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, documents }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a handle to the document store.
    #[must_use]
    pub fn documents(&self) -> &Documents {
        &self.inner.documents
    }
}
