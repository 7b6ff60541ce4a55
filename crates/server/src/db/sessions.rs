//! Session repository: opaque bearer token to user lookups.
//!
//! Token issuance (login) is a separate service; this table only
//! resolves tokens that service has already handed out.

use breadfruit_core::{AccessToken, UserId};

use super::{Documents, RepositoryError};

/// Repository for the token session table.
pub struct SessionRepository<'a> {
    docs: &'a Documents,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(docs: &'a Documents) -> Self {
        Self { docs }
    }

    /// Resolve a bearer token to its user, if the session exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store lookup fails.
    pub async fn resolve(&self, token: &str) -> Result<Option<UserId>, RepositoryError> {
        let inner = self.docs.read().await;
        Ok(inner.sessions.get(token).cloned())
    }

    /// Record a session for a token.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store write fails.
    pub async fn insert(
        &self,
        token: &AccessToken,
        user_id: UserId,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.docs.write().await;
        inner.sessions.insert(token.as_str().to_string(), user_id);
        Ok(())
    }

    /// Drop a session (token invalidation).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store write fails.
    pub async fn revoke(&self, token: &str) -> Result<(), RepositoryError> {
        let mut inner = self.docs.write().await;
        inner.sessions.remove(token);
        Ok(())
    }
}
