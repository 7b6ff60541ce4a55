//! Authentication state and credential types.

use serde::{Deserialize, Serialize};

use super::id::UserId;

/// Client-side authentication state.
///
/// `Authenticating` while a credential check is outstanding; `Failed`
/// when the credential is absent or rejected, at which point privileged
/// calls short-circuit without touching the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    #[default]
    Authenticating,
    Authenticated,
    Failed,
}

/// The user as the client session sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: Option<UserId>,
    pub email: Option<String>,
    pub auth: AuthState,
}

impl CurrentUser {
    /// A user whose credential is missing or was rejected.
    #[must_use]
    pub const fn unauthenticated() -> Self {
        Self {
            id: None,
            email: None,
            auth: AuthState::Failed,
        }
    }

    /// A signed-in user.
    #[must_use]
    pub const fn authenticated(id: UserId, email: Option<String>) -> Self {
        Self {
            id: Some(id),
            email,
            auth: AuthState::Authenticated,
        }
    }
}

impl Default for CurrentUser {
    fn default() -> Self {
        Self {
            id: None,
            email: None,
            auth: AuthState::default(),
        }
    }
}

/// Opaque bearer credential.
///
/// The token body is a secret, so `Debug` redacts it. Created at login,
/// read before every privileged request, and cleared when rejected.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Get the raw token for use in an `authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Render the `authorization` header value.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

impl From<String> for AccessToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

impl From<&str> for AccessToken {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_access_token_debug_redacts_body() {
        let token = AccessToken::new("super-secret-token");
        let debug_output = format!("{token:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-token"));
    }

    #[test]
    fn test_access_token_bearer_header() {
        let token = AccessToken::new("abc123");
        assert_eq!(token.bearer(), "Bearer abc123");
    }

    #[test]
    fn test_auth_state_serde_snake_case() {
        let json = serde_json::to_string(&AuthState::Authenticating).unwrap();
        assert_eq!(json, "\"authenticating\"");
    }

    #[test]
    fn test_unauthenticated_user_has_failed_auth() {
        let user = CurrentUser::unauthenticated();
        assert_eq!(user.auth, AuthState::Failed);
        assert!(user.id.is_none());
    }
}
