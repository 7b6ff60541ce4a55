//! Authentication middleware and extractors.
//!
//! Provides an extractor that requires a valid bearer token in route
//! handlers. Tokens are opaque; they are resolved against the session
//! table, not decoded.

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use breadfruit_core::UserId;

use crate::state::AppState;

/// Extractor that requires an authenticated user.
///
/// Parses `authorization: Bearer <token>` and resolves the token to a
/// user via the session table. Absent, malformed, or unknown tokens are
/// rejected with a 401 failure envelope.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(user_id): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {user_id}!")
/// }
/// ```
pub struct RequireAuth(pub UserId);

/// Error returned when authentication fails.
#[derive(Debug)]
pub enum AuthRejection {
    /// No `authorization` header was sent.
    MissingCredential,
    /// The header was not of the form `Bearer <token>`.
    MalformedHeader,
    /// The token does not map to a live session.
    UnknownToken,
    /// The session table itself failed.
    Internal,
}

impl AuthRejection {
    const fn message(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing credential",
            Self::MalformedHeader => "malformed authorization header",
            Self::UnknownToken => "invalid or expired token",
            Self::Internal => "Internal server error",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let status = match self {
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::UNAUTHORIZED,
        };
        (
            status,
            Json(serde_json::json!({ "success": false, "message": self.message() })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthRejection::MissingCredential)?;

        let token = header
            .strip_prefix("Bearer ")
            .filter(|token| !token.is_empty())
            .ok_or(AuthRejection::MalformedHeader)?;

        let user_id = state
            .documents()
            .sessions()
            .resolve(token)
            .await
            .map_err(|error| {
                tracing::error!(%error, "session lookup failed");
                AuthRejection::Internal
            })?
            .ok_or(AuthRejection::UnknownToken)?;

        Ok(Self(user_id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use breadfruit_core::AccessToken;

    use super::*;
    use crate::config::ServerConfig;

    fn state() -> AppState {
        AppState::new(ServerConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            payment_url: "https://pay.test/checkout".to_string(),
        })
    }

    fn parts(authorization: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/cart");
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_missing_header_is_rejected() {
        let state = state();
        let result = RequireAuth::from_request_parts(&mut parts(None), &state).await;
        assert!(matches!(result, Err(AuthRejection::MissingCredential)));
    }

    #[tokio::test]
    async fn test_non_bearer_header_is_rejected() {
        let state = state();
        let result =
            RequireAuth::from_request_parts(&mut parts(Some("Basic dXNlcg==")), &state).await;
        assert!(matches!(result, Err(AuthRejection::MalformedHeader)));

        let result = RequireAuth::from_request_parts(&mut parts(Some("Bearer ")), &state).await;
        assert!(matches!(result, Err(AuthRejection::MalformedHeader)));
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        let state = state();
        let result =
            RequireAuth::from_request_parts(&mut parts(Some("Bearer nope")), &state).await;
        assert!(matches!(result, Err(AuthRejection::UnknownToken)));
    }

    #[tokio::test]
    async fn test_valid_token_resolves_user() {
        let state = state();
        state
            .documents()
            .sessions()
            .insert(&AccessToken::new("tok-1"), UserId::new("u1"))
            .await
            .unwrap();

        let RequireAuth(user_id) =
            RequireAuth::from_request_parts(&mut parts(Some("Bearer tok-1")), &state)
                .await
                .unwrap();
        assert_eq!(user_id, UserId::new("u1"));
    }

    #[tokio::test]
    async fn test_rejection_is_unauthorized_envelope() {
        let response = AuthRejection::UnknownToken.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let bytes = axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], serde_json::json!(false));
    }
}
