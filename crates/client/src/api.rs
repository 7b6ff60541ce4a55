//! HTTP client for the storefront API.
//!
//! Wraps the three routes the cart flow consumes (`GET /cart`,
//! `POST /cart`, `POST /orders`) plus order history, using `reqwest`
//! with the shared wire envelopes from `breadfruit-core`.

use std::sync::Arc;

use tracing::instrument;

use breadfruit_core::api::{
    CartPayload, CheckoutResponse, FetchCartResponse, OrdersResponse, UpdateCartResponse,
};
use breadfruit_core::{AccessToken, CartItem, Order};

use crate::config::ClientConfig;

/// Errors that can occur when talking to the storefront API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// HTTP request failed (transport-level).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not the expected envelope.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The credential was missing or rejected by the server.
    #[error("Unauthorized")]
    Unauthorized,

    /// Business-logic failure: `success: false` with a server message.
    #[error("{0}")]
    Rejected(String),

    /// The server broke its own contract (e.g. success without a payload).
    #[error("Protocol error: {0}")]
    Protocol(String),
}

/// Client for the storefront cart/orders API.
///
/// Cheaply cloneable; the underlying `reqwest::Client` pools connections.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new API client.
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        let base_url = config.server_url.as_str().trim_end_matches('/').to_string();
        Self {
            inner: Arc::new(ApiClientInner {
                client: reqwest::Client::new(),
                base_url,
            }),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.inner.base_url)
    }

    /// Parse a response body after rejecting auth failures.
    ///
    /// The server signals business failures inside the envelope (with a
    /// 4xx status), so the body is parsed for every status except 401.
    async fn read_envelope<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;
        match serde_json::from_str(&response_text) {
            Ok(envelope) => Ok(envelope),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse storefront API response"
                );
                Err(ApiError::Parse(e))
            }
        }
    }

    /// Fetch the server-authoritative cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the credential is
    /// rejected, or the server reports a failure envelope.
    #[instrument(skip(self, token))]
    pub async fn fetch_cart(&self, token: &AccessToken) -> Result<Vec<CartItem>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("cart"))
            .header("authorization", token.bearer())
            .send()
            .await?;

        let envelope: FetchCartResponse = Self::read_envelope(response).await?;
        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "failed to fetch cart".to_string()),
            ));
        }

        Ok(envelope.data.unwrap_or_default())
    }

    /// Replace the persisted cart with the given item sequence.
    ///
    /// Idempotent full replace; this is the call the debounced sync
    /// coalesces into.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the credential is
    /// rejected, or the server reports a failure envelope.
    #[instrument(skip(self, token, items), fields(item_count = items.len()))]
    pub async fn update_cart(
        &self,
        token: &AccessToken,
        items: &[CartItem],
    ) -> Result<(), ApiError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("cart"))
            .header("authorization", token.bearer())
            .json(&CartPayload {
                cart: items.to_vec(),
            })
            .send()
            .await?;

        let envelope: UpdateCartResponse = Self::read_envelope(response).await?;
        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "failed to update cart".to_string()),
            ));
        }

        Ok(())
    }

    /// Convert the cart into an order; returns the payment redirect URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` with the server's message when the
    /// order is refused (e.g. out of stock), and transport/auth errors
    /// as with the other calls.
    #[instrument(skip(self, token, items), fields(item_count = items.len()))]
    pub async fn checkout(
        &self,
        token: &AccessToken,
        items: &[CartItem],
    ) -> Result<String, ApiError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("orders"))
            .header("authorization", token.bearer())
            .json(&CartPayload {
                cart: items.to_vec(),
            })
            .send()
            .await?;

        let envelope: CheckoutResponse = Self::read_envelope(response).await?;
        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "checkout failed".to_string()),
            ));
        }

        envelope
            .payment_url
            .ok_or_else(|| ApiError::Protocol("checkout succeeded without payment_url".to_string()))
    }

    /// Fetch the user's order history.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the credential is
    /// rejected, or the server reports a failure envelope.
    #[instrument(skip(self, token))]
    pub async fn fetch_orders(&self, token: &AccessToken) -> Result<Vec<Order>, ApiError> {
        let response = self
            .inner
            .client
            .get(self.endpoint("orders"))
            .header("authorization", token.bearer())
            .send()
            .await?;

        let envelope: OrdersResponse = Self::read_envelope(response).await?;
        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "failed to fetch orders".to_string()),
            ));
        }

        Ok(envelope.data.unwrap_or_default())
    }
}
