//! Wire envelope types for the cart/orders HTTP surface.
//!
//! Shared by the client and the server so the contract cannot drift.
//! Every response carries a `success` flag; failures add a `message`
//! and successes add their payload field, matching the routes:
//!
//! - `GET /cart` -> [`FetchCartResponse`]
//! - `POST /cart` with [`CartPayload`] -> [`UpdateCartResponse`]
//! - `POST /orders` with [`CartPayload`] -> [`CheckoutResponse`]
//! - `GET /orders` -> [`OrdersResponse`]

use serde::{Deserialize, Serialize};

use crate::types::{CartItem, Order};

/// Request body for `POST /cart` and `POST /orders`: the full item
/// sequence (replace semantics, not a delta).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPayload {
    pub cart: Vec<CartItem>,
}

/// Response for `GET /cart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchCartResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<CartItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for `POST /cart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCartResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for `GET /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Order>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckoutResponse {
    /// A successful checkout pointing at the payment redirect.
    #[must_use]
    pub fn redirect(payment_url: impl Into<String>) -> Self {
        Self {
            success: true,
            payment_url: Some(payment_url.into()),
            message: None,
        }
    }

    /// A business-logic failure with a user-facing message.
    #[must_use]
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            payment_url: None,
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_cart_response_omits_absent_fields() {
        let response = FetchCartResponse {
            success: true,
            data: Some(vec![]),
            message: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"success":true,"data":[]}"#);
    }

    #[test]
    fn test_checkout_failure_parses_without_payment_url() {
        let json = r#"{"success":false,"message":"out of stock"}"#;
        let response: CheckoutResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert_eq!(response.message.as_deref(), Some("out of stock"));
        assert!(response.payment_url.is_none());
    }

    #[test]
    fn test_cart_payload_uses_cart_field() {
        let payload = CartPayload { cart: vec![] };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"cart":[]}"#);
    }

    #[test]
    fn test_checkout_redirect_constructor() {
        let response = CheckoutResponse::redirect("https://pay.example/o/1");
        assert!(response.success);
        assert_eq!(
            response.payment_url.as_deref(),
            Some("https://pay.example/o/1")
        );
    }
}
