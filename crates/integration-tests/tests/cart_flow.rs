//! End-to-end tests for the cart API surface, driven through the real
//! HTTP client against an in-process server.

#![allow(clippy::unwrap_used)]

use breadfruit_client::api::{ApiClient, ApiError};
use breadfruit_client::config::ClientConfig;
use breadfruit_core::{AccessToken, UserId};
use breadfruit_integration_tests::{item, spawn_server};

fn client(base_url: &str) -> ApiClient {
    let config = ClientConfig::new(base_url, "/tmp/unused-credentials.json").unwrap();
    ApiClient::new(&config)
}

#[tokio::test]
async fn test_fetch_update_fetch_round_trip() {
    let server = spawn_server().await;
    let token = AccessToken::new("tok-round-trip");
    server.seed_session(&token, UserId::new("u1")).await;

    let api = client(&server.base_url());

    // New user starts with an empty cart
    let items = api.fetch_cart(&token).await.unwrap();
    assert!(items.is_empty());

    let wanted = vec![item("a", 10_00, 2, 5), item("b", 2_50, 1, 3)];
    api.update_cart(&token, &wanted).await.unwrap();

    let items = api.fetch_cart(&token).await.unwrap();
    assert_eq!(items, wanted);
}

#[tokio::test]
async fn test_update_is_full_replace() {
    let server = spawn_server().await;
    let token = AccessToken::new("tok-replace");
    server.seed_session(&token, UserId::new("u1")).await;

    let api = client(&server.base_url());
    api.update_cart(&token, &[item("a", 10_00, 2, 5)]).await.unwrap();
    api.update_cart(&token, &[item("b", 5_00, 1, 5)]).await.unwrap();

    let items = api.fetch_cart(&token).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items.first().unwrap().id.as_str(), "b");
}

#[tokio::test]
async fn test_unknown_token_is_unauthorized() {
    let server = spawn_server().await;
    let api = client(&server.base_url());

    let result = api.fetch_cart(&AccessToken::new("never-issued")).await;
    assert!(matches!(result, Err(ApiError::Unauthorized)));
}

#[tokio::test]
async fn test_checkout_returns_payment_url_and_clears_cart() {
    let server = spawn_server().await;
    let token = AccessToken::new("tok-checkout");
    server.seed_session(&token, UserId::new("u1")).await;

    let api = client(&server.base_url());
    let items = vec![item("a", 10_00, 2, 5)];
    api.update_cart(&token, &items).await.unwrap();

    let payment_url = api.checkout(&token, &items).await.unwrap();
    assert!(payment_url.starts_with("https://pay.test/checkout?order_id="));

    // Order-creation side effect: the stored cart is cleared
    assert!(api.fetch_cart(&token).await.unwrap().is_empty());

    let orders = api.fetch_orders(&token).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(
        orders.first().unwrap().total,
        rust_decimal::Decimal::new(20_00, 2)
    );
}

#[tokio::test]
async fn test_checkout_over_stock_is_rejected_with_message() {
    let server = spawn_server().await;
    let token = AccessToken::new("tok-stock");
    server.seed_session(&token, UserId::new("u1")).await;

    let api = client(&server.base_url());
    let result = api.checkout(&token, &[item("a", 10_00, 4, 2)]).await;

    match result {
        Err(ApiError::Rejected(message)) => assert!(message.contains("out of stock")),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn test_checkout_empty_cart_is_rejected() {
    let server = spawn_server().await;
    let token = AccessToken::new("tok-empty");
    server.seed_session(&token, UserId::new("u1")).await;

    let api = client(&server.base_url());
    let result = api.checkout(&token, &[]).await;

    match result {
        Err(ApiError::Rejected(message)) => assert_eq!(message, "cart is empty"),
        other => panic!("expected rejection, got {other:?}"),
    }
}
