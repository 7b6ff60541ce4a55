//! Shared harness for Breadfruit integration tests.
//!
//! Spawns the real server router on an ephemeral port and hands tests a
//! handle to both the HTTP address and the backing state, so they can
//! seed sessions and inspect documents directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use rust_decimal::Decimal;

use breadfruit_core::{AccessToken, CartItem, ProductId, UserId};
use breadfruit_server::config::ServerConfig;
use breadfruit_server::state::AppState;

/// A running in-process server.
pub struct TestServer {
    /// Address the server is listening on.
    pub addr: SocketAddr,
    /// State backing the server, for seeding and inspection.
    pub state: AppState,
}

impl TestServer {
    /// Base URL for a client pointed at this server.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Seed a live session so bearer requests resolve to `user_id`.
    ///
    /// # Panics
    ///
    /// Panics if the session table write fails.
    pub async fn seed_session(&self, token: &AccessToken, user_id: UserId) {
        self.state
            .documents()
            .sessions()
            .insert(token, user_id)
            .await
            .expect("failed to seed session");
    }

    /// Seed a stored cart for a user.
    ///
    /// # Panics
    ///
    /// Panics if the cart write fails.
    pub async fn seed_cart(&self, user_id: &UserId, items: Vec<CartItem>) {
        self.state
            .documents()
            .carts()
            .replace(user_id, items)
            .await
            .expect("failed to seed cart");
    }
}

/// Spawn the server on an ephemeral local port.
///
/// # Panics
///
/// Panics if the listener cannot be bound.
pub async fn spawn_server() -> TestServer {
    let config = ServerConfig {
        host: "127.0.0.1".parse().expect("valid address"),
        port: 0,
        payment_url: "https://pay.test/checkout".to_string(),
    };
    let state = AppState::new(config);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");

    let app = breadfruit_server::router(state.clone());
    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("test server crashed");
    });

    TestServer { addr, state }
}

/// Cart item fixture with price given in cents.
#[must_use]
pub fn item(id: &str, price_cents: i64, quantity: u32, stock: u32) -> CartItem {
    CartItem {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        price: Decimal::new(price_cents, 2),
        quantity,
        stock,
    }
}
