//! Route handlers for the storefront API.
//!
//! The surface the cart client consumes:
//!
//! - `GET /cart` - fetch the authenticated user's cart
//! - `POST /cart` - idempotent full replace of the cart
//! - `POST /orders` - convert the cart into an order (checkout)
//! - `GET /orders` - order history

pub mod cart;
pub mod orders;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show).post(cart::update))
        .route("/orders", post(orders::checkout).get(orders::history))
}
