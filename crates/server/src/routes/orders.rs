//! Order route handlers: checkout and order history.

use axum::{Json, extract::State};
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use breadfruit_core::api::{CartPayload, CheckoutResponse, OrdersResponse};
use breadfruit_core::{Order, OrderId, OrderStatus};

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::routes::cart::validate_items;
use crate::state::AppState;

/// Convert the posted cart into an order.
///
/// Checkout is server-authoritative: the posted items are re-validated
/// against their stock regardless of what the client showed. On success
/// the stored cart is cleared and the response carries the payment
/// redirect URL. The posted items are the order snapshot; any pending
/// background sync the client had is superseded by this call.
#[instrument(skip(state, payload), fields(item_count = payload.cart.len()))]
pub async fn checkout(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    Json(payload): Json<CartPayload>,
) -> Result<Json<CheckoutResponse>> {
    if payload.cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }
    validate_items(&payload.cart)?;

    let total = payload
        .cart
        .iter()
        .map(breadfruit_core::CartItem::line_total)
        .sum();

    let order = Order {
        id: OrderId::new(Uuid::new_v4().to_string()),
        user_id: user_id.clone(),
        items: payload.cart,
        total,
        status: OrderStatus::PaymentPending,
        created_at: Utc::now(),
    };

    state.documents().orders().create(order.clone()).await?;
    state.documents().carts().clear(&user_id).await?;

    let payment_url = state.config().payment_redirect(&order.id);
    tracing::info!(order_id = %order.id, %total, "order created");

    Ok(Json(CheckoutResponse::redirect(payment_url)))
}

/// Fetch the authenticated user's orders, newest first.
#[instrument(skip(state))]
pub async fn history(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
) -> Result<Json<OrdersResponse>> {
    let orders = state.documents().orders().for_user(&user_id).await?;

    Ok(Json(OrdersResponse {
        success: true,
        data: Some(orders),
        message: None,
    }))
}
