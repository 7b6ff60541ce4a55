//! Cart route handlers.
//!
//! The persisted cart is a mirror of the client's local state; after a
//! successful replace it is the source of truth. Replace carries the
//! full item sequence, never a delta, so retries are harmless.

use axum::{Json, extract::State};
use tracing::instrument;

use breadfruit_core::api::{CartPayload, FetchCartResponse, UpdateCartResponse};
use breadfruit_core::CartItem;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Validate an incoming item sequence against the cart invariants.
///
/// Quantities below 1 and negative prices are malformed; a quantity
/// above stock cannot be fulfilled and is reported with the item name.
pub(crate) fn validate_items(items: &[CartItem]) -> Result<()> {
    for item in items {
        if item.price.is_sign_negative() {
            return Err(AppError::BadRequest(format!(
                "invalid price for {}",
                item.name
            )));
        }
        if item.quantity == 0 {
            return Err(AppError::BadRequest(format!(
                "invalid quantity for {}",
                item.name
            )));
        }
        if item.quantity > item.stock {
            return Err(AppError::BadRequest(format!(
                "{} is out of stock",
                item.name
            )));
        }
    }
    Ok(())
}

/// Fetch the authenticated user's cart.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
) -> Result<Json<FetchCartResponse>> {
    let items = state.documents().carts().get(&user_id).await?;

    Ok(Json(FetchCartResponse {
        success: true,
        data: Some(items),
        message: None,
    }))
}

/// Replace the authenticated user's cart with the posted item sequence.
#[instrument(skip(state, payload), fields(item_count = payload.cart.len()))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user_id): RequireAuth,
    Json(payload): Json<CartPayload>,
) -> Result<Json<UpdateCartResponse>> {
    validate_items(&payload.cart)?;

    state
        .documents()
        .carts()
        .replace(&user_id, payload.cart)
        .await?;

    Ok(Json(UpdateCartResponse {
        success: true,
        message: None,
    }))
}
