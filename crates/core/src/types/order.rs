//! Order record materialized by checkout.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::CartItem;
use super::id::{OrderId, UserId};

/// Payment status of an order.
///
/// Checkout only ever produces `PaymentPending`; the payment processor
/// flips it to `Paid` out of band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    PaymentPending,
    Paid,
}

/// An order created from the cart at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    /// Item snapshot taken at checkout time.
    pub items: Vec<CartItem>,
    /// Sum of `price * quantity` over the snapshot.
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}
