//! Cart state and the pure quantity mutations.
//!
//! The cart is a plain value owned by exactly one writer (the client's
//! cart session). Mutations here never touch the network: they take a
//! cart and return the next cart, and the caller decides whether to
//! schedule a sync with the result.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// Fetch-status tag for the cart lifecycle.
///
/// `Idle -> Fetching -> {Fetched, Failed}`; `Fetched` is re-entered on
/// every successful mutation. Only the initial load goes through
/// `Fetching` - background syncs do not toggle it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    #[default]
    Idle,
    Fetching,
    Fetched,
    Failed,
}

/// A single line in the cart.
///
/// Invariants in a valid cart: `1 <= quantity <= stock`. An item whose
/// quantity would reach zero is removed from the cart, not retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Stable product identifier assigned by the store.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price in the store currency.
    pub price: Decimal,
    /// Units of this product in the cart.
    pub quantity: u32,
    /// Units available; quantity is clamped to this on increase.
    pub stock: u32,
}

impl CartItem {
    /// Line total: `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// The shopping cart: a fetch-status tag plus items in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Cart {
    pub status: CartStatus,
    pub items: Vec<CartItem>,
}

impl Cart {
    /// An empty cart in the given status.
    #[must_use]
    pub const fn empty(status: CartStatus) -> Self {
        Self {
            status,
            items: Vec::new(),
        }
    }

    /// A fetched cart holding the given items.
    #[must_use]
    pub const fn fetched(items: Vec<CartItem>) -> Self {
        Self {
            status: CartStatus::Fetched,
            items,
        }
    }

    /// Increment the quantity of the item with `item_id` by one.
    ///
    /// Silently caps at the item's stock: an increase past stock is a
    /// no-op, not an error. Unknown ids are also a no-op. Either way the
    /// status becomes `Fetched`, marking the cart as a confirmed,
    /// non-loading state.
    #[must_use]
    pub fn increase(&self, item_id: &ProductId) -> Self {
        Self {
            status: CartStatus::Fetched,
            items: self
                .items
                .iter()
                .map(|item| {
                    if item.id == *item_id && item.quantity < item.stock {
                        CartItem {
                            quantity: item.quantity + 1,
                            ..item.clone()
                        }
                    } else {
                        item.clone()
                    }
                })
                .collect(),
        }
    }

    /// Decrement the quantity of the item with `item_id` by one.
    ///
    /// An item at quantity 1 is removed from the cart entirely; the
    /// remaining items keep their relative order. Status becomes
    /// `Fetched` as with [`Self::increase`].
    #[must_use]
    pub fn decrease(&self, item_id: &ProductId) -> Self {
        Self {
            status: CartStatus::Fetched,
            items: self
                .items
                .iter()
                .filter_map(|item| {
                    if item.id == *item_id {
                        (item.quantity > 1).then(|| CartItem {
                            quantity: item.quantity - 1,
                            ..item.clone()
                        })
                    } else {
                        Some(item.clone())
                    }
                })
                .collect(),
        }
    }

    /// Sum of `price * quantity` over all items. Zero for an empty cart.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Total number of units across all items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// True when the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
