//! Order repository.

use breadfruit_core::{Order, UserId};

use super::{Documents, RepositoryError};

/// Repository for order documents.
pub struct OrderRepository<'a> {
    docs: &'a Documents,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(docs: &'a Documents) -> Self {
        Self { docs }
    }

    /// Store a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if an order with the same id
    /// already exists.
    pub async fn create(&self, order: Order) -> Result<(), RepositoryError> {
        let mut inner = self.docs.write().await;
        if inner.orders.contains_key(&order.id) {
            return Err(RepositoryError::Conflict(format!(
                "order already exists: {}",
                order.id
            )));
        }
        inner.orders.insert(order.id.clone(), order);
        Ok(())
    }

    /// Get a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store lookup fails.
    pub async fn for_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let inner = self.docs.read().await;
        let mut orders: Vec<Order> = inner
            .orders
            .values()
            .filter(|order| order.user_id == *user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}
