//! Cart repository: one cart document per user.

use breadfruit_core::{CartItem, UserId};

use super::{Documents, RepositoryError};

/// Repository for per-user cart documents.
pub struct CartRepository<'a> {
    docs: &'a Documents,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(docs: &'a Documents) -> Self {
        Self { docs }
    }

    /// Get the user's cart; a user without a cart document has an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store lookup fails.
    pub async fn get(&self, user_id: &UserId) -> Result<Vec<CartItem>, RepositoryError> {
        let inner = self.docs.read().await;
        Ok(inner.carts.get(user_id).cloned().unwrap_or_default())
    }

    /// Replace the user's cart with the given item sequence.
    ///
    /// Idempotent full replace - the unit the client's debounced sync
    /// sends.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store write fails.
    pub async fn replace(
        &self,
        user_id: &UserId,
        items: Vec<CartItem>,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.docs.write().await;
        inner.carts.insert(user_id.clone(), items);
        Ok(())
    }

    /// Remove the user's cart document (the order-creation side effect).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store write fails.
    pub async fn clear(&self, user_id: &UserId) -> Result<(), RepositoryError> {
        let mut inner = self.docs.write().await;
        inner.carts.remove(user_id);
        Ok(())
    }
}
