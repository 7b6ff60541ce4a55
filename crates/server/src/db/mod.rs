//! Document store and repositories.
//!
//! Persistence engine design is out of scope for this service: the
//! backing store is an external document store reached through simple
//! key lookups. [`Documents`] is the in-process implementation of that
//! contract (per-user cart, token session table, order documents), and
//! the repository types are the only way handlers touch it.

mod carts;
mod orders;
mod sessions;

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;

use breadfruit_core::{CartItem, Order, OrderId, UserId};

pub use carts::CartRepository;
pub use orders::OrderRepository;
pub use sessions::SessionRepository;

/// Errors from the document store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A write conflicted with an existing document.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The store itself failed.
    #[error("Document store error: {0}")]
    Store(String),
}

/// Handle to the document store.
///
/// Cheaply cloneable; all repositories created from the same handle see
/// the same documents.
#[derive(Debug, Clone, Default)]
pub struct Documents {
    inner: Arc<RwLock<DocumentsInner>>,
}

#[derive(Debug, Default)]
pub(crate) struct DocumentsInner {
    pub(crate) carts: HashMap<UserId, Vec<CartItem>>,
    pub(crate) sessions: HashMap<String, UserId>,
    pub(crate) orders: HashMap<OrderId, Order>,
}

impl Documents {
    /// Create an empty document store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) async fn read(&self) -> tokio::sync::RwLockReadGuard<'_, DocumentsInner> {
        self.inner.read().await
    }

    pub(crate) async fn write(&self) -> tokio::sync::RwLockWriteGuard<'_, DocumentsInner> {
        self.inner.write().await
    }

    /// Repository for per-user cart documents.
    #[must_use]
    pub const fn carts(&self) -> CartRepository<'_> {
        CartRepository::new(self)
    }

    /// Repository for the token session table.
    #[must_use]
    pub const fn sessions(&self) -> SessionRepository<'_> {
        SessionRepository::new(self)
    }

    /// Repository for order documents.
    #[must_use]
    pub const fn orders(&self) -> OrderRepository<'_> {
        OrderRepository::new(self)
    }
}
