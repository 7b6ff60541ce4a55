//! Cart session orchestration.
//!
//! [`CartSession`] is the Rust rendering of the cart view: it owns the
//! cart value (nothing else writes it), applies the pure mutations
//! optimistically, schedules the debounced background sync, and drives
//! checkout. Rendering is the caller's concern; the session exposes the
//! state a view needs (items, total, inline error, loading flag).

use std::time::Duration;

use tracing::instrument;

use breadfruit_core::{AuthState, Cart, CartStatus, CurrentUser, ProductId};

use crate::api::{ApiClient, ApiError};
use crate::config::ClientConfig;
use crate::credentials::CredentialStore;
use crate::sync::{Debouncer, SYNC_QUIESCENCE};

/// What the view should do after a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Guarded no-op: a checkout was already in flight, or auth was
    /// still being established.
    NotAttempted,
    /// The user is not authenticated; send them to the login flow.
    RedirectToLogin,
    /// Order created; redirect the browser to the payment URL.
    RedirectToPayment(String),
    /// The attempt failed; the message is in [`CartSession::error`].
    Rejected,
}

/// The client cart session: single writer of the cart state.
pub struct CartSession<C> {
    api: ApiClient,
    credentials: C,
    sync: Debouncer,
    cart: Cart,
    user: CurrentUser,
    error: Option<String>,
    checkout_in_flight: bool,
}

impl<C> CartSession<C>
where
    C: CredentialStore + Clone + Send + 'static,
{
    /// Create a session with the standard sync quiescence window.
    #[must_use]
    pub fn new(config: &ClientConfig, credentials: C) -> Self {
        Self::with_sync_window(config, credentials, SYNC_QUIESCENCE)
    }

    /// Create a session with a custom sync quiescence window.
    #[must_use]
    pub fn with_sync_window(config: &ClientConfig, credentials: C, window: Duration) -> Self {
        Self {
            api: ApiClient::new(config),
            credentials,
            sync: Debouncer::new(window),
            cart: Cart::default(),
            user: CurrentUser::default(),
            error: None,
            checkout_in_flight: false,
        }
    }

    /// Current cart state.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current user/auth state.
    #[must_use]
    pub const fn user(&self) -> &CurrentUser {
        &self.user
    }

    /// Inline error message from the last failed operation, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True while a checkout request is in flight.
    #[must_use]
    pub const fn is_checking_out(&self) -> bool {
        self.checkout_in_flight
    }

    /// True while a background sync is scheduled or running.
    #[must_use]
    pub fn is_sync_pending(&self) -> bool {
        self.sync.is_pending()
    }

    /// Initial load of the server-authoritative cart.
    ///
    /// Missing credential short-circuits to an unauthenticated user
    /// without a network call. This is the only transition through
    /// `Fetching`; later background syncs never toggle it.
    ///
    /// Any failure leaves auth `Failed` so [`checkout`](Self::checkout)
    /// routes to login rather than staying guarded forever. A transport
    /// failure keeps the stored credential, so a retried `load` can
    /// still succeed with it.
    #[instrument(skip(self))]
    pub async fn load(&mut self) {
        let Some(token) = self.credentials.load().ok().flatten() else {
            self.user = CurrentUser::unauthenticated();
            return;
        };

        self.cart.status = CartStatus::Fetching;

        match self.api.fetch_cart(&token).await {
            Ok(items) => {
                self.cart = Cart::fetched(items);
                self.user.auth = AuthState::Authenticated;
            }
            Err(ApiError::Unauthorized) => {
                self.invalidate_credential();
                self.cart.status = CartStatus::Failed;
            }
            Err(error) => {
                tracing::warn!(%error, "initial cart fetch failed");
                self.cart.status = CartStatus::Failed;
                self.user.auth = AuthState::Failed;
            }
        }
    }

    /// Increment an item's quantity (capped at stock) and queue a sync.
    pub fn increase(&mut self, item_id: &ProductId) {
        self.cart = self.cart.increase(item_id);
        self.queue_sync();
    }

    /// Decrement an item's quantity (removing it at 1) and queue a sync.
    pub fn decrease(&mut self, item_id: &ProductId) {
        self.cart = self.cart.decrease(item_id);
        self.queue_sync();
    }

    /// Convenience: `price * quantity` summed over the cart.
    #[must_use]
    pub fn total_amount(&self) -> rust_decimal::Decimal {
        self.cart.total_amount()
    }

    /// Schedule a debounced replace-cart call with the current snapshot.
    ///
    /// Fire-and-forget: a failed sync leaves local and server state
    /// divergent until the next successful one. The credential is read
    /// inside the scheduled body, at request time.
    fn queue_sync(&mut self) {
        let api = self.api.clone();
        let credentials = self.credentials.clone();
        let items = self.cart.items.clone();

        self.sync.call(async move {
            let Some(token) = credentials.load().ok().flatten() else {
                tracing::warn!("skipping cart sync: no credential");
                return;
            };
            if let Err(error) = api.update_cart(&token, &items).await {
                tracing::warn!(%error, "background cart sync failed");
            }
        });
    }

    /// Attempt checkout.
    ///
    /// Guarded: a no-op while a prior checkout is in flight or auth is
    /// still `Authenticating`; `Failed` auth redirects to login. The
    /// pending background sync is cancelled before the order request is
    /// sent - the order carries the full current item list, so a stale
    /// sync landing after order creation could resurrect a cart the
    /// server just cleared. The loading flag is cleared on every exit.
    #[instrument(skip(self))]
    pub async fn checkout(&mut self) -> CheckoutOutcome {
        if self.checkout_in_flight || self.user.auth == AuthState::Authenticating {
            return CheckoutOutcome::NotAttempted;
        }
        if self.user.auth == AuthState::Failed {
            return CheckoutOutcome::RedirectToLogin;
        }

        self.checkout_in_flight = true;
        self.sync.cancel();

        let Some(token) = self.credentials.load().ok().flatten() else {
            self.user = CurrentUser::unauthenticated();
            self.error = Some("you are no longer signed in".to_string());
            self.checkout_in_flight = false;
            return CheckoutOutcome::Rejected;
        };

        let outcome = match self.api.checkout(&token, &self.cart.items).await {
            Ok(payment_url) => {
                self.error = None;
                CheckoutOutcome::RedirectToPayment(payment_url)
            }
            Err(ApiError::Rejected(message)) => {
                self.error = Some(message);
                CheckoutOutcome::Rejected
            }
            Err(ApiError::Unauthorized) => {
                self.invalidate_credential();
                self.error = Some("your session has expired, please sign in again".to_string());
                CheckoutOutcome::Rejected
            }
            Err(error) => {
                self.error = Some(error.to_string());
                CheckoutOutcome::Rejected
            }
        };

        self.checkout_in_flight = false;
        outcome
    }

    /// Clear the rejected credential and mark the user unauthenticated.
    fn invalidate_credential(&mut self) {
        if let Err(error) = self.credentials.clear() {
            tracing::warn!(%error, "failed to clear rejected credential");
        }
        self.user = CurrentUser::unauthenticated();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use breadfruit_core::{AccessToken, CartItem};

    use super::*;
    use crate::credentials::MemoryCredentials;

    /// Nothing listens here; correct guards return before any request.
    fn unreachable_session(credentials: MemoryCredentials) -> CartSession<MemoryCredentials> {
        let config = ClientConfig::new("http://127.0.0.1:1", "/tmp/unused.json").unwrap();
        CartSession::new(&config, credentials)
    }

    fn item(id: &str, quantity: u32, stock: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            price: Decimal::new(10_00, 2),
            quantity,
            stock,
        }
    }

    #[tokio::test]
    async fn test_checkout_noop_while_authenticating() {
        let mut session = unreachable_session(MemoryCredentials::new());
        assert_eq!(session.user().auth, AuthState::Authenticating);

        let outcome = session.checkout().await;
        assert_eq!(outcome, CheckoutOutcome::NotAttempted);
        assert!(!session.is_checking_out());
    }

    #[tokio::test]
    async fn test_checkout_redirects_to_login_when_auth_failed() {
        let mut session = unreachable_session(MemoryCredentials::new());
        session.user = CurrentUser::unauthenticated();

        let outcome = session.checkout().await;
        assert_eq!(outcome, CheckoutOutcome::RedirectToLogin);
    }

    #[tokio::test]
    async fn test_checkout_with_missing_credential_marks_auth_failed() {
        // Authenticated state but the stored token has vanished
        let mut session = unreachable_session(MemoryCredentials::new());
        session.user.auth = AuthState::Authenticated;

        let outcome = session.checkout().await;

        assert_eq!(outcome, CheckoutOutcome::Rejected);
        assert_eq!(session.user().auth, AuthState::Failed);
        assert!(session.error().is_some());
        assert!(!session.is_checking_out());
    }

    #[tokio::test]
    async fn test_load_without_credential_skips_network() {
        let mut session = unreachable_session(MemoryCredentials::new());
        session.load().await;

        assert_eq!(session.user().auth, AuthState::Failed);
        // Never reached Fetching - the call short-circuited
        assert_eq!(session.cart().status, CartStatus::Idle);
    }

    #[tokio::test]
    async fn test_load_transport_failure_fails_auth_but_keeps_credential() {
        let credentials = MemoryCredentials::with_token(AccessToken::new("tok"));
        let mut session = unreachable_session(credentials.clone());

        session.load().await;

        assert_eq!(session.cart().status, CartStatus::Failed);
        // Not stuck in Authenticating: checkout now routes to login
        assert_eq!(session.user().auth, AuthState::Failed);
        assert_eq!(session.checkout().await, CheckoutOutcome::RedirectToLogin);
        // The credential survives for a retried load
        assert!(credentials.load().unwrap().is_some());
    }

    #[tokio::test]
    async fn test_mutations_apply_optimistically_and_queue_sync() {
        let credentials = MemoryCredentials::with_token(AccessToken::new("tok"));
        let mut session = unreachable_session(credentials);
        session.cart = Cart::fetched(vec![item("a", 1, 3)]);

        session.increase(&ProductId::new("a"));
        assert_eq!(session.cart().items.first().unwrap().quantity, 2);
        assert!(session.is_sync_pending());

        session.decrease(&ProductId::new("a"));
        session.decrease(&ProductId::new("a"));
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_cancels_pending_sync() {
        let mut session = unreachable_session(MemoryCredentials::new());
        session.user.auth = AuthState::Authenticated;
        session.cart = Cart::fetched(vec![item("a", 1, 3)]);

        session.increase(&ProductId::new("a"));
        assert!(session.is_sync_pending());

        // Missing credential: checkout bails out, but only after the
        // pending sync has been dropped
        let _ = session.checkout().await;
        assert!(!session.is_sync_pending());
    }

    #[tokio::test]
    async fn test_total_amount_tracks_cart() {
        let mut session = unreachable_session(MemoryCredentials::new());
        session.cart = Cart::fetched(vec![item("a", 2, 5)]);
        assert_eq!(session.total_amount(), Decimal::new(20_00, 2));
    }
}
