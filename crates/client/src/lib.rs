//! Breadfruit Client - cart session library.
//!
//! Models the browser side of the cart flow: optimistic local mutation,
//! trailing-edge debounced persistence, and the checkout orchestration.
//!
//! # Architecture
//!
//! - [`session::CartSession`] owns the cart value and is its only writer
//! - [`sync::Debouncer`] coalesces mutation bursts into one `POST /cart`
//! - [`api::ApiClient`] wraps the server's HTTP surface with `reqwest`
//! - [`credentials`] holds the opaque bearer token in persistent storage
//!
//! # Example
//!
//! ```rust,ignore
//! use breadfruit_client::config::ClientConfig;
//! use breadfruit_client::credentials::FileCredentials;
//! use breadfruit_client::session::CartSession;
//!
//! let config = ClientConfig::from_env()?;
//! let credentials = FileCredentials::new(&config.credentials_path);
//! let mut session = CartSession::new(&config, credentials);
//!
//! session.load().await;
//! session.increase(&product_id);
//! match session.checkout().await {
//!     CheckoutOutcome::RedirectToPayment(url) => open(url),
//!     CheckoutOutcome::RedirectToLogin => open_login(),
//!     _ => render(session.error()),
//! }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod credentials;
pub mod session;
pub mod sync;
