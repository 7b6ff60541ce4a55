//! Breadfruit Core - Shared types library.
//!
//! This crate provides common types used across the Breadfruit components:
//! - `client` - Cart session library consumed by browser-facing frontends
//! - `server` - Storefront API server (cart, orders)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! HTTP clients, no persistence. This keeps it lightweight and allows it
//! to be used on both sides of the wire without contract drift.
//!
//! # Modules
//!
//! - [`types`] - Cart, item, auth, and order types with the pure cart mutations
//! - [`api`] - Wire envelope types for the cart/orders HTTP surface

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod types;

pub use types::*;
