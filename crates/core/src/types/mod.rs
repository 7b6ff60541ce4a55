//! Shared domain types.

pub mod auth;
pub mod cart;
pub mod id;
pub mod order;

pub use auth::*;
pub use cart::*;
pub use id::*;
pub use order::*;
