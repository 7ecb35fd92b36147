//! Session-scoped storefront models.

pub mod cart;
pub mod session;

pub use cart::{Cart, CartEntry};
pub use session::keys as session_keys;
