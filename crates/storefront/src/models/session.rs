//! Session state layout.
//!
//! Everything the storefront remembers about a visitor lives under these
//! keys. Sessions are memory-backed and expire with the browser, and the
//! cart goes with them.

/// Session storage keys.
pub mod keys {
    /// The visitor's cart ([`crate::models::Cart`])
    pub const CART: &str = "cart";
    /// One-shot confirmation message shown after a cart change
    pub const CART_NOTICE: &str = "cart_notice";
}
