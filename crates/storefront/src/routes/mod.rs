//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Store page (product grid + cart panel)
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (probes the CMS)
//!
//! # Cart (form posts, redirect back to the store page)
//! POST /cart/add               - Append a product to the cart
//! POST /cart/remove            - Remove every entry for a product
//! ```

pub mod cart;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
}

/// Create the complete application router (without middleware).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .nest("/cart", cart_routes())
}
