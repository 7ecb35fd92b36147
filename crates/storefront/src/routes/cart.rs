//! Cart route handlers.
//!
//! The cart lives in the session. Mutations are plain HTML form posts that
//! redirect back to the store page, which re-renders the cart panel and
//! shows the one-shot confirmation notice.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use driftwood_core::ProductId;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::{Cart, CartEntry, session_keys};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub product_id: String,
    pub title: String,
    pub price: String,
    pub image_url: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: usize,
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Format an amount as a price string.
fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.entries().iter().map(CartItemView::from).collect(),
            item_count: cart.len(),
        }
    }
}

impl From<&CartEntry> for CartItemView {
    fn from(entry: &CartEntry) -> Self {
        Self {
            product_id: entry.product_id.to_string(),
            title: entry.title.clone(),
            price: format_price(entry.price),
            image_url: entry.image_url.clone(),
        }
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, or an empty one.
pub(crate) async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Write the cart back to the session.
async fn store_cart(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(session_keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(format!("failed to store cart in session: {e}")))
}

/// Take the one-shot cart notice, clearing it from the session.
pub(crate) async fn take_notice(session: &Session) -> Option<String> {
    session
        .remove::<String>(session_keys::CART_NOTICE)
        .await
        .ok()
        .flatten()
}

/// Store the one-shot cart notice.
///
/// A lost notice is only a missing confirmation line, so failures are logged
/// rather than surfaced.
async fn set_notice(session: &Session, message: String) {
    if let Err(e) = session.insert(session_keys::CART_NOTICE, &message).await {
        tracing::warn!("Failed to store cart notice: {e}");
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: String,
}

/// Add a product to the cart.
///
/// Resolves the product against the cached listing and appends a snapshot
/// entry. Adding the same product again appends another entry; there is no
/// quantity to bump.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let product_id = ProductId::from(form.product_id);

    let products = state.cms().list_products().await?;
    let Some(product) = products.iter().find(|p| p.id == product_id) else {
        // The cached listing may be stale; drop it so the next render refetches
        state.cms().invalidate_products().await;
        return Err(AppError::NotFound(format!("product {product_id}")));
    };

    let mut cart = load_cart(&session).await;
    cart.add(CartEntry::from(product));
    store_cart(&session, &cart).await?;

    add_breadcrumb(
        "cart",
        "Added product to cart",
        vec![
            ("product_id", product_id.to_string()),
            ("cart_len", cart.len().to_string()),
        ],
    );

    set_notice(
        &session,
        format!("{} has been added to your cart!", product.title),
    )
    .await;

    Ok(Redirect::to("/"))
}

/// Remove a product from the cart.
///
/// Removes every entry for the product, not just the first. Removing a
/// product that is not in the cart is a no-op.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<RemoveFromCartForm>) -> Result<Redirect> {
    let product_id = ProductId::from(form.product_id);

    let mut cart = load_cart(&session).await;
    let removed = cart.remove(&product_id);

    if removed > 0 {
        store_cart(&session, &cart).await?;
        tracing::debug!(removed, "removed product from cart");
    }

    Ok(Redirect::to("/"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn entry(id: &str, price: f64) -> CartEntry {
        CartEntry {
            product_id: ProductId::from(id),
            title: "Harbor Armchair".to_owned(),
            price,
            image_url: Some("https://cdn.example.com/armchair.jpg".to_owned()),
        }
    }

    #[test]
    fn cart_view_counts_every_entry() {
        let mut cart = Cart::default();
        cart.add(entry("prod-a", 249.0));
        cart.add(entry("prod-b", 89.0));
        cart.add(entry("prod-a", 249.0));

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 3);
        assert_eq!(view.items.len(), 3);
    }

    #[test]
    fn item_view_formats_the_price_with_two_decimals() {
        let view = CartItemView::from(&entry("prod-a", 249.0));
        assert_eq!(view.price, "$249.00");

        let view = CartItemView::from(&entry("prod-a", 89.5));
        assert_eq!(view.price, "$89.50");
    }

    #[test]
    fn empty_cart_produces_an_empty_view() {
        let view = CartView::from(&Cart::default());
        assert_eq!(view.item_count, 0);
        assert!(view.items.is_empty());
    }
}
