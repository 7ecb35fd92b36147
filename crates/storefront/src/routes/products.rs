//! Store page route handler.
//!
//! One page renders the whole storefront: the product grid fetched from the
//! CMS, and the visitor's cart panel beside it. Cart mutations post back and
//! redirect here, so this handler also surfaces the one-shot cart notice.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use driftwood_core::Product;

use super::cart::{self, CartView};
use crate::filters;
use crate::state::AppState;

/// Longest description shown on a product card, in characters.
const DESCRIPTION_LIMIT: usize = 100;

/// Message shown when the CMS could not be reached at all.
const NETWORK_ERROR_MESSAGE: &str = "Network error occurred. Please check your connection.";

/// Message shown for any other catalog fetch failure.
const GENERIC_ERROR_MESSAGE: &str = "Failed to load products. Please try again later.";

/// Product display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub discount_label: Option<String>,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
}

// =============================================================================
// Type Conversions
// =============================================================================

/// Format an amount as a price string.
fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: truncate_description(&product.description),
            price: format_price(product.price),
            discount_label: product
                .discount_percentage
                .filter(|pct| *pct > 0.0)
                .map(|pct| format!("{pct}% OFF")),
            image_url: product.image_url.clone(),
            tags: product.tags.clone(),
        }
    }
}

/// Shorten a description to at most `DESCRIPTION_LIMIT` characters.
///
/// Counts characters rather than bytes so a multi-byte character is never
/// split. Text at or under the limit comes back unchanged; longer text is
/// cut at the limit with "..." appended.
fn truncate_description(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_LIMIT) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_owned(),
    }
}

/// Pick the user-facing message for a failed catalog fetch.
///
/// Connectivity failures carry a "NetworkError" label in their error text
/// and get a connection-specific message; everything else gets the generic
/// one.
fn fetch_failure_message(error_text: &str) -> &'static str {
    if error_text.contains("NetworkError") {
        NETWORK_ERROR_MESSAGE
    } else {
        GENERIC_ERROR_MESSAGE
    }
}

/// Store page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct StorePageTemplate {
    pub products: Vec<ProductView>,
    pub cart: CartView,
    pub notice: Option<String>,
    pub error: Option<&'static str>,
}

/// Display the store page.
///
/// A catalog fetch failure does not fail the page: the shell still renders,
/// with an error message in place of the grid and cart panel.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let (products, error) = match state.cms().list_products().await {
        Ok(products) => (products.iter().map(ProductView::from).collect(), None),
        Err(e) => {
            tracing::error!(error = %e, "failed to load products");
            (Vec::new(), Some(fetch_failure_message(&e.to_string())))
        }
    };

    let cart = CartView::from(&cart::load_cart(&session).await);
    let notice = cart::take_notice(&session).await;

    StorePageTemplate {
        products,
        cart,
        notice,
        error,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use driftwood_core::ProductId;

    use super::*;

    fn product(description: &str, discount: Option<f64>) -> Product {
        Product {
            id: ProductId::from("prod-armchair"),
            title: "Harbor Armchair".to_owned(),
            price: 249.0,
            original_price: None,
            discount_percentage: discount,
            description: description.to_owned(),
            image_url: None,
            tags: vec!["linen".to_owned()],
            badge: None,
            category: None,
            inventory: None,
        }
    }

    #[test]
    fn short_descriptions_pass_through_unchanged() {
        assert_eq!(truncate_description("short"), "short");

        let exactly_limit = "a".repeat(100);
        assert_eq!(truncate_description(&exactly_limit), exactly_limit);
    }

    #[test]
    fn long_descriptions_are_cut_with_an_ellipsis() {
        let long = "a".repeat(150);
        let truncated = truncate_description(&long);

        assert_eq!(truncated.len(), 103);
        assert!(truncated.ends_with("..."));
        assert!(truncated.starts_with(&"a".repeat(100)));
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let long = "é".repeat(150);
        let truncated = truncate_description(&long);

        assert_eq!(truncated.chars().count(), 103);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn connectivity_failures_get_the_network_message() {
        assert_eq!(
            fetch_failure_message("NetworkError: connection refused"),
            NETWORK_ERROR_MESSAGE
        );
        // The label can appear anywhere in the chain
        assert_eq!(
            fetch_failure_message("CMS error: NetworkError: dns failure"),
            NETWORK_ERROR_MESSAGE
        );
    }

    #[test]
    fn other_failures_get_the_generic_message() {
        assert_eq!(
            fetch_failure_message("queryParseError: unexpected token"),
            GENERIC_ERROR_MESSAGE
        );
        assert_eq!(
            fetch_failure_message("Rate limited, retry after 1 seconds"),
            GENERIC_ERROR_MESSAGE
        );
    }

    #[test]
    fn view_formats_the_price_with_two_decimals() {
        let view = ProductView::from(&product("Wide seat.", None));
        assert_eq!(view.price, "$249.00");
    }

    #[test]
    fn view_shows_a_discount_label_only_for_positive_percentages() {
        let view = ProductView::from(&product("Wide seat.", Some(15.0)));
        assert_eq!(view.discount_label.as_deref(), Some("15% OFF"));

        let view = ProductView::from(&product("Wide seat.", Some(12.5)));
        assert_eq!(view.discount_label.as_deref(), Some("12.5% OFF"));

        let view = ProductView::from(&product("Wide seat.", Some(0.0)));
        assert!(view.discount_label.is_none());

        let view = ProductView::from(&product("Wide seat.", None));
        assert!(view.discount_label.is_none());
    }

    #[test]
    fn view_truncates_the_description() {
        let view = ProductView::from(&product(&"d".repeat(150), None));
        assert_eq!(view.description.len(), 103);
        assert!(view.description.ends_with("..."));
    }
}
