//! The catalog product as the storefront consumes it.

use serde::{Deserialize, Serialize};

use super::{Badge, CategoryId, ProductId};

/// A product after projection out of the Content Lake.
///
/// Prices are plain floats because that is what the studio stores; the
/// storefront formats them to two decimals at render time and never does
/// arithmetic beyond display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    /// Price before discount, when the editor filled it in.
    pub original_price: Option<f64>,
    /// Whole-number percentage, rendered as "`n`% OFF" on the card.
    pub discount_percentage: Option<f64>,
    pub description: String,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub badge: Option<Badge>,
    pub category: Option<CategoryId>,
    /// Units on hand. Informational only; the storefront does not reserve
    /// stock.
    pub inventory: Option<i64>,
}

impl Product {
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.discount_percentage.is_some_and(|pct| pct > 0.0)
    }
}
