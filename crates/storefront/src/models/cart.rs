//! Session cart model.

use serde::{Deserialize, Serialize};

use driftwood_core::{Product, ProductId};

/// One line in the cart.
///
/// Carries a snapshot of the product fields the cart panel renders, so the
/// panel never re-fetches catalog data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: ProductId,
    pub title: String,
    pub price: f64,
    pub image_url: Option<String>,
}

impl From<&Product> for CartEntry {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            title: product.title.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
        }
    }
}

/// A visitor's cart.
///
/// There is no quantity field: adding the same product twice appends a
/// second entry, and entries keep their insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Append an entry to the end of the cart.
    pub fn add(&mut self, entry: CartEntry) {
        self.entries.push(entry);
    }

    /// Remove every entry for the given product.
    ///
    /// Returns how many entries were removed.
    pub fn remove(&mut self, product_id: &ProductId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.product_id != *product_id);
        before - self.entries.len()
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
