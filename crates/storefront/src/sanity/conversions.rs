//! Conversion from wire documents to domain types.

use driftwood_core::{CategoryId, Product, ProductId};

use super::documents::ProductDocument;

/// Convert a query API document into a domain product.
///
/// Missing scalar fields default to empty/zero rather than failing the whole
/// listing; an unrecognized badge label is dropped with a warning.
pub(super) fn convert_product(doc: ProductDocument) -> Product {
    let badge = doc.badge.as_deref().and_then(|label| {
        label
            .parse()
            .inspect_err(|e| tracing::warn!(id = %doc.id, error = %e, "skipping badge"))
            .ok()
    });

    Product {
        id: ProductId::from(doc.id),
        title: doc.title.unwrap_or_default(),
        price: doc.price.unwrap_or_default(),
        original_price: doc.price_without_discount,
        discount_percentage: doc.discount_percentage,
        description: doc.description.unwrap_or_default(),
        image_url: doc.image_url,
        tags: doc.tags.unwrap_or_default(),
        badge,
        category: doc.category.map(CategoryId::from),
        inventory: doc.inventory,
    }
}
