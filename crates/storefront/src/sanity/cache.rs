//! Cached value types for the CMS response cache.

use driftwood_core::Product;

/// Values stored in the query cache.
#[derive(Debug, Clone)]
pub enum CacheValue {
    /// Full product listing
    Products(Vec<Product>),
    /// Single product, boxed to keep the enum small
    Product(Box<Product>),
}
