//! Catalog domain types.

mod badge;
mod id;
mod product;

pub use badge::{Badge, ParseBadgeError};
pub use id::{CategoryId, ProductId};
pub use product::Product;
