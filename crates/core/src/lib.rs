//! Shared catalog types and the content schema for Driftwood Home.
//!
//! Everything in this crate is plain data: no I/O, no async. The storefront
//! and the CLI both depend on it, so keep additions dependency-light.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod schema;
pub mod types;

pub use types::{Badge, CategoryId, Product, ProductId};
