//! Catalog inspection commands.
//!
//! Reads from the same dataset the storefront serves, through the
//! storefront's own client, so what these commands print is what the site
//! renders.
//!
//! # Environment Variables
//!
//! Uses the `SANITY_*` variables with the same defaults as the storefront.

use thiserror::Error;

use driftwood_core::ProductId;
use driftwood_storefront::config::{ConfigError, SanityConfig};
use driftwood_storefront::sanity::{SanityClient, SanityError};

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// CMS query failed.
    #[error("CMS error: {0}")]
    Cms(#[from] SanityError),
}

/// Build a CMS client from the environment.
fn client() -> Result<SanityClient, CatalogError> {
    dotenvy::dotenv().ok();
    let config = SanityConfig::from_env()?;
    Ok(SanityClient::new(&config))
}

/// List every product in the dataset.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), CatalogError> {
    let client = client()?;
    let products = client.list_products().await?;

    println!("{:<28} {:>10}  {}", "ID", "PRICE", "TITLE");
    for product in &products {
        println!(
            "{:<28} {:>10.2}  {}",
            product.id, product.price, product.title
        );
    }
    println!("{} products", products.len());

    Ok(())
}

/// Show a single product in full.
#[allow(clippy::print_stdout)]
pub async fn show(id: &str) -> Result<(), CatalogError> {
    let client = client()?;
    let product = client.get_product(&ProductId::from(id)).await?;

    println!("id:          {}", product.id);
    println!("title:       {}", product.title);
    println!("price:       ${:.2}", product.price);
    if let Some(original) = product.original_price {
        println!("was:         ${original:.2}");
    }
    if product.is_discounted()
        && let Some(pct) = product.discount_percentage
    {
        println!("discount:    {pct}% OFF");
    }
    if let Some(badge) = product.badge {
        println!("badge:       {badge}");
    }
    if let Some(inventory) = product.inventory {
        println!("inventory:   {inventory}");
    }
    if let Some(category) = &product.category {
        println!("category:    {category}");
    }
    if !product.tags.is_empty() {
        println!("tags:        {}", product.tags.join(", "));
    }
    if let Some(url) = &product.image_url {
        println!("image:       {url}");
    }
    println!("description: {}", product.description);

    Ok(())
}
