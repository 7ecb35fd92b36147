//! GROQ queries for the product catalog.
//!
//! Projections flatten references (`productImage.asset->url`,
//! `category._ref`) into plain strings so the document structs deserialize
//! without nested reference objects.

/// All products, projected down to what the storefront grid renders.
pub const PRODUCTS: &str = r#"*[_type == "product"]{
  _id,
  title,
  price,
  description,
  discountPercentage,
  "imageUrl": productImage.asset->url,
  tags
}"#;

/// A single product by document id, with every catalog field.
///
/// Takes an `$id` parameter.
pub const PRODUCT_BY_ID: &str = r#"*[_type == "product" && _id == $id][0]{
  _id,
  title,
  price,
  priceWithoutDiscount,
  description,
  discountPercentage,
  badge,
  inventory,
  "category": category._ref,
  "imageUrl": productImage.asset->url,
  tags
}"#;

/// Product count, used by the readiness probe as a cheap end-to-end check.
pub const PRODUCT_COUNT: &str = r#"count(*[_type == "product"])"#;
