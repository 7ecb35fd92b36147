//! Content Lake query API client.
//!
//! Products live as documents in a hosted content dataset and are fetched
//! with GROQ queries over plain HTTP. Read traffic goes through the CDN edge
//! by default, and query results are additionally cached in-process with moka
//! (5 minute TTL) so a page render rarely leaves the box.

mod cache;
mod client;
mod conversions;
pub mod documents;
pub mod queries;

pub use client::SanityClient;

use thiserror::Error;

/// Errors from the CMS query API.
#[derive(Debug, Error)]
pub enum SanityError {
    /// Could not reach the API at all (DNS, connect, timeout)
    #[error("NetworkError: {0}")]
    Network(#[source] reqwest::Error),

    /// Transport-level failure after a connection was made
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    /// The API returned a structured error payload
    #[error("{kind}: {description}")]
    Api { kind: String, description: String },

    /// Response body did not match the expected shape
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Document not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}
