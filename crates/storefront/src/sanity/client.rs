//! HTTP client for the Content Lake query API.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use driftwood_core::{Product, ProductId};

use super::SanityError;
use super::cache::CacheValue;
use super::conversions::convert_product;
use super::documents::{ErrorResponse, ProductDocument, QueryResponse};
use super::queries;
use crate::config::SanityConfig;

const CACHE_MAX_ENTRIES: u64 = 1000;
const CACHE_TTL_SECS: u64 = 300;
const PRODUCTS_CACHE_KEY: &str = "products";

/// Client for the CMS query API.
///
/// Cheap to clone; the connection pool and response cache are shared.
#[derive(Clone)]
pub struct SanityClient {
    inner: Arc<SanityClientInner>,
}

struct SanityClientInner {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<SecretString>,
    cache: Cache<String, CacheValue>,
}

impl SanityClient {
    /// Build a client from configuration.
    #[must_use]
    pub fn new(config: &SanityConfig) -> Self {
        let origin = config.api_base.as_ref().map_or_else(
            || {
                let host = if config.use_cdn {
                    "apicdn.sanity.io"
                } else {
                    "api.sanity.io"
                };
                format!("https://{}.{host}", config.project_id)
            },
            |base| base.trim_end_matches('/').to_owned(),
        );
        let endpoint = format!(
            "{origin}/v{}/data/query/{}",
            config.api_version, config.dataset
        );

        let cache = Cache::builder()
            .max_capacity(CACHE_MAX_ENTRIES)
            .time_to_live(Duration::from_secs(CACHE_TTL_SECS))
            .build();

        Self {
            inner: Arc::new(SanityClientInner {
                client: reqwest::Client::new(),
                endpoint,
                api_token: config.api_token.clone(),
                cache,
            }),
        }
    }

    /// Run a GROQ query and deserialize the `result` field of the envelope.
    ///
    /// Parameters are passed as `$name` query-string entries, JSON-encoded
    /// per the query API convention.
    async fn query<T: serde::de::DeserializeOwned>(
        &self,
        groq: &str,
        params: &[(&str, serde_json::Value)],
    ) -> Result<T, SanityError> {
        let mut url = format!("{}?query={}", self.inner.endpoint, urlencoding::encode(groq));
        for (name, value) in params {
            let json = serde_json::to_string(value)?;
            let _ = write!(url, "&${name}={}", urlencoding::encode(&json));
        }

        let mut request = self.inner.client.get(&url);
        if let Some(token) = &self.inner.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                SanityError::Network(e)
            } else {
                SanityError::Http(e)
            }
        })?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(SanityError::RateLimited(retry_after));
        }

        let status = response.status();
        let body = response.text().await.map_err(SanityError::Http)?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %snippet(&body, 500),
                "query API returned an error"
            );
            return Err(parse_api_error(status, &body));
        }

        let envelope: QueryResponse<T> = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %snippet(&body, 500),
                "failed to parse query response"
            );
            SanityError::Parse(e)
        })?;

        if let Some(ms) = envelope.ms {
            tracing::debug!(ms, "query executed");
        }

        Ok(envelope.result)
    }

    /// Fetch every product, cached.
    ///
    /// # Errors
    ///
    /// Returns `SanityError` if the query API is unreachable or rejects the
    /// query.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, SanityError> {
        if let Some(CacheValue::Products(products)) = self.inner.cache.get(PRODUCTS_CACHE_KEY).await
        {
            tracing::debug!("cache hit for product listing");
            return Ok(products);
        }

        let documents: Vec<ProductDocument> = self.query(queries::PRODUCTS, &[]).await?;
        let products: Vec<Product> = documents.into_iter().map(convert_product).collect();

        self.inner
            .cache
            .insert(
                PRODUCTS_CACHE_KEY.to_owned(),
                CacheValue::Products(products.clone()),
            )
            .await;

        Ok(products)
    }

    /// Fetch a single product by document id, cached.
    ///
    /// # Errors
    ///
    /// Returns `SanityError::NotFound` if no document matches the id.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, SanityError> {
        let cache_key = format!("product:{id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            tracing::debug!("cache hit for product");
            return Ok(*product);
        }

        let document: Option<ProductDocument> = self
            .query(
                queries::PRODUCT_BY_ID,
                &[("id", serde_json::Value::String(id.as_str().to_owned()))],
            )
            .await?;

        let product = document
            .map(convert_product)
            .ok_or_else(|| SanityError::NotFound(format!("Product not found: {id}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Count products without touching the cache.
    ///
    /// The readiness probe wants a live answer, not a cached one.
    #[instrument(skip(self))]
    pub async fn product_count(&self) -> Result<i64, SanityError> {
        self.query(queries::PRODUCT_COUNT, &[]).await
    }

    /// Drop every cached query result.
    ///
    /// Called when a lookup misses against the cached listing, which usually
    /// means the dataset changed under us.
    pub async fn invalidate_products(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

/// Map a non-success response body to an API error.
fn parse_api_error(status: reqwest::StatusCode, body: &str) -> SanityError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => SanityError::Api {
            kind: parsed.error.kind.unwrap_or_else(|| format!("HTTP {status}")),
            description: parsed
                .error
                .description
                .unwrap_or_else(|| "no description".to_owned()),
        },
        Err(_) => SanityError::Api {
            kind: format!("HTTP {status}"),
            description: snippet(body, 200).into_owned(),
        },
    }
}

/// First `max` characters of a body, for log lines.
fn snippet(body: &str, max: usize) -> Cow<'_, str> {
    match body.char_indices().nth(max) {
        Some((index, _)) => Cow::Owned(format!("{}...", &body[..index])),
        None => Cow::Borrowed(body),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config(use_cdn: bool, api_base: Option<&str>) -> SanityConfig {
        SanityConfig {
            project_id: "r79i5c8".to_owned(),
            dataset: "production".to_owned(),
            api_version: "2023-01-01".to_owned(),
            use_cdn,
            api_token: None,
            api_base: api_base.map(str::to_owned),
        }
    }

    #[test]
    fn endpoint_reads_through_the_cdn_by_default() {
        let client = SanityClient::new(&config(true, None));
        assert_eq!(
            client.inner.endpoint,
            "https://r79i5c8.apicdn.sanity.io/v2023-01-01/data/query/production"
        );
    }

    #[test]
    fn endpoint_hits_the_live_api_when_cdn_is_off() {
        let client = SanityClient::new(&config(false, None));
        assert_eq!(
            client.inner.endpoint,
            "https://r79i5c8.api.sanity.io/v2023-01-01/data/query/production"
        );
    }

    #[test]
    fn endpoint_override_replaces_the_derived_origin() {
        let client = SanityClient::new(&config(true, Some("http://127.0.0.1:9999/")));
        assert_eq!(
            client.inner.endpoint,
            "http://127.0.0.1:9999/v2023-01-01/data/query/production"
        );
    }

    #[test]
    fn structured_api_errors_keep_kind_and_description() {
        let body = r#"{"error":{"description":"expected '}'","type":"queryParseError"}}"#;
        let err = parse_api_error(reqwest::StatusCode::BAD_REQUEST, body);
        assert_eq!(err.to_string(), "queryParseError: expected '}'");
    }

    #[test]
    fn unstructured_api_errors_fall_back_to_the_status() {
        let err = parse_api_error(reqwest::StatusCode::BAD_GATEWAY, "<html>upstream</html>");
        let message = err.to_string();
        assert!(message.starts_with("HTTP 502"));
        assert!(message.contains("<html>upstream</html>"));
    }

    #[test]
    fn snippet_truncates_long_bodies_on_char_boundaries() {
        let body = "é".repeat(600);
        let cut = snippet(&body, 500);
        assert_eq!(cut.chars().count(), 503);
        assert!(cut.ends_with("..."));

        let short = "all fine";
        assert_eq!(snippet(short, 500), "all fine");
    }
}
