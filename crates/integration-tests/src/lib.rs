//! Integration tests for Driftwood Home.
//!
//! The harness boots a stub CMS query API and the real storefront router
//! in-process on ephemeral ports, then drives the storefront over HTTP the
//! way a browser would: form posts, redirects, cookies.
//!
//! Run with: `cargo test -p driftwood-integration-tests`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use driftwood_storefront::config::{SanityConfig, StorefrontConfig};
use driftwood_storefront::state::AppState;

/// Product documents the stub CMS serves by default.
///
/// One discounted product with an image and tags, one plain product without
/// either, so both rendering paths get exercised.
#[must_use]
pub fn sample_products() -> Value {
    json!([
        {
            "_id": "prod-armchair",
            "title": "Harbor Armchair",
            "price": 249.0,
            "description": "A deep-seated armchair in washed linen with solid oak legs.",
            "discountPercentage": 15.0,
            "imageUrl": "https://cdn.sanity.io/images/r79i5c8/production/armchair.jpg",
            "tags": ["linen", "lounge"]
        },
        {
            "_id": "prod-lamp",
            "title": "Dune Table Lamp",
            "price": 89.0,
            "description": "Hand-thrown ceramic base with a natural raffia shade.",
            "discountPercentage": 0.0,
            "imageUrl": null,
            "tags": []
        }
    ])
}

/// Stub query API handler.
///
/// Understands just enough GROQ to serve the storefront: a `count(...)`
/// query, a single-document lookup via the `$id` parameter, and the full
/// listing for everything else.
async fn query_handler(
    State(products): State<Arc<Value>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let groq = params.get("query").cloned().unwrap_or_default();

    if groq.starts_with("count(") {
        let count = products.as_array().map_or(0, Vec::len);
        return Json(json!({ "result": count, "ms": 1.0 }));
    }

    if let Some(raw) = params.get("$id") {
        // Parameter values arrive JSON-encoded
        let id: String = serde_json::from_str(raw).unwrap_or_default();
        let found = products
            .as_array()
            .and_then(|list| {
                list.iter()
                    .find(|p| p.get("_id").and_then(Value::as_str) == Some(id.as_str()))
            })
            .cloned()
            .unwrap_or(Value::Null);
        return Json(json!({ "result": found, "ms": 1.0 }));
    }

    Json(json!({ "result": products.as_ref().clone(), "ms": 2.0 }))
}

/// Boot a stub CMS serving the given product documents.
///
/// Returns the origin to use as `SANITY_API_BASE`.
pub async fn spawn_cms(products: Value) -> String {
    let app = Router::new()
        .route("/{version}/data/query/{dataset}", get(query_handler))
        .with_state(Arc::new(products));
    spawn(app).await
}

/// Boot a stub CMS that rejects every query with a parse error.
pub async fn spawn_failing_cms() -> String {
    let app = Router::new().route(
        "/{version}/data/query/{dataset}",
        get(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": {
                        "description": "expected '}' following object body",
                        "type": "queryParseError"
                    }
                })),
            )
        }),
    );
    spawn(app).await
}

/// An origin nothing is listening on, for connectivity-failure tests.
pub async fn unreachable_origin() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Failed to read listener addr");
    drop(listener);
    format!("http://{addr}")
}

/// Boot the real storefront wired to the given CMS origin.
///
/// Returns the storefront's base URL.
pub async fn spawn_storefront(cms_url: &str) -> String {
    let config = StorefrontConfig {
        host: "127.0.0.1".parse().expect("loopback address"),
        port: 0,
        base_url: "http://localhost".to_owned(),
        sanity: SanityConfig {
            project_id: "r79i5c8".to_owned(),
            dataset: "production".to_owned(),
            api_version: "2023-01-01".to_owned(),
            use_cdn: true,
            api_token: None,
            api_base: Some(cms_url.to_owned()),
        },
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    };

    let state = AppState::new(config);
    spawn(driftwood_storefront::app(state)).await
}

/// A client that keeps cookies and follows redirects, like a browser.
#[must_use]
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Bind an ephemeral port and serve the router in the background.
async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read listener addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server error");
    });
    format!("http://{addr}")
}
