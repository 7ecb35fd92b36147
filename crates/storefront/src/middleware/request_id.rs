//! Request ID middleware for log and error correlation.
//!
//! Each request gets an id that is recorded in the tracing span, tagged on
//! the Sentry scope, and echoed back in the response headers. Upstream
//! proxies that already assign one win; otherwise a UUID v4 is minted here.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Id supplied by an upstream proxy, if the header is present and clean.
fn upstream_request_id(request: &Request) -> Option<String> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(String::from)
}

/// Middleware that ensures every request has a unique request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = upstream_request_id(&request).unwrap_or_else(|| Uuid::new_v4().to_string());

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    // Echo the id so clients can quote it in bug reports
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;

    use super::*;

    #[test]
    fn reuses_the_upstream_header() {
        let request = Request::builder()
            .header(REQUEST_ID_HEADER, "edge-7f3a")
            .body(Body::empty())
            .unwrap();

        assert_eq!(upstream_request_id(&request).as_deref(), Some("edge-7f3a"));
    }

    #[test]
    fn missing_header_means_a_fresh_id() {
        let request = Request::builder().body(Body::empty()).unwrap();
        assert!(upstream_request_id(&request).is_none());
    }
}
