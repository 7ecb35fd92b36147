//! Application error types and HTTP response conversion.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::sanity::SanityError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// CMS query API error
    #[error("CMS error: {0}")]
    Cms(#[from] SanityError),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Report server-class errors before mapping them to a client response
        match &self {
            Self::Cms(_) | Self::Internal(_) => {
                sentry::capture_error(&self);
                tracing::error!(error = %self, "request failed");
            }
            Self::NotFound(_) | Self::BadRequest(_) => {}
        }

        let status = match &self {
            Self::Cms(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Client-safe messages; details stay in the logs
        let message = match &self {
            Self::Cms(_) => "External service error".to_owned(),
            Self::Internal(_) => "Internal server error".to_owned(),
            Self::NotFound(_) | Self::BadRequest(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Convenience result type for handlers.
pub type Result<T> = std::result::Result<T, AppError>;

/// Record a breadcrumb on the current Sentry scope.
///
/// Breadcrumbs show up attached to any error captured later in the same
/// request, which is how we reconstruct what a session did before failing.
pub fn add_breadcrumb(category: &str, message: &str, data: Vec<(&str, String)>) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_owned()),
        message: Some(message.to_owned()),
        data: data
            .into_iter()
            .map(|(k, v)| (k.to_owned(), v.into()))
            .collect(),
        ..Default::default()
    });
}
