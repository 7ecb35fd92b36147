//! Shared application state.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::sanity::SanityClient;

/// Shared application state, cheap to clone into every handler.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cms: SanityClient,
}

impl AppState {
    /// Build the state and the CMS client it owns.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let cms = SanityClient::new(&config.sanity);
        Self {
            inner: Arc::new(AppStateInner { config, cms }),
        }
    }

    /// Application configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// CMS query client.
    #[must_use]
    pub fn cms(&self) -> &SanityClient {
        &self.inner.cms
    }
}
