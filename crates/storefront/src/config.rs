//! Storefront configuration loaded from environment variables.
//!
//! Every variable has a default, so the binary boots with no environment at
//! all and talks to the published studio project. The defaults mirror the
//! values the storefront launched with.
//!
//! # Environment Variables
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `SANITY_PROJECT_ID` - Content Lake project id (default: r79i5c8)
//! - `SANITY_DATASET` - Dataset name (default: production)
//! - `SANITY_API_VERSION` - Query API version date (default: 2023-01-01)
//! - `SANITY_USE_CDN` - Read through the CDN edge (default: true)
//! - `SANITY_API_TOKEN` - Bearer token for private datasets (optional)
//! - `SANITY_API_BASE` - Override the derived API origin (optional; used by
//!   tests and local emulators)
//! - `SENTRY_DSN` - Sentry error tracking DSN (optional)
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag (optional)
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry tracing sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_PROJECT_ID: &str = "r79i5c8";
const DEFAULT_DATASET: &str = "production";
const DEFAULT_API_VERSION: &str = "2023-01-01";

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// CMS query API configuration
    pub sanity: SanityConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag (e.g. production, staging)
    pub sentry_environment: Option<String>,
    /// Sentry error event sample rate
    pub sentry_sample_rate: f32,
    /// Sentry performance tracing sample rate
    pub sentry_traces_sample_rate: f32,
}

/// CMS query API configuration.
///
/// Implements `Debug` manually to redact the API token.
#[derive(Clone)]
pub struct SanityConfig {
    /// Content Lake project id (lowercase alphanumeric)
    pub project_id: String,
    /// Dataset name, usually `production`
    pub dataset: String,
    /// Query API version date, e.g. 2023-01-01
    pub api_version: String,
    /// Read through the CDN edge instead of the live API
    pub use_cdn: bool,
    /// Bearer token; only needed for private datasets
    pub api_token: Option<SecretString>,
    /// Full origin override; replaces the derived `*.sanity.io` origin
    pub api_base: Option<String>,
}

impl std::fmt::Debug for SanityConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SanityConfig")
            .field("project_id", &self.project_id)
            .field("dataset", &self.dataset)
            .field("api_version", &self.api_version)
            .field("use_cdn", &self.use_cdn)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse or a token fails
    /// validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("STOREFRONT_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_HOST".to_owned(), e.to_string())
            })?;
        let port = get_env_or_default("STOREFRONT_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("STOREFRONT_PORT".to_owned(), e.to_string())
            })?;
        let base_url = get_env_or_default("STOREFRONT_BASE_URL", "http://localhost:3000");

        let sanity = SanityConfig::from_env()?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_env_or_default("SENTRY_SAMPLE_RATE", "1.0")
            .parse::<f32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SENTRY_SAMPLE_RATE".to_owned(), e.to_string())
            })?;
        let sentry_traces_sample_rate = get_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0")
            .parse::<f32>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("SENTRY_TRACES_SAMPLE_RATE".to_owned(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            base_url,
            sanity,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SanityConfig {
    /// Load the CMS configuration from environment variables.
    ///
    /// Public because the CLI loads just this part without the server config.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        let project_id = get_env_or_default("SANITY_PROJECT_ID", DEFAULT_PROJECT_ID);
        validate_identifier(&project_id, "SANITY_PROJECT_ID")?;

        let dataset = get_env_or_default("SANITY_DATASET", DEFAULT_DATASET);
        validate_identifier(&dataset, "SANITY_DATASET")?;

        let api_version = get_env_or_default("SANITY_API_VERSION", DEFAULT_API_VERSION);
        validate_api_version(&api_version, "SANITY_API_VERSION")?;

        let use_cdn = get_env_or_default("SANITY_USE_CDN", "true")
            .parse::<bool>()
            .map_err(|e| ConfigError::InvalidEnvVar("SANITY_USE_CDN".to_owned(), e.to_string()))?;

        let api_token = get_optional_secret("SANITY_API_TOKEN")?;

        let api_base = match get_optional_env("SANITY_API_BASE") {
            Some(value) => {
                url::Url::parse(&value).map_err(|e| {
                    ConfigError::InvalidEnvVar("SANITY_API_BASE".to_owned(), e.to_string())
                })?;
                Some(value)
            }
            None => None,
        };

        Ok(Self {
            project_id,
            dataset,
            api_version,
            use_cdn,
            api_token,
            api_base,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Validate a project id or dataset name: lowercase alphanumeric plus `-`.
fn validate_identifier(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            var_name.to_owned(),
            format!("'{value}' must be lowercase alphanumeric (plus '-')"),
        ))
    }
}

/// Validate an API version: a `YYYY-MM-DD` date tag.
fn validate_api_version(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let valid = value.len() == 10
        && value.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            var_name.to_owned(),
            format!("'{value}' must be a YYYY-MM-DD version date"),
        ))
    }
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
    }

    #[allow(clippy::cast_precision_loss)]
    let total = s.chars().count() as f64;
    counts
        .values()
        .map(|&n| {
            #[allow(clippy::cast_precision_loss)]
            let p = n as f64 / total;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();
    if let Some(pattern) = PLACEHOLDER_PATTERNS.iter().find(|p| lower.contains(*p)) {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!("appears to be a placeholder (contains '{pattern}')"),
        ));
    }

    // Real API tokens have high entropy
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_owned(),
            format!(
                "entropy {entropy:.2} bits/char is below the minimum \
                 {MIN_ENTROPY_BITS_PER_CHAR:.1}"
            ),
        ));
    }

    Ok(())
}

/// Load and validate an optional secret from the environment.
fn get_optional_secret(key: &str) -> Result<Option<SecretString>, ConfigError> {
    match std::env::var(key) {
        Ok(value) => {
            validate_secret_strength(&value, key)?;
            Ok(Some(SecretString::from(value)))
        }
        Err(_) => Ok(None),
    }
}
