//! Provider configuration.
//!
//! Endpoints and credentials are passed to the clients explicitly. Nothing
//! in this crate reads the environment on a request path; the `from_env`
//! constructors exist for the server binary to call once at startup.
//!
//! # Environment Variables
//!
//! - `BTCPAY_URL`: Greenfield API base, e.g. `https://pay.example.org/api/v1`
//! - `BTCPAY_API_KEY`: Greenfield API key
//! - `STRIPE_<FUND>_SECRET_KEY` (falls back to `STRIPE_SECRET_KEY`)
//! - `PROVIDER_TIMEOUT_SECS`: per-request timeout (default: 10)

use crate::error::IngestionError;
use std::env;
use std::fmt;
use std::time::Duration;

/// Default per-request timeout for provider calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default Stripe REST API base URL.
pub const STRIPE_API_URL: &str = "https://api.stripe.com/v1";

/// Connection settings for the invoice provider.
#[derive(Clone)]
pub struct BtcPayConfig {
    /// Greenfield API base URL (up to and including `/api/v1`).
    pub base_url: String,

    /// API key sent as `Authorization: token <key>`.
    pub api_key: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl BtcPayConfig {
    /// Create a config with the default timeout.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from `BTCPAY_URL`, `BTCPAY_API_KEY` and `PROVIDER_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, IngestionError> {
        let config = Self::new(required_var("BTCPAY_URL")?, required_var("BTCPAY_API_KEY")?);
        Ok(config.with_timeout(timeout_from_env()?))
    }
}

// Keep the API key out of logs.
impl fmt::Debug for BtcPayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BtcPayConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Connection settings for the card provider.
#[derive(Clone)]
pub struct StripeConfig {
    /// REST API base URL (defaults to [`STRIPE_API_URL`]).
    pub base_url: String,

    /// Secret key sent as `Authorization: Bearer <key>`.
    pub secret_key: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl StripeConfig {
    /// Create a config for the public Stripe API with the default timeout.
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            base_url: STRIPE_API_URL.to_string(),
            secret_key: secret_key.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Point the client at a different base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load the secret key for one fund.
    ///
    /// Reads `STRIPE_<FUND>_SECRET_KEY` (fund slug upper-cased), falling back
    /// to `STRIPE_SECRET_KEY` for single-fund deployments.
    pub fn from_env_for_fund(fund: &str) -> Result<Self, IngestionError> {
        let fund_var = format!("STRIPE_{}_SECRET_KEY", env_key(fund));
        let secret_key = match optional_var(&fund_var) {
            Some(key) => key,
            None => required_var("STRIPE_SECRET_KEY").map_err(|_| {
                IngestionError::Config(format!("neither {} nor STRIPE_SECRET_KEY is set", fund_var))
            })?,
        };
        Ok(Self::new(secret_key).with_timeout(timeout_from_env()?))
    }
}

impl fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripeConfig")
            .field("base_url", &self.base_url)
            .field("secret_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Turn a fund slug into the fragment used in variable names
/// (`privacy-guides` -> `PRIVACY_GUIDES`).
pub fn env_key(slug: &str) -> String {
    slug.trim().replace('-', "_").to_uppercase()
}

/// Read a variable, treating unset and empty the same way.
pub fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Read a variable that must be set and non-empty.
pub fn required_var(name: &str) -> Result<String, IngestionError> {
    optional_var(name).ok_or_else(|| IngestionError::Config(format!("{} is not set", name)))
}

fn timeout_from_env() -> Result<Duration, IngestionError> {
    match optional_var("PROVIDER_TIMEOUT_SECS") {
        None => Ok(DEFAULT_TIMEOUT),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                IngestionError::Config(format!("PROVIDER_TIMEOUT_SECS must be a positive integer, got {:?}", raw))
            }),
    }
}
