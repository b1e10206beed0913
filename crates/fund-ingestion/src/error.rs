//! Error types for the ingestion layer.
//!
//! Every failure a provider call can produce falls into one of three
//! buckets: the provider could not be reached or refused the request, the
//! provider answered with something we cannot decode, or the caller handed
//! us an unusable identifier or credential. External errors (reqwest,
//! serde_json) are flattened into owned strings at the boundary.

use std::fmt;
use thiserror::Error;

/// Payment provider a call was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// Invoice-style processor (BTCPay Server Greenfield API).
    BtcPay,
    /// Card processor (Stripe).
    Stripe,
}

impl Provider {
    /// Lowercase provider name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::BtcPay => "btcpay",
            Provider::Stripe => "stripe",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Errors that can occur while fetching provider records.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Network failure, timeout, or non-2xx response.
    #[error("{provider} unavailable: {cause}")]
    ProviderUnavailable { provider: Provider, cause: String },

    /// Response body was not the JSON shape we expect.
    #[error("malformed response from {provider}: {cause}")]
    MalformedResponse { provider: Provider, cause: String },

    /// Empty or unparsable identifier, URL, or credential.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration errors (e.g., missing env vars).
    #[error("config error: {0}")]
    Config(String),
}

impl IngestionError {
    /// Build a [`IngestionError::ProviderUnavailable`] from any displayable cause.
    pub fn unavailable(provider: Provider, cause: impl fmt::Display) -> Self {
        IngestionError::ProviderUnavailable {
            provider,
            cause: cause.to_string(),
        }
    }

    /// Build a [`IngestionError::MalformedResponse`] from any displayable cause.
    pub fn malformed(provider: Provider, cause: impl fmt::Display) -> Self {
        IngestionError::MalformedResponse {
            provider,
            cause: cause.to_string(),
        }
    }

    /// Provider involved in the failure, if any.
    pub fn provider(&self) -> Option<Provider> {
        match self {
            IngestionError::ProviderUnavailable { provider, .. }
            | IngestionError::MalformedResponse { provider, .. } => Some(*provider),
            IngestionError::InvalidInput(_) | IngestionError::Config(_) => None,
        }
    }
}

/// Reject empty (or whitespace-only) required parameters.
pub(crate) fn require_non_empty(name: &str, value: &str) -> Result<(), IngestionError> {
    if value.trim().is_empty() {
        return Err(IngestionError::InvalidInput(format!("{} must not be empty", name)));
    }
    Ok(())
}
