//! Error types for the aggregator.

use fund_ingestion::IngestionError;
use fund_types::TypeError;
use thiserror::Error;

/// Errors that can occur while aggregating a project's donations.
///
/// Any error aborts the whole aggregation; partial totals are never returned.
#[derive(Debug, Error)]
pub enum AggregatorError {
    /// Error from the ingestion layer (provider unreachable, bad response,
    /// bad identifier).
    #[error(transparent)]
    Ingestion(#[from] IngestionError),

    /// Invalid aggregation parameters.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Combined totals don't fit a decimal.
    #[error("overflow: {0}")]
    Overflow(String),
}

impl AggregatorError {
    /// True for caller mistakes (empty slug, empty store id, bad goal...).
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            AggregatorError::InvalidInput(_)
                | AggregatorError::Ingestion(IngestionError::InvalidInput(_))
        )
    }

    /// True when a provider could not be reached or answered with garbage.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            AggregatorError::Ingestion(
                IngestionError::ProviderUnavailable { .. } | IngestionError::MalformedResponse { .. }
            )
        )
    }
}

impl From<TypeError> for AggregatorError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::InvalidGoal(_) => AggregatorError::InvalidInput(err.to_string()),
            TypeError::Overflow(what) => AggregatorError::Overflow(what),
        }
    }
}
