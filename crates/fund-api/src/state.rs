//! Application state for the API server.

use crate::error::ApiError;
use fund_aggregator::Aggregator;
use std::collections::BTreeMap;

/// Shared application state: one aggregator per fund.
pub struct AppState<I, C> {
    funds: BTreeMap<String, Aggregator<I, C>>,
}

impl<I, C> AppState<I, C> {
    /// Create an empty state.
    pub fn new() -> Self {
        Self {
            funds: BTreeMap::new(),
        }
    }

    /// Register a fund's aggregator (builder pattern).
    pub fn with_fund(mut self, fund: impl Into<String>, aggregator: Aggregator<I, C>) -> Self {
        self.funds.insert(fund.into(), aggregator);
        self
    }

    /// Look up a fund's aggregator.
    pub fn fund(&self, fund: &str) -> Result<&Aggregator<I, C>, ApiError> {
        self.funds
            .get(fund)
            .ok_or_else(|| ApiError::NotFound(format!("unknown fund: {}", fund)))
    }
}

impl<I, C> Default for AppState<I, C> {
    fn default() -> Self {
        Self::new()
    }
}
