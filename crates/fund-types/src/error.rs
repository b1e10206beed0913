//! Error types for fund-types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when working with types.
#[derive(Debug, Error)]
pub enum TypeError {
    /// Funding goal must be zero or positive.
    #[error("invalid funding goal: {0}")]
    InvalidGoal(Decimal),

    /// A sum or ratio exceeded the decimal range.
    #[error("decimal overflow: {0}")]
    Overflow(String),
}
