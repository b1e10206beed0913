//! API error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fund_aggregator::AggregatorError;
use serde::Serialize;
use thiserror::Error;

/// API errors that can be returned to clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),

    /// Error from the aggregator layer.
    #[error("aggregator error: {0}")]
    Aggregator(#[from] AggregatorError),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone())),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
            ApiError::Aggregator(e) if e.is_invalid_input() => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(e.to_string()))
            }
            ApiError::Aggregator(e) if e.is_provider_failure() => {
                tracing::error!("Provider error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "provider_unavailable",
                    Some(e.to_string()),
                )
            }
            ApiError::Aggregator(e) => {
                tracing::error!("Aggregator error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fund_ingestion::{IngestionError, Provider};

    fn status(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status(ApiError::BadRequest("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(ApiError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status(ApiError::Internal("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_aggregator_error_mapping() {
        let invalid = AggregatorError::InvalidInput("empty project slug".into());
        assert_eq!(status(invalid.into()), StatusCode::BAD_REQUEST);

        let unavailable = AggregatorError::from(IngestionError::unavailable(Provider::Stripe, "HTTP 503"));
        assert_eq!(status(unavailable.into()), StatusCode::BAD_GATEWAY);

        let malformed = AggregatorError::from(IngestionError::malformed(Provider::BtcPay, "expected array"));
        assert_eq!(status(malformed.into()), StatusCode::BAD_GATEWAY);

        let overflow = AggregatorError::Overflow("fiat total".into());
        assert_eq!(status(overflow.into()), StatusCode::INTERNAL_SERVER_ERROR);

        let config = AggregatorError::from(IngestionError::Config("tls backend".into()));
        assert_eq!(status(config.into()), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
