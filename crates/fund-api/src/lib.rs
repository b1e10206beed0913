//! fund-api: HTTP API layer for the donation reconciliation service
//!
//! This crate defines the REST API endpoints:
//! - GET /health
//! - GET /v1/funds/:fund/projects/:project/donations
//! - GET /v1/funds/:fund/projects/:project/summary?goal=
//! - GET /v1/funds/:fund/targets?goal=
//!
//! Handlers are generic over the provider sources so the same router serves
//! live provider clients in production and mock sources in tests.

mod error;
mod handlers;
mod state;
mod types;

pub use error::ApiError;
pub use state::AppState;
pub use types::{DonationsResponse, GoalQuery, HealthResponse, TargetsResponse};

use axum::{routing::get, Router};
use fund_ingestion::{ChargeSource, InvoiceSource};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router over the given state.
pub fn create_router<I, C>(state: Arc<AppState<I, C>>) -> Router
where
    I: InvoiceSource + 'static,
    C: ChargeSource + 'static,
{
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/v1/funds/:fund/projects/:project/donations",
            get(handlers::get_donations::<I, C>),
        )
        .route(
            "/v1/funds/:fund/projects/:project/summary",
            get(handlers::get_summary::<I, C>),
        )
        .route("/v1/funds/:fund/targets", get(handlers::get_targets::<I, C>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
