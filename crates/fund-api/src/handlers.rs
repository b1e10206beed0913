//! Route handlers for the API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use fund_ingestion::{ChargeSource, InvoiceSource};
use fund_types::FundingSummary;
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;
use crate::types::{DonationsResponse, GoalQuery, HealthResponse, TargetsResponse};

/// GET /health - Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /v1/funds/:fund/projects/:project/donations - Per-asset and card totals.
pub async fn get_donations<I: InvoiceSource, C: ChargeSource>(
    State(state): State<Arc<AppState<I, C>>>,
    Path((fund, project)): Path<(String, String)>,
) -> Result<Json<DonationsResponse>, ApiError> {
    let aggregator = state.fund(&fund)?;

    let donations = aggregator.aggregate_project(&project).await?;

    Ok(Json(DonationsResponse::new(fund, donations)))
}

/// GET /v1/funds/:fund/projects/:project/summary - Progress against a fiat goal.
pub async fn get_summary<I: InvoiceSource, C: ChargeSource>(
    State(state): State<Arc<AppState<I, C>>>,
    Path((fund, project)): Path<(String, String)>,
    Query(query): Query<GoalQuery>,
) -> Result<Json<FundingSummary>, ApiError> {
    let goal = query.parse()?;
    let aggregator = state.fund(&fund)?;

    let summary = aggregator.funding_summary(&project, goal).await?;

    Ok(Json(summary))
}

/// GET /v1/funds/:fund/targets - Native amounts needed to reach a fiat goal.
pub async fn get_targets<I: InvoiceSource, C: ChargeSource>(
    State(state): State<Arc<AppState<I, C>>>,
    Path(fund): Path<String>,
    Query(query): Query<GoalQuery>,
) -> Result<Json<TargetsResponse>, ApiError> {
    let goal = query.parse()?;
    let aggregator = state.fund(&fund)?;

    let targets = aggregator.target_amounts(goal).await?;

    Ok(Json(TargetsResponse {
        fund,
        goal,
        fiat_currency: aggregator.config().fiat_currency.clone(),
        targets,
    }))
}
