//! API request and response types.

use crate::error::ApiError;
use fund_aggregator::ProjectDonations;
use fund_types::{Asset, AssetTotals, DonationTotals};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
}

/// Query parameters carrying a fiat funding goal.
///
/// The goal is kept as a string so a malformed value produces our own
/// 400 body instead of the extractor's plain-text rejection.
#[derive(Debug, Deserialize)]
pub struct GoalQuery {
    /// Fiat goal as a decimal string (required).
    pub goal: Option<String>,
}

impl GoalQuery {
    /// Parse the goal, rejecting missing, malformed, or negative values.
    pub fn parse(&self) -> Result<Decimal, ApiError> {
        let raw = self
            .goal
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::BadRequest("goal is required".to_string()))?;

        let goal = Decimal::from_str(raw)
            .map_err(|_| ApiError::BadRequest(format!("goal is not a decimal: {}", raw)))?;

        if goal < Decimal::ZERO {
            return Err(ApiError::BadRequest("goal must not be negative".to_string()));
        }
        Ok(goal)
    }
}

/// Donation totals for one project of one fund.
#[derive(Debug, Serialize)]
pub struct DonationsResponse {
    /// Fund the project belongs to.
    pub fund: String,
    /// Project slug.
    pub project: String,
    /// Invoice-provider donations, per asset symbol.
    pub by_asset: AssetTotals,
    /// Card donations.
    pub card: DonationTotals,
}

impl DonationsResponse {
    /// Wrap aggregated donations with the fund they were computed for.
    pub fn new(fund: String, donations: ProjectDonations) -> Self {
        Self {
            fund,
            project: donations.project,
            by_asset: donations.by_asset,
            card: donations.card,
        }
    }
}

/// Native amounts needed per asset to reach a fiat goal.
#[derive(Debug, Serialize)]
pub struct TargetsResponse {
    /// Fund whose store quoted the rates.
    pub fund: String,
    /// Fiat goal.
    pub goal: Decimal,
    /// Fiat currency of the goal.
    pub fiat_currency: String,
    /// Native target per asset symbol; zero when no rate was available.
    pub targets: BTreeMap<Asset, Decimal>,
}
