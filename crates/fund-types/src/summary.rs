//! Project funding summary.
//!
//! Combines the invoice-based per-asset totals and the card totals for a
//! project and measures them against the project's fiat goal.

use crate::totals::checked_sum;
use crate::{AssetTotals, DonationTotals, TypeError};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Funding progress of one project across every provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundingSummary {
    /// Project slug the totals were aggregated for.
    pub project: String,

    /// Fiat funding goal.
    pub goal: Decimal,

    /// Invoice-based donations, per settlement asset.
    pub by_asset: AssetTotals,

    /// Card donations (fiat, single bucket).
    pub card: DonationTotals,

    /// Fiat raised across all assets and cards.
    pub total_fiat: Decimal,

    /// Number of donations across all assets and cards.
    pub contributions: u64,

    /// `total_fiat / goal`, or zero when the goal is zero.
    pub raised_fraction: Decimal,

    /// When the totals were computed.
    pub computed_at: DateTime<Utc>,
}

impl FundingSummary {
    /// Build a summary from provider totals.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::InvalidGoal`] if `goal` is negative, and
    /// [`TypeError::Overflow`] if the fiat total or the raised fraction
    /// doesn't fit a decimal.
    pub fn new(
        project: impl Into<String>,
        goal: Decimal,
        by_asset: AssetTotals,
        card: DonationTotals,
    ) -> Result<Self, TypeError> {
        if goal < Decimal::ZERO {
            return Err(TypeError::InvalidGoal(goal));
        }

        let total_fiat = checked_sum(by_asset.total_fiat()?, card.total_donations_fiat, "fiat total")?;
        let contributions = by_asset
            .total_donations()
            .checked_add(card.num_donations)
            .ok_or_else(|| TypeError::Overflow("contribution count".to_string()))?;
        let raised_fraction = if goal.is_zero() {
            Decimal::ZERO
        } else {
            total_fiat.checked_div(goal).ok_or_else(|| {
                TypeError::Overflow(format!("raised fraction {} / {}", total_fiat, goal))
            })?
        };

        Ok(Self {
            project: project.into(),
            goal,
            by_asset,
            card,
            total_fiat,
            contributions,
            raised_fraction,
            computed_at: Utc::now(),
        })
    }

    /// Check if the goal has been reached.
    pub fn is_funded(&self) -> bool {
        !self.goal.is_zero() && self.total_fiat >= self.goal
    }
}
