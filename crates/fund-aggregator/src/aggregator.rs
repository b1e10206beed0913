//! Aggregator orchestration.
//!
//! The [`Aggregator`] struct is the main entry point: it owns one invoice
//! source and one card source for a fund and produces per-project totals.
//! The free functions [`aggregate_invoice_based`] and
//! [`aggregate_charge_based`] hold the actual algorithms and work with any
//! source implementation.

use crate::classifier::classify;
use crate::converter::{accumulate, accumulate_charge, native_target};
use crate::error::AggregatorError;
use crate::filter::{filter_charges_by_project, filter_invoices_by_project};
use fund_ingestion::{ChargeSource, IngestionError, InvoiceSource, Provider};
use fund_types::{Asset, AssetTotals, DonationTotals, FundingSummary};
use futures::{stream, StreamExt, TryStreamExt};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Default bound on concurrent payment-method fetches per aggregation.
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 4;

/// Default fiat currency used to quote asset rates.
pub const DEFAULT_FIAT_CURRENCY: &str = "USD";

/// Configuration for one fund's aggregator.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Invoice-provider store holding the fund's invoices.
    pub store_id: String,

    /// Maximum payment-method fetches in flight at once.
    pub max_concurrent_fetches: usize,

    /// Fiat currency for rate quotes (`XMR_<fiat>`).
    pub fiat_currency: String,
}

impl AggregatorConfig {
    /// Create config for a store with default limits.
    pub fn new(store_id: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
            fiat_currency: DEFAULT_FIAT_CURRENCY.to_string(),
        }
    }

    /// Set the payment-method fetch concurrency bound.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fund_aggregator::AggregatorConfig;
    ///
    /// // Reproduce strictly sequential fetching
    /// let config = AggregatorConfig::new("store-id").with_max_concurrent_fetches(1);
    /// ```
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit;
        self
    }

    /// Set the fiat currency used for rate quotes.
    pub fn with_fiat_currency(mut self, currency: impl Into<String>) -> Self {
        self.fiat_currency = currency.into();
        self
    }
}

/// Invoice-based and card-based totals for one project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDonations {
    /// Project slug.
    pub project: String,

    /// Invoice-provider donations, per asset.
    pub by_asset: AssetTotals,

    /// Card-provider donations.
    pub card: DonationTotals,
}

/// Aggregate a project's invoice-provider donations per asset.
///
/// 1. Fetch every invoice of the store (one call).
/// 2. Keep invoices whose order id is `project_slug` or `project_slug_STATIC`.
/// 3. Fetch each kept invoice's payment methods, at most
///    `max_concurrent_fetches` at a time.
/// 4. Classify the paid entries and fold them into per-asset totals.
///
/// The result always has `XMR` and `BTC` buckets; other assets appear once
/// something was paid in them.
///
/// # Errors
///
/// The first failing fetch aborts the aggregation: outstanding fetches are
/// dropped and no partial totals are returned. Entries that can't be valued
/// (negative rate, amounts past the decimal range) fail it the same way
/// with [`IngestionError::MalformedResponse`].
pub async fn aggregate_invoice_based<I: InvoiceSource>(
    source: &I,
    store_id: &str,
    project_slug: &str,
    max_concurrent_fetches: usize,
) -> Result<AssetTotals, AggregatorError> {
    validate_project_slug(project_slug)?;
    if max_concurrent_fetches == 0 {
        return Err(AggregatorError::InvalidInput(
            "max_concurrent_fetches must be at least 1".to_string(),
        ));
    }

    let invoices = source.fetch_invoices(store_id).await?;

    let invoice_ids: Vec<String> = filter_invoices_by_project(&invoices, project_slug)
        .into_iter()
        .map(|invoice| invoice.id.clone())
        .collect();

    tracing::debug!(
        "{} of {} invoices in store {} belong to project {}",
        invoice_ids.len(),
        invoices.len(),
        store_id,
        project_slug
    );

    let matched = invoice_ids.len();

    // Each invoice yields its own partial totals; merging is order-independent,
    // so completion order doesn't matter.
    let totals = stream::iter(invoice_ids)
        .map(move |invoice_id| async move {
            let methods = source.fetch_payment_methods(store_id, &invoice_id).await?;
            let mut partial = AssetTotals::new();
            for payment in classify(&methods)? {
                accumulate(&mut partial, &payment)?;
            }
            Ok::<_, IngestionError>(partial)
        })
        .buffer_unordered(max_concurrent_fetches)
        .try_fold(AssetTotals::with_default_assets(), |mut acc, partial| async move {
            acc.merge(partial)
                .map_err(|e| IngestionError::malformed(Provider::BtcPay, e))?;
            Ok::<_, IngestionError>(acc)
        })
        .await?;

    let total_fiat = totals
        .total_fiat()
        .map_err(|e| IngestionError::malformed(Provider::BtcPay, e))?;

    tracing::info!(
        "Aggregated {} invoices for project {}: {} donations, fiat total {}",
        matched,
        project_slug,
        totals.total_donations(),
        total_fiat
    );

    Ok(totals)
}

/// Aggregate a project's card donations into a single fiat bucket.
///
/// Charges match on exact `metadata.project_slug` equality (no `_STATIC`
/// variant). Amounts are converted from minor units.
pub async fn aggregate_charge_based<C: ChargeSource>(
    source: &C,
    project_slug: &str,
) -> Result<DonationTotals, AggregatorError> {
    validate_project_slug(project_slug)?;

    let charges = source.fetch_charges().await?;

    let mut totals = DonationTotals::new();
    for charge in filter_charges_by_project(&charges, project_slug) {
        accumulate_charge(&mut totals, charge)?;
    }

    tracing::info!(
        "Aggregated {} of {} charges for project {}: total {}",
        totals.num_donations,
        charges.len(),
        project_slug,
        totals.total_donations_fiat
    );

    Ok(totals)
}

fn validate_project_slug(project_slug: &str) -> Result<(), AggregatorError> {
    if project_slug.trim().is_empty() {
        return Err(AggregatorError::InvalidInput(
            "project slug must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_goal(goal: Decimal) -> Result<(), AggregatorError> {
    if goal < Decimal::ZERO {
        return Err(AggregatorError::InvalidInput(format!(
            "funding goal must not be negative, got {}",
            goal
        )));
    }
    Ok(())
}

/// Donation aggregator for one fund.
///
/// Holds the fund's provider sources and configuration. Each call owns its
/// own accumulators, so one aggregator can serve concurrent requests for
/// different projects.
///
/// # Example
///
/// ```rust
/// use fund_aggregator::{Aggregator, AggregatorConfig};
/// use fund_ingestion::{MockChargeSource, MockInvoiceSource};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let aggregator = Aggregator::new(
///         MockInvoiceSource::new(),
///         MockChargeSource::new(),
///         AggregatorConfig::new("store-id"),
///     );
///
///     let donations = aggregator.aggregate_project("proj1").await?;
///     assert_eq!(donations.by_asset.total_donations(), 0);
///     Ok(())
/// }
/// ```
pub struct Aggregator<I, C> {
    invoices: I,
    charges: C,
    config: AggregatorConfig,
}

impl<I: InvoiceSource, C: ChargeSource> Aggregator<I, C> {
    /// Create an aggregator from its sources and configuration.
    pub fn new(invoices: I, charges: C, config: AggregatorConfig) -> Self {
        Self {
            invoices,
            charges,
            config,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Per-asset invoice-provider totals for a project.
    pub async fn aggregate_invoice_based(
        &self,
        project_slug: &str,
    ) -> Result<AssetTotals, AggregatorError> {
        aggregate_invoice_based(
            &self.invoices,
            &self.config.store_id,
            project_slug,
            self.config.max_concurrent_fetches,
        )
        .await
    }

    /// Card-provider totals for a project.
    pub async fn aggregate_charge_based(
        &self,
        project_slug: &str,
    ) -> Result<DonationTotals, AggregatorError> {
        aggregate_charge_based(&self.charges, project_slug).await
    }

    /// Both providers' totals for a project, fetched concurrently.
    ///
    /// Fails if either provider fails.
    pub async fn aggregate_project(
        &self,
        project_slug: &str,
    ) -> Result<ProjectDonations, AggregatorError> {
        let (by_asset, card) = futures::try_join!(
            self.aggregate_invoice_based(project_slug),
            self.aggregate_charge_based(project_slug)
        )?;

        Ok(ProjectDonations {
            project: project_slug.to_string(),
            by_asset,
            card,
        })
    }

    /// Combined funding progress of a project against a fiat goal.
    pub async fn funding_summary(
        &self,
        project_slug: &str,
        goal: Decimal,
    ) -> Result<FundingSummary, AggregatorError> {
        validate_goal(goal)?;

        let donations = self.aggregate_project(project_slug).await?;
        let summary =
            FundingSummary::new(donations.project, goal, donations.by_asset, donations.card)?;

        tracing::info!(
            "Project {} raised {} of {} ({} contributions)",
            project_slug,
            summary.total_fiat,
            goal,
            summary.contributions
        );

        Ok(summary)
    }

    /// Native amount of each default asset needed to reach a fiat goal at
    /// the provider's current rates.
    ///
    /// Assets the provider can't quote (or quotes at zero) get a zero target.
    pub async fn target_amounts(
        &self,
        goal: Decimal,
    ) -> Result<BTreeMap<Asset, Decimal>, AggregatorError> {
        validate_goal(goal)?;

        let pairs: Vec<String> = Asset::DEFAULT_ASSETS
            .iter()
            .map(|asset| asset.currency_pair(&self.config.fiat_currency))
            .collect();

        let rates = self
            .invoices
            .fetch_rates(&self.config.store_id, &pairs)
            .await?;

        let mut targets: BTreeMap<Asset, Decimal> = Asset::DEFAULT_ASSETS
            .into_iter()
            .map(|asset| (asset, Decimal::ZERO))
            .collect();

        for rate in rates {
            if let Some(target) = targets.get_mut(&rate.asset()) {
                *target = native_target(goal, rate.rate)?;
            }
        }

        Ok(targets)
    }
}
