//! fund-aggregator: Per-project donation reconciliation across payment providers.
//!
//! This crate provides the [`Aggregator`] struct which is the main entry point
//! for turning raw provider records into per-project donation totals.
//!
//! # Overview
//!
//! For one project the aggregator:
//! - Fetches invoices and charges via `fund-ingestion`
//! - Keeps the records that belong to the project ([`filter`])
//! - Picks out the payment-method entries that were actually paid, by asset
//!   symbol ([`classifier`])
//! - Converts native amounts to fiat at the recorded rate and accumulates
//!   per-asset totals ([`converter`])
//!
//! # Example
//!
//! ```rust,no_run
//! use fund_aggregator::{Aggregator, AggregatorConfig};
//! use fund_ingestion::{BtcPayClient, BtcPayConfig, StripeClient, StripeConfig};
//! use rust_decimal::Decimal;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let invoices = BtcPayClient::new(&BtcPayConfig::new(
//!         "https://pay.example.org/api/v1",
//!         "api-key",
//!     ))?;
//!     let charges = StripeClient::new(&StripeConfig::new("sk_live_..."))?;
//!
//!     let aggregator = Aggregator::new(invoices, charges, AggregatorConfig::new("store-id"));
//!
//!     let totals = aggregator.aggregate_invoice_based("my-project").await?;
//!     for (asset, bucket) in &totals {
//!         println!("{}: {} donations", asset, bucket.num_donations);
//!     }
//!
//!     let summary = aggregator
//!         .funding_summary("my-project", Decimal::from(10_000))
//!         .await?;
//!     println!("Raised {} of {}", summary.total_fiat, summary.goal);
//!     Ok(())
//! }
//! ```
//!
//! # Concurrency
//!
//! Payment methods are fetched once per matching invoice. Those fetches run
//! concurrently up to [`AggregatorConfig::max_concurrent_fetches`]; set it to
//! 1 for strictly sequential fetching. Totals don't depend on the setting.

mod aggregator;
pub mod classifier;
pub mod converter;
mod error;
pub mod filter;

pub use aggregator::{
    aggregate_charge_based, aggregate_invoice_based, Aggregator, AggregatorConfig,
    ProjectDonations, DEFAULT_FIAT_CURRENCY, DEFAULT_MAX_CONCURRENT_FETCHES,
};
pub use classifier::{classify, ClassifiedPayment};
pub use error::AggregatorError;
pub use filter::{filter_charges_by_project, filter_invoices_by_project, STATIC_SUFFIX};

// Re-export commonly used types from dependencies for convenience
pub use fund_types::{Asset, AssetTotals, DonationTotals, FundingSummary};
