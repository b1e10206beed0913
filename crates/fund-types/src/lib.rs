//! fund-types: Shared data structures for the project funding aggregator
//!
//! This crate defines all shared types used across the workspace including:
//! - [`Asset`] - Settlement asset of a donation, with `Other` variant for extensibility
//! - [`DonationTotals`] - Running count, native sum and fiat sum for one bucket
//! - [`AssetTotals`] - Per-asset donation totals for a single project
//! - [`FundingSummary`] - Combined crypto and card totals measured against a goal
//!
//! # Example
//!
//! ```rust
//! use fund_types::{Asset, AssetTotals};
//! use rust_decimal_macros::dec;
//!
//! let mut totals = AssetTotals::with_default_assets();
//! totals.record(Asset::Xmr, dec!(2.5), dec!(375)).unwrap();
//!
//! let xmr = totals.get(&Asset::Xmr).unwrap();
//! assert_eq!(xmr.num_donations, 1);
//! assert_eq!(xmr.total_donations_fiat, dec!(375));
//! ```

mod asset;
mod error;
mod summary;
mod totals;

pub use asset::Asset;
pub use error::TypeError;
pub use summary::FundingSummary;
pub use totals::{AssetTotals, DonationTotals};
