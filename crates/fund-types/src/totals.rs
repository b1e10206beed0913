//! Donation accumulators.
//!
//! [`DonationTotals`] is the running total for a single bucket: an asset on
//! the invoice path, or the single fiat bucket on the card path.
//! [`AssetTotals`] keys those buckets by [`Asset`].
//!
//! Both only grow: `record` and `merge` add, nothing subtracts. Since
//! addition is commutative and associative, folding the same donations in
//! any order (or merging partial totals in any order) gives the same result.
//!
//! All sums are checked. A sum past the decimal range is a
//! [`TypeError::Overflow`] and leaves the bucket untouched.

use crate::{Asset, TypeError};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running donation totals for one bucket.
///
/// A bucket with `num_donations == 0` always has zero totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationTotals {
    /// Number of donations folded in.
    pub num_donations: u64,

    /// Sum of donated amounts in native units (asset units, or fiat for cards).
    pub total_donations_native: Decimal,

    /// Sum of fiat equivalents at each donation's recorded rate.
    pub total_donations_fiat: Decimal,
}

impl DonationTotals {
    /// Create an empty bucket.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one donation into the bucket.
    pub fn record(&mut self, native: Decimal, fiat: Decimal) -> Result<(), TypeError> {
        self.add(1, native, fiat)
    }

    /// Add another bucket's totals into this one.
    pub fn merge(&mut self, other: &DonationTotals) -> Result<(), TypeError> {
        self.add(
            other.num_donations,
            other.total_donations_native,
            other.total_donations_fiat,
        )
    }

    fn add(&mut self, count: u64, native: Decimal, fiat: Decimal) -> Result<(), TypeError> {
        let num_donations = self
            .num_donations
            .checked_add(count)
            .ok_or_else(|| TypeError::Overflow("donation count".to_string()))?;
        let native_total = checked_sum(self.total_donations_native, native, "native total")?;
        let fiat_total = checked_sum(self.total_donations_fiat, fiat, "fiat total")?;

        self.num_donations = num_donations;
        self.total_donations_native = native_total;
        self.total_donations_fiat = fiat_total;
        Ok(())
    }

    /// Check if no donation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.num_donations == 0
    }
}

/// Per-asset donation totals for one project.
///
/// Serializes as a JSON object keyed by asset symbol:
///
/// ```json
/// { "BTC": { "numDonations": 1, ... }, "XMR": { ... } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetTotals {
    by_asset: BTreeMap<Asset, DonationTotals>,
}

impl AssetTotals {
    /// Create an empty result with no buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a result with a zeroed bucket for each given asset.
    pub fn with_assets(assets: impl IntoIterator<Item = Asset>) -> Self {
        Self {
            by_asset: assets
                .into_iter()
                .map(|asset| (asset, DonationTotals::new()))
                .collect(),
        }
    }

    /// Create a result pre-seeded with [`Asset::DEFAULT_ASSETS`].
    pub fn with_default_assets() -> Self {
        Self::with_assets(Asset::DEFAULT_ASSETS)
    }

    /// Fold one donation into the bucket for `asset`, creating it if needed.
    pub fn record(&mut self, asset: Asset, native: Decimal, fiat: Decimal) -> Result<(), TypeError> {
        self.by_asset.entry(asset).or_default().record(native, fiat)
    }

    /// Merge another partial result into this one, bucket by bucket.
    ///
    /// Stops at the first overflowing bucket; earlier buckets stay merged.
    pub fn merge(&mut self, other: AssetTotals) -> Result<(), TypeError> {
        for (asset, totals) in other.by_asset {
            self.by_asset.entry(asset).or_default().merge(&totals)?;
        }
        Ok(())
    }

    /// Get the bucket for an asset.
    pub fn get(&self, asset: &Asset) -> Option<&DonationTotals> {
        self.by_asset.get(asset)
    }

    /// Iterate over buckets in asset order.
    pub fn iter(&self) -> impl Iterator<Item = (&Asset, &DonationTotals)> {
        self.by_asset.iter()
    }

    /// Number of buckets (including zeroed ones).
    pub fn len(&self) -> usize {
        self.by_asset.len()
    }

    /// Check if there are no buckets at all.
    pub fn is_empty(&self) -> bool {
        self.by_asset.is_empty()
    }

    /// Donation count across all assets.
    pub fn total_donations(&self) -> u64 {
        self.by_asset.values().map(|t| t.num_donations).sum()
    }

    /// Fiat equivalent across all assets.
    pub fn total_fiat(&self) -> Result<Decimal, TypeError> {
        self.by_asset
            .values()
            .try_fold(Decimal::ZERO, |acc, t| {
                checked_sum(acc, t.total_donations_fiat, "fiat total")
            })
    }
}

/// `a + b`, or [`TypeError::Overflow`] naming the quantity.
pub(crate) fn checked_sum(a: Decimal, b: Decimal, what: &str) -> Result<Decimal, TypeError> {
    a.checked_add(b)
        .ok_or_else(|| TypeError::Overflow(format!("{} exceeds {}", what, Decimal::MAX)))
}

impl<'a> IntoIterator for &'a AssetTotals {
    type Item = (&'a Asset, &'a DonationTotals);
    type IntoIter = std::collections::btree_map::Iter<'a, Asset, DonationTotals>;

    fn into_iter(self) -> Self::IntoIter {
        self.by_asset.iter()
    }
}
