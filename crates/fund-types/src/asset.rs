//! Settlement assets accepted by the invoice provider.
//!
//! Invoice payment methods are identified by a `cryptoCode` string (e.g.
//! "XMR", "BTC"). Assets the project actively reports on have dedicated
//! variants; anything else the provider is configured to accept is kept
//! verbatim in [`Asset::Other`].
//!
//! # Example
//!
//! ```rust
//! use fund_types::Asset;
//!
//! let xmr = Asset::from_symbol("XMR");
//! assert_eq!(xmr, Asset::Xmr);
//! assert_eq!(xmr.symbol(), "XMR");
//!
//! let unknown = Asset::from_symbol("LTC");
//! assert_eq!(unknown, Asset::Other("LTC".to_string()));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Asset a donation was settled in.
///
/// Ordering is `Btc < Xmr < Other(..)`, which keeps per-asset maps in a
/// stable order when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Asset {
    /// Bitcoin (on-chain or Lightning, both report `BTC`).
    Btc,

    /// Monero.
    Xmr,

    /// Any other code the provider reports.
    /// Contains the raw `cryptoCode` string.
    Other(String),
}

impl Asset {
    /// Assets every invoice-based result reports, even when nothing was paid.
    pub const DEFAULT_ASSETS: [Asset; 2] = [Asset::Xmr, Asset::Btc];

    /// Create an Asset from a provider `cryptoCode`.
    ///
    /// Matching is exact: `"xmr"` is not `"XMR"` and ends up in
    /// [`Asset::Other`].
    pub fn from_symbol(symbol: &str) -> Self {
        match symbol {
            "BTC" => Asset::Btc,
            "XMR" => Asset::Xmr,
            _ => Asset::Other(symbol.to_string()),
        }
    }

    /// Get the symbol string for this asset.
    pub fn symbol(&self) -> &str {
        match self {
            Asset::Btc => "BTC",
            Asset::Xmr => "XMR",
            Asset::Other(s) => s,
        }
    }

    /// Check if this is a known asset (not `Other`).
    pub fn is_known(&self) -> bool {
        !matches!(self, Asset::Other(_))
    }

    /// Currency pair used to quote this asset against a fiat currency,
    /// in the provider's `BASE_QUOTE` form (e.g. `XMR_USD`).
    pub fn currency_pair(&self, fiat: &str) -> String {
        format!("{}_{}", self.symbol(), fiat)
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl From<&str> for Asset {
    fn from(s: &str) -> Self {
        Asset::from_symbol(s)
    }
}

impl From<String> for Asset {
    fn from(s: String) -> Self {
        Asset::from_symbol(&s)
    }
}

impl From<Asset> for String {
    fn from(asset: Asset) -> Self {
        asset.symbol().to_string()
    }
}
