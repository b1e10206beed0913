//! Raw records as returned by the provider APIs.
//!
//! Field names follow the providers' JSON (`cryptoCode`, `paymentMethodPaid`,
//! `metadata.orderId`, `metadata.project_slug`). Amounts and rates accept
//! either JSON strings or JSON numbers.

use fund_types::Asset;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

/// An invoice from the invoice provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Invoice {
    /// Provider-assigned invoice id.
    pub id: String,

    /// Free-form invoice metadata.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: InvoiceMetadata,
}

impl Invoice {
    /// Order identifier the invoice was created with, if it has one.
    pub fn order_id(&self) -> Option<&str> {
        self.metadata.order_id.as_deref()
    }
}

/// The part of an invoice's metadata we read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InvoiceMetadata {
    /// Order id; carries the project slug (optionally `_STATIC`-suffixed).
    /// Non-string values are treated as absent.
    #[serde(rename = "orderId", default, deserialize_with = "lenient_string")]
    pub order_id: Option<String>,
}

/// One settlement option on an invoice.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    /// Asset symbol, e.g. `XMR` or `BTC`.
    pub crypto_code: String,

    /// Provider's method id, e.g. `BTC-OnChain`. Informational only.
    #[serde(default, deserialize_with = "lenient_string")]
    pub payment_method: Option<String>,

    /// Amount already paid through this method, in native units.
    /// Missing means nothing was paid.
    #[serde(default)]
    pub payment_method_paid: Option<Decimal>,

    /// Fiat per native unit at settlement.
    pub rate: Decimal,
}

impl PaymentMethod {
    /// Asset this method settles in.
    pub fn asset(&self) -> Asset {
        Asset::from_symbol(&self.crypto_code)
    }

    /// Paid amount, with a missing value read as zero.
    pub fn paid(&self) -> Decimal {
        self.payment_method_paid.unwrap_or(Decimal::ZERO)
    }
}

/// A card charge from the card provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Charge {
    /// Provider-assigned charge id.
    #[serde(default)]
    pub id: String,

    /// Amount in minor units (cents).
    pub amount: u64,

    /// Three-letter currency code, lowercase as the provider sends it.
    #[serde(default)]
    pub currency: Option<String>,

    /// Free-form charge metadata.
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: ChargeMetadata,
}

impl Charge {
    /// Project slug the charge was tagged with, if any.
    pub fn project_slug(&self) -> Option<&str> {
        self.metadata.project_slug.as_deref()
    }
}

/// The part of a charge's metadata we read.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChargeMetadata {
    /// Project the donation was made to.
    #[serde(default, deserialize_with = "lenient_string")]
    pub project_slug: Option<String>,
}

/// List envelope returned by the card provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ChargeList {
    /// Charges on this page.
    pub data: Vec<Charge>,

    /// Whether the provider holds more charges than it returned.
    #[serde(default)]
    pub has_more: bool,
}

/// A quoted exchange rate from the invoice provider's rate endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    /// Pair in `BASE_QUOTE` form, e.g. `XMR_USD`.
    pub currency_pair: String,

    /// Quote units per base unit. Absent when the provider could not quote.
    #[serde(default)]
    pub rate: Option<Decimal>,
}

impl Rate {
    /// Base asset of the pair (`XMR` for `XMR_USD`).
    pub fn asset(&self) -> Asset {
        let base = self
            .currency_pair
            .split_once('_')
            .map_or(self.currency_pair.as_str(), |(base, _)| base);
        Asset::from_symbol(base)
    }
}

/// Deserialize `null` the same way as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize a string field, treating any non-string value as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_invoice_with_order_id() {
        let invoice: Invoice =
            serde_json::from_str(r#"{"id":"inv1","metadata":{"orderId":"proj1_STATIC"}}"#).unwrap();
        assert_eq!(invoice.id, "inv1");
        assert_eq!(invoice.order_id(), Some("proj1_STATIC"));
    }

    #[test]
    fn test_invoice_without_order_id() {
        let missing: Invoice = serde_json::from_str(r#"{"id":"a","metadata":{}}"#).unwrap();
        let null_meta: Invoice = serde_json::from_str(r#"{"id":"b","metadata":null}"#).unwrap();
        let no_meta: Invoice = serde_json::from_str(r#"{"id":"c"}"#).unwrap();
        let numeric: Invoice =
            serde_json::from_str(r#"{"id":"d","metadata":{"orderId":42}}"#).unwrap();

        assert_eq!(missing.order_id(), None);
        assert_eq!(null_meta.order_id(), None);
        assert_eq!(no_meta.order_id(), None);
        assert_eq!(numeric.order_id(), None);
    }

    #[test]
    fn test_payment_method_string_amounts() {
        let method: PaymentMethod = serde_json::from_str(
            r#"{"cryptoCode":"BTC","paymentMethod":"BTC-OnChain","paymentMethodPaid":"0.01","rate":"60000"}"#,
        )
        .unwrap();

        assert_eq!(method.asset(), Asset::Btc);
        assert_eq!(method.paid(), dec!(0.01));
        assert_eq!(method.rate, dec!(60000));
        assert_eq!(method.payment_method.as_deref(), Some("BTC-OnChain"));
    }

    #[test]
    fn test_payment_method_numeric_amounts() {
        let method: PaymentMethod =
            serde_json::from_str(r#"{"cryptoCode":"XMR","paymentMethodPaid":1,"rate":160}"#).unwrap();
        assert_eq!(method.paid(), dec!(1));
        assert_eq!(method.rate, dec!(160));
    }

    #[test]
    fn test_payment_method_missing_paid() {
        let method: PaymentMethod =
            serde_json::from_str(r#"{"cryptoCode":"XMR","rate":"160"}"#).unwrap();
        assert_eq!(method.paid(), Decimal::ZERO);
    }

    #[test]
    fn test_payment_method_missing_rate_is_error() {
        let result = serde_json::from_str::<PaymentMethod>(r#"{"cryptoCode":"XMR"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_charge_list() {
        let list: ChargeList = serde_json::from_str(
            r#"{"object":"list","data":[
                {"id":"ch_1","amount":2500,"currency":"usd","metadata":{"project_slug":"proj1"}},
                {"id":"ch_2","amount":1000,"currency":"usd","metadata":{}}
            ],"has_more":true}"#,
        )
        .unwrap();

        assert_eq!(list.data.len(), 2);
        assert!(list.has_more);
        assert_eq!(list.data[0].project_slug(), Some("proj1"));
        assert_eq!(list.data[0].amount, 2500);
        assert_eq!(list.data[1].project_slug(), None);
    }

    #[test]
    fn test_rate_asset() {
        let rate: Rate =
            serde_json::from_str(r#"{"currencyPair":"XMR_USD","errors":[],"rate":"160.5"}"#).unwrap();
        assert_eq!(rate.asset(), Asset::Xmr);
        assert_eq!(rate.rate, Some(dec!(160.5)));
    }
}
