//! Payment-method classification.
//!
//! An invoice offers several settlement options; usually only one of them
//! was actually used. Each entry is identified by its `cryptoCode`, never by
//! its position in the provider's list, and only entries with a strictly
//! positive paid amount count as donations.

use fund_ingestion::{IngestionError, PaymentMethod, Provider};
use fund_types::Asset;
use rust_decimal::Decimal;

/// A payment-method entry that received funds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedPayment {
    /// Asset the entry settled in.
    pub asset: Asset,

    /// Amount paid, in native units. Always positive.
    pub native_amount: Decimal,

    /// Fiat per native unit at settlement.
    pub rate: Decimal,
}

/// Keep the paid entries of an invoice's payment-method breakdown.
///
/// Any number of entries is accepted, in any order. Several paid entries
/// (even for the same asset) each yield their own payment.
///
/// # Errors
///
/// A paid entry with a negative rate is a [`IngestionError::MalformedResponse`]:
/// it can't be valued, and dropping it would under-report the invoice.
pub fn classify(methods: &[PaymentMethod]) -> Result<Vec<ClassifiedPayment>, IngestionError> {
    methods
        .iter()
        .filter(|method| method.paid() > Decimal::ZERO)
        .map(|method| {
            if method.rate < Decimal::ZERO {
                return Err(IngestionError::malformed(
                    Provider::BtcPay,
                    format!("{} payment has negative rate {}", method.crypto_code, method.rate),
                ));
            }
            Ok(ClassifiedPayment {
                asset: method.asset(),
                native_amount: method.paid(),
                rate: method.rate,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fund_ingestion::mock::payment_method;
    use rust_decimal_macros::dec;

    #[test]
    fn test_unpaid_entries_dropped() {
        let methods = vec![
            payment_method("BTC", dec!(0), dec!(60000)),
            payment_method("XMR", dec!(1.5), dec!(160)),
        ];

        let paid = classify(&methods).unwrap();

        assert_eq!(paid.len(), 1);
        assert_eq!(paid[0].asset, Asset::Xmr);
        assert_eq!(paid[0].native_amount, dec!(1.5));
        assert_eq!(paid[0].rate, dec!(160));
    }

    #[test]
    fn test_missing_and_negative_paid_dropped() {
        let mut missing = payment_method("XMR", dec!(0), dec!(160));
        missing.payment_method_paid = None;
        let negative = payment_method("BTC", dec!(-0.5), dec!(60000));

        assert!(classify(&[missing, negative]).unwrap().is_empty());
    }

    #[test]
    fn test_matching_by_symbol_not_position() {
        // XMR first, BTC second: the reverse of the usual provider order.
        let methods = vec![
            payment_method("XMR", dec!(2), dec!(150)),
            payment_method("BTC", dec!(0.01), dec!(60000)),
        ];

        let paid = classify(&methods).unwrap();

        assert_eq!(paid.len(), 2);
        assert_eq!(paid[0].asset, Asset::Xmr);
        assert_eq!(paid[1].asset, Asset::Btc);
    }

    #[test]
    fn test_more_than_two_methods() {
        let methods = vec![
            payment_method("BTC", dec!(0), dec!(60000)),
            payment_method("LTC", dec!(3), dec!(70)),
            payment_method("XMR", dec!(0), dec!(160)),
            payment_method("BTC", dec!(0.001), dec!(60000)),
        ];

        let paid = classify(&methods).unwrap();

        assert_eq!(paid.len(), 2);
        assert_eq!(paid[0].asset, Asset::Other("LTC".to_string()));
        assert_eq!(paid[1].asset, Asset::Btc);
    }

    #[test]
    fn test_paid_entry_with_negative_rate_is_malformed() {
        let methods = vec![
            payment_method("BTC", dec!(0.01), dec!(60000)),
            payment_method("XMR", dec!(1), dec!(-160)),
        ];

        let result = classify(&methods);

        assert!(matches!(
            result,
            Err(IngestionError::MalformedResponse { provider: Provider::BtcPay, .. })
        ));
    }

    #[test]
    fn test_unpaid_entry_rate_not_checked() {
        let methods = vec![payment_method("XMR", dec!(0), dec!(-160))];
        assert!(classify(&methods).unwrap().is_empty());
    }
}
