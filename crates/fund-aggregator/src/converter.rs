//! Fiat conversion and accumulation.
//!
//! Converts classified provider payments into fiat amounts and folds them
//! into the domain accumulators from `fund-types`.

use crate::classifier::ClassifiedPayment;
use fund_ingestion::{Charge, IngestionError, Provider};
use fund_types::{AssetTotals, DonationTotals};
use rust_decimal::Decimal;

/// Fiat equivalent of a native amount at the recorded rate.
///
/// Decimal arithmetic is exact, so no rounding is applied. `None` when the
/// product doesn't fit a decimal.
pub fn fiat_value(native_amount: Decimal, rate: Decimal) -> Option<Decimal> {
    native_amount.checked_mul(rate)
}

/// Convert a minor-unit card amount (cents) to major units.
pub fn minor_to_major(amount: u64) -> Decimal {
    Decimal::from(amount) / Decimal::ONE_HUNDRED
}

/// Native amount of an asset needed to reach a fiat `goal` at `rate`.
///
/// Zero when the rate is missing or not positive, so callers can report
/// "no target" without special-casing.
///
/// # Errors
///
/// A positive rate so small that the quotient overflows is a
/// [`IngestionError::MalformedResponse`].
pub fn native_target(goal: Decimal, rate: Option<Decimal>) -> Result<Decimal, IngestionError> {
    match rate {
        Some(rate) if rate > Decimal::ZERO => goal.checked_div(rate).ok_or_else(|| {
            IngestionError::malformed(
                Provider::BtcPay,
                format!("rate {} is too small to value a goal of {}", rate, goal),
            )
        }),
        _ => Ok(Decimal::ZERO),
    }
}

/// Fold one classified payment into its asset's bucket.
///
/// # Errors
///
/// An overflowing fiat value or running total is a
/// [`IngestionError::MalformedResponse`] from the invoice provider.
pub fn accumulate(totals: &mut AssetTotals, payment: &ClassifiedPayment) -> Result<(), IngestionError> {
    let fiat = fiat_value(payment.native_amount, payment.rate).ok_or_else(|| {
        IngestionError::malformed(
            Provider::BtcPay,
            format!(
                "{} {} at rate {} overflows",
                payment.native_amount, payment.asset, payment.rate
            ),
        )
    })?;
    totals
        .record(payment.asset.clone(), payment.native_amount, fiat)
        .map_err(|e| IngestionError::malformed(Provider::BtcPay, e))
}

/// Fold one card charge into the card bucket.
///
/// Card charges are already fiat, so native and fiat totals move together.
pub fn accumulate_charge(totals: &mut DonationTotals, charge: &Charge) -> Result<(), IngestionError> {
    let amount = minor_to_major(charge.amount);
    totals
        .record(amount, amount)
        .map_err(|e| IngestionError::malformed(Provider::Stripe, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fund_ingestion::mock::charge;
    use fund_types::Asset;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fiat_value() {
        assert_eq!(fiat_value(dec!(2.5), dec!(150)), Some(dec!(375)));
        assert_eq!(fiat_value(dec!(0.01), dec!(60000)), Some(dec!(600)));
        assert_eq!(fiat_value(dec!(2), Decimal::MAX), None);
    }

    #[test]
    fn test_accumulate_single_entry() {
        let mut totals = AssetTotals::new();
        let payment = ClassifiedPayment {
            asset: Asset::Xmr,
            native_amount: dec!(2.5),
            rate: dec!(150),
        };

        accumulate(&mut totals, &payment).unwrap();

        let xmr = totals.get(&Asset::Xmr).unwrap();
        assert_eq!(xmr.num_donations, 1);
        assert_eq!(xmr.total_donations_native, dec!(2.5));
        assert_eq!(xmr.total_donations_fiat, dec!(375));
    }

    #[test]
    fn test_accumulate_charge() {
        let mut totals = DonationTotals::new();

        accumulate_charge(&mut totals, &charge("ch_1", 2500, Some("proj1"))).unwrap();

        assert_eq!(totals.num_donations, 1);
        assert_eq!(totals.total_donations_native, dec!(25.00));
        assert_eq!(totals.total_donations_fiat, dec!(25.00));
    }

    #[test]
    fn test_native_target() {
        assert_eq!(native_target(dec!(1600), Some(dec!(160))).unwrap(), dec!(10));
        assert_eq!(native_target(dec!(1600), Some(Decimal::ZERO)).unwrap(), Decimal::ZERO);
        assert_eq!(native_target(dec!(1600), None).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_native_target_overflow() {
        let result = native_target(dec!(1600), Some(dec!(0.0000000000000000000000000001)));
        assert!(matches!(result, Err(IngestionError::MalformedResponse { .. })));
    }

    #[test]
    fn test_accumulate_overflow_is_malformed() {
        let mut totals = AssetTotals::new();
        let payment = ClassifiedPayment {
            asset: Asset::Xmr,
            native_amount: dec!(2),
            rate: Decimal::MAX,
        };

        let result = accumulate(&mut totals, &payment);

        assert!(matches!(
            result,
            Err(IngestionError::MalformedResponse { provider: Provider::BtcPay, .. })
        ));
        assert!(totals.get(&Asset::Xmr).is_none());
    }

    #[test]
    fn test_minor_to_major() {
        assert_eq!(minor_to_major(0), Decimal::ZERO);
        assert_eq!(minor_to_major(1), dec!(0.01));
        assert_eq!(minor_to_major(123456), dec!(1234.56));
    }
}
