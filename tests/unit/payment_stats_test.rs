// Property-based tests for per-invoice payment stats
//
// Amounts are generated as whole cents so every value is exact in Decimal.

use paytrack::core::RawAmount;
use paytrack::payments::models::PaymentStatus;
use paytrack::payments::services::{PaymentStatsCalculator, StatusLabeler};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn cents(value: u64) -> Decimal {
    Decimal::new(value as i64, 2)
}

fn amounts(values: &[Decimal]) -> Vec<RawAmount> {
    values.iter().copied().map(RawAmount::from).collect()
}

fn stats_for(total: Decimal, values: &[Decimal]) -> paytrack::payments::PaymentStats {
    let raw = amounts(values);
    PaymentStatsCalculator::default().calculate_amounts(total, raw.iter())
}

proptest! {
    #[test]
    fn test_remaining_is_clamped(
        total in 0u64..100_000_000u64,
        payments in prop::collection::vec(0u64..50_000_000u64, 0..8)
    ) {
        let total = cents(total);
        let values: Vec<Decimal> = payments.into_iter().map(cents).collect();
        let paid: Decimal = values.iter().copied().sum();

        let stats = stats_for(total, &values);

        prop_assert_eq!(stats.paid_amount, paid);
        prop_assert_eq!(stats.remaining_amount, (total - paid).max(Decimal::ZERO));
        prop_assert!(stats.remaining_amount >= Decimal::ZERO);
        prop_assert_eq!(stats.is_paid, stats.remaining_amount == Decimal::ZERO);
    }

    #[test]
    fn test_percent_is_zero_for_non_positive_total(
        total in -10_000_000i64..=0i64,
        payments in prop::collection::vec(0u64..10_000_000u64, 0..5)
    ) {
        let values: Vec<Decimal> = payments.into_iter().map(cents).collect();
        let stats = stats_for(Decimal::new(total, 2), &values);

        prop_assert_eq!(stats.percent_paid, Decimal::ZERO);
        prop_assert!(!stats.upfront_met);
    }

    #[test]
    fn test_calculation_is_idempotent(
        total in 0u64..100_000_000u64,
        payments in prop::collection::vec(0u64..50_000_000u64, 0..8)
    ) {
        let values: Vec<Decimal> = payments.into_iter().map(cents).collect();
        let first = stats_for(cents(total), &values);
        let second = stats_for(cents(total), &values);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_payment_order_does_not_matter(
        total in 0u64..100_000_000u64,
        payments in prop::collection::vec(0u64..50_000_000u64, 0..8),
        rotation in 0usize..8
    ) {
        let mut values: Vec<Decimal> = payments.into_iter().map(cents).collect();
        let original = stats_for(cents(total), &values);

        values.reverse();
        prop_assert_eq!(original, stats_for(cents(total), &values));

        if !values.is_empty() {
            let len = values.len();
            values.rotate_left(rotation % len);
        }
        prop_assert_eq!(original, stats_for(cents(total), &values));
    }

    #[test]
    fn test_partial_flag_matches_definition(
        total in 0u64..100_000_000u64,
        payments in prop::collection::vec(0u64..50_000_000u64, 0..8)
    ) {
        let values: Vec<Decimal> = payments.into_iter().map(cents).collect();
        let stats = stats_for(cents(total), &values);

        prop_assert_eq!(
            stats.is_partially_paid,
            stats.paid_amount > Decimal::ZERO && stats.remaining_amount > Decimal::ZERO
        );
    }
}

#[test]
fn test_fully_paid_is_never_partially_paid() {
    let stats = stats_for(dec!(1000), &[dec!(400), dec!(600)]);

    assert!(stats.upfront_met);
    assert!(stats.is_paid);
    assert_eq!(StatusLabeler::status(Some(&stats)), PaymentStatus::Paid);
    assert_eq!(StatusLabeler::label(Some(&stats)), "Paid");
}

#[test]
fn test_scenario_upfront_paid() {
    let stats = stats_for(dec!(5000), &[dec!(2000)]);

    assert_eq!(stats.paid_amount, dec!(2000));
    assert_eq!(stats.percent_paid, dec!(40));
    assert_eq!(stats.remaining_amount, dec!(3000));
    assert!(stats.upfront_met);
    assert!(!stats.is_paid);
    assert!(stats.is_partially_paid);
    assert_eq!(StatusLabeler::label(Some(&stats)), "Partially Paid");
}

#[test]
fn test_scenario_below_upfront() {
    let stats = stats_for(dec!(5000), &[dec!(1000)]);

    assert_eq!(stats.percent_paid, dec!(20));
    assert!(!stats.upfront_met);
    assert!(stats.is_partially_paid);
    assert_eq!(StatusLabeler::label(Some(&stats)), "Upfront Required");
}

#[test]
fn test_scenario_no_payments() {
    let stats = stats_for(dec!(5000), &[]);

    assert_eq!(stats.paid_amount, Decimal::ZERO);
    assert!(!stats.is_partially_paid);
    assert_eq!(StatusLabeler::label(Some(&stats)), "Unpaid");
}

#[test]
fn test_scenario_paid_in_full() {
    let stats = stats_for(dec!(5000), &[dec!(2000), dec!(3000)]);

    assert_eq!(stats.remaining_amount, Decimal::ZERO);
    assert!(stats.is_paid);
    assert_eq!(StatusLabeler::label(Some(&stats)), "Paid");
}

#[test]
fn test_overpayment_is_clamped() {
    let stats = stats_for(dec!(1000), &[dec!(1500)]);

    assert_eq!(stats.remaining_amount, Decimal::ZERO);
    assert_eq!(stats.percent_paid, dec!(150));
    assert!(stats.is_paid);
}

#[test]
fn test_missing_stats_are_unknown() {
    assert_eq!(StatusLabeler::status(None), PaymentStatus::Unknown);
    assert_eq!(StatusLabeler::label(None), "Unknown");
}
