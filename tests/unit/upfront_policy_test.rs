// Upfront policy boundary and submission gate ordering

use paytrack::payments::services::{
    PaymentRejection, PaymentStatsCalculator, PaymentValidator, UpfrontPolicy,
};
use paytrack::core::RawAmount;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

proptest! {
    #[test]
    fn test_floor_matches_integer_arithmetic(
        total_cents in 1u64..1_000_000_000u64,
        proposed_cents in 0u64..1_000_000_000u64
    ) {
        let policy = UpfrontPolicy::default();
        let total = Decimal::new(total_cents as i64, 2);
        let proposed = Decimal::new(proposed_cents as i64, 2);

        let expected = proposed_cents > 0 && proposed_cents * 10 >= total_cents * 4;
        prop_assert_eq!(policy.is_satisfied_by(proposed, total), expected);
    }

    #[test]
    fn test_later_payments_only_bounded_by_remaining(
        paid_cents in 200_000u64..500_000u64,
        proposed_cents in 1u64..100_000u64
    ) {
        let total = dec!(5000);
        let paid = [RawAmount::from(Decimal::new(paid_cents as i64, 2))];
        let stats = PaymentStatsCalculator::default().calculate_amounts(total, &paid);
        let proposed = Decimal::new(proposed_cents as i64, 2);

        let result = PaymentValidator::default().validate(proposed, total, &stats, false);
        if proposed <= stats.remaining_amount {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(
                matches!(result, Err(PaymentRejection::ExceedsRemaining { .. })),
                "expected ExceedsRemaining rejection"
            );
        }
    }
}

#[test]
fn test_boundary_values() {
    let policy = UpfrontPolicy::default();

    assert!(policy.is_satisfied_by(dec!(400), dec!(1000)));
    assert!(!policy.is_satisfied_by(dec!(399.99), dec!(1000)));
    assert!(!policy.is_satisfied_by(dec!(0), dec!(1000)));
    assert!(!policy.is_satisfied_by(dec!(400), dec!(0)));
    assert!(!policy.is_satisfied_by(None::<Decimal>, dec!(1000)));
    assert!(!policy.is_satisfied_by(dec!(400), None::<Decimal>));
}

#[test]
fn test_minimum_required() {
    let policy = UpfrontPolicy::default();
    assert_eq!(policy.minimum_required(dec!(5000)), dec!(2000));
    assert_eq!(policy.minimum_required(dec!(5750)), dec!(2300));
}

#[test]
fn test_custom_floor() {
    let policy = UpfrontPolicy::new(dec!(25)).unwrap();
    assert!(policy.is_satisfied_by(dec!(250), dec!(1000)));
    assert!(!policy.is_satisfied_by(dec!(249), dec!(1000)));

    assert!(UpfrontPolicy::new(dec!(0)).is_err());
    assert!(UpfrontPolicy::new(dec!(100.01)).is_err());
    assert!(UpfrontPolicy::new(dec!(100)).is_ok());
}

#[test]
fn test_rejection_messages() {
    let total = dec!(5000);
    let validator = PaymentValidator::default();
    let calculator = PaymentStatsCalculator::default();

    let empty: [RawAmount; 0] = [];
    let fresh = calculator.calculate_amounts(total, &empty);
    let below = validator.validate(dec!(1000), total, &fresh, true).unwrap_err();
    assert_eq!(
        below.to_string(),
        "First payment must be at least 40% ($2,000.00) of the total invoice amount"
    );

    let paid = [RawAmount::from(dec!(2000))];
    let partial = calculator.calculate_amounts(total, &paid);
    let over = validator.validate(dec!(3000.01), total, &partial, false).unwrap_err();
    assert_eq!(
        over.to_string(),
        "Payment cannot exceed the remaining amount: $3,000.00"
    );

    // Second payment below the floor is fine
    assert!(validator.validate(dec!(100), total, &partial, false).is_ok());
    assert_eq!(
        validator.validate(Decimal::ZERO, total, &partial, false),
        Err(PaymentRejection::InvalidAmount)
    );
}
