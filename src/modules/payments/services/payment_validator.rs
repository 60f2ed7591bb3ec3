use rust_decimal::Decimal;

use crate::core::money::{format_usd, round_cents};
use crate::modules::payments::models::PaymentStats;
use crate::modules::payments::services::UpfrontPolicy;

/// Reasons a proposed payment is refused
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PaymentRejection {
    #[error("Please enter a valid payment amount")]
    InvalidAmount,

    #[error("Payment cannot exceed the remaining amount: {}", usd(.remaining))]
    ExceedsRemaining { remaining: Decimal },

    #[error(
        "First payment must be at least {}% ({}) of the total invoice amount",
        .percent.normalize(),
        usd(.minimum)
    )]
    UpfrontNotMet { minimum: Decimal, percent: Decimal },
}

fn usd(amount: &Decimal) -> String {
    format_usd(*amount)
}

/// Submission gate for new payments.
///
/// Checks, in order: positive amount, the remaining-amount bound (always),
/// and the upfront floor (first payment only).
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentValidator {
    policy: UpfrontPolicy,
}

impl PaymentValidator {
    pub fn new(policy: UpfrontPolicy) -> Self {
        Self { policy }
    }

    pub fn validate(
        &self,
        proposed_amount: Decimal,
        total_amount: Decimal,
        stats: &PaymentStats,
        is_first_payment: bool,
    ) -> std::result::Result<(), PaymentRejection> {
        if proposed_amount <= Decimal::ZERO {
            return Err(PaymentRejection::InvalidAmount);
        }

        if proposed_amount > stats.remaining_amount {
            return Err(PaymentRejection::ExceedsRemaining {
                remaining: stats.remaining_amount,
            });
        }

        if is_first_payment && !self.policy.is_satisfied_by(proposed_amount, total_amount) {
            return Err(PaymentRejection::UpfrontNotMet {
                minimum: round_cents(self.policy.minimum_required(total_amount)),
                percent: self.policy.minimum_percent(),
            });
        }

        Ok(())
    }
}
