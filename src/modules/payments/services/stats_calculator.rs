use rust_decimal::Decimal;
use tracing::debug;

use crate::core::RawAmount;
use crate::modules::payments::models::{Payment, PaymentStats};
use crate::modules::payments::services::{AmountNormalizer, UpfrontPolicy};

/// Derives paid/remaining/percentage figures for an invoice.
///
/// Pure: the result depends only on the total and the payment amounts, and
/// the order of payments does not matter.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentStatsCalculator {
    policy: UpfrontPolicy,
}

impl PaymentStatsCalculator {
    pub fn new(policy: UpfrontPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &UpfrontPolicy {
        &self.policy
    }

    /// Compute stats for an invoice total and its payment records
    pub fn calculate(&self, total_amount: Decimal, payments: &[Payment]) -> PaymentStats {
        self.calculate_amounts(total_amount, payments.iter().map(|p| &p.amount))
    }

    /// Compute stats from raw amounts alone
    pub fn calculate_amounts<'a, I>(&self, total_amount: Decimal, amounts: I) -> PaymentStats
    where
        I: IntoIterator<Item = &'a RawAmount>,
    {
        let paid_amount: Decimal = amounts
            .into_iter()
            .map(AmountNormalizer::normalize)
            .fold(Decimal::ZERO, |sum, amount| {
                sum.checked_add(amount).unwrap_or(Decimal::MAX)
            });

        let percent_paid = if total_amount > Decimal::ZERO {
            paid_amount
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|scaled| scaled.checked_div(total_amount))
                .unwrap_or(Decimal::MAX)
        } else {
            Decimal::ZERO
        };

        let remaining_amount = total_amount
            .checked_sub(paid_amount)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO);
        let upfront_met = self.policy.is_met_by_percent(percent_paid);
        let is_paid = remaining_amount.is_zero();
        let is_partially_paid = paid_amount > Decimal::ZERO && remaining_amount > Decimal::ZERO;

        debug!(
            total_amount = %total_amount,
            paid_amount = %paid_amount,
            percent_paid = %percent_paid,
            remaining_amount = %remaining_amount,
            "Calculated payment stats"
        );

        PaymentStats {
            paid_amount,
            percent_paid,
            remaining_amount,
            upfront_met,
            is_paid,
            is_partially_paid,
        }
    }
}
