use rust_decimal::Decimal;

use crate::core::{AppError, Result};

/// Minimum share of the invoice total the first payment must cover
pub const DEFAULT_MINIMUM_PERCENT: u32 = 40;

/// Minimum-upfront-payment rule.
///
/// Applies only to the first payment recorded against an invoice. Later
/// payments are bounded by the remaining amount alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpfrontPolicy {
    minimum_percent: Decimal,
}

impl UpfrontPolicy {
    /// Create a policy with a custom minimum, which must lie in (0, 100]
    pub fn new(minimum_percent: Decimal) -> Result<Self> {
        if minimum_percent <= Decimal::ZERO || minimum_percent > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(format!(
                "Upfront minimum must be greater than 0 and at most 100 percent, got {}",
                minimum_percent
            )));
        }

        Ok(Self { minimum_percent })
    }

    pub fn minimum_percent(&self) -> Decimal {
        self.minimum_percent
    }

    /// Amount the first payment must reach: `total * minimum_percent / 100`
    pub fn minimum_required(&self, total_amount: Decimal) -> Decimal {
        total_amount * (self.minimum_percent / Decimal::ONE_HUNDRED)
    }

    /// Whether a percentage already paid clears the floor
    pub fn is_met_by_percent(&self, percent_paid: Decimal) -> bool {
        percent_paid >= self.minimum_percent
    }

    /// Gate for a proposed first payment.
    ///
    /// Returns `false` when either amount is missing or zero, so incomplete
    /// form data never passes the gate.
    pub fn is_satisfied_by(
        &self,
        proposed_amount: impl Into<Option<Decimal>>,
        total_amount: impl Into<Option<Decimal>>,
    ) -> bool {
        match (proposed_amount.into(), total_amount.into()) {
            (Some(proposed), Some(total)) if !proposed.is_zero() && !total.is_zero() => {
                proposed >= self.minimum_required(total)
            }
            _ => false,
        }
    }
}

impl Default for UpfrontPolicy {
    fn default() -> Self {
        Self {
            minimum_percent: Decimal::from(DEFAULT_MINIMUM_PERCENT),
        }
    }
}
