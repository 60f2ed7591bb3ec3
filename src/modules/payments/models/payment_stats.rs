use rust_decimal::Decimal;
use serde::Serialize;

use super::PaymentStatus;

/// Derived payment progress for one invoice. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaymentStats {
    /// Sum of normalized payment amounts
    pub paid_amount: Decimal,
    /// `paid_amount / total_amount * 100`, zero for non-positive totals
    pub percent_paid: Decimal,
    /// `max(0, total_amount - paid_amount)`
    pub remaining_amount: Decimal,
    pub upfront_met: bool,
    pub is_paid: bool,
    pub is_partially_paid: bool,
}

/// Stats for one invoice together with its derived status
#[derive(Debug, Clone, Serialize)]
pub struct InvoicePaymentSummary {
    pub invoice_id: String,
    pub total_amount: Decimal,
    pub stats: PaymentStats,
    pub status: PaymentStatus,
    /// Smallest first payment the upfront rule accepts
    pub minimum_upfront: Decimal,
}
