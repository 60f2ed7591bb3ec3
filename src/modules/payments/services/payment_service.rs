// Payment recording and per-invoice stats.
//
// Submissions for one invoice are serialized through InvoiceLocks so the
// remaining-amount check always runs against the current payment list.

use std::sync::Arc;

use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::invoices::models::Invoice;
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::payments::models::{InvoicePaymentSummary, NewPayment, Payment};
use crate::modules::payments::repositories::{PaymentQuery, PaymentRepository};
use crate::modules::payments::services::{
    AmountNormalizer, InvoiceLocks, PaymentStatsCalculator, PaymentValidator, StatusLabeler,
    UpfrontPolicy,
};

/// Service for payment business logic
pub struct PaymentService {
    invoice_repo: Arc<dyn InvoiceRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
    calculator: PaymentStatsCalculator,
    validator: PaymentValidator,
    locks: InvoiceLocks,
}

impl PaymentService {
    pub fn new(
        invoice_repo: Arc<dyn InvoiceRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        policy: UpfrontPolicy,
    ) -> Self {
        Self {
            invoice_repo,
            payment_repo,
            calculator: PaymentStatsCalculator::new(policy),
            validator: PaymentValidator::new(policy),
            locks: InvoiceLocks::new(),
        }
    }

    pub fn calculator(&self) -> &PaymentStatsCalculator {
        &self.calculator
    }

    /// Record a payment against an invoice
    ///
    /// # Business Rules
    /// - Amount must parse strictly and be positive
    /// - Amount may not exceed the invoice's remaining balance
    /// - The first payment (no prior payment exists) must clear the upfront floor
    ///   and is flagged `is_upfront`
    ///
    /// # Errors
    /// * `NotFound` - Unknown invoice
    /// * `Validation` - Malformed amount
    /// * `PaymentRejected` - Submission gate refused the amount
    pub async fn record_payment(&self, invoice_id: &str, submission: NewPayment) -> Result<Payment> {
        let proposed_amount = AmountNormalizer::parse_strict(&submission.amount)?;
        let invoice = self.load_invoice(invoice_id).await?;

        // Only known invoices get a lock entry.
        let _guard = self.locks.acquire(&invoice.id).await;

        let existing = self.payment_repo.find_by_invoice(invoice_id).await?;
        let stats = self.calculator.calculate(invoice.total_amount, &existing);
        let is_first_payment = existing.is_empty();

        if let Err(rejection) =
            self.validator
                .validate(proposed_amount, invoice.total_amount, &stats, is_first_payment)
        {
            warn!(
                invoice_id = %invoice_id,
                amount = %proposed_amount,
                remaining = %stats.remaining_amount,
                reason = %rejection,
                "Payment rejected"
            );
            return Err(rejection.into());
        }

        let payment = submission.into_payment(
            invoice_id,
            &invoice.invoice_number,
            proposed_amount,
            is_first_payment,
        );
        let payment = self.payment_repo.create(payment).await?;

        info!(
            invoice_id = %invoice_id,
            payment_id = %payment.id,
            amount = %proposed_amount,
            is_upfront = payment.is_upfront,
            "Payment recorded"
        );

        Ok(payment)
    }

    /// Stats and status for one invoice
    pub async fn invoice_summary(&self, invoice_id: &str) -> Result<InvoicePaymentSummary> {
        let invoice = self.load_invoice(invoice_id).await?;
        let payments = self.payment_repo.find_by_invoice(invoice_id).await?;
        Ok(self.summarize(&invoice, &payments))
    }

    /// Summarize an invoice from an already-fetched payment list
    pub fn summarize(&self, invoice: &Invoice, payments: &[Payment]) -> InvoicePaymentSummary {
        let stats = self.calculator.calculate(invoice.total_amount, payments);

        InvoicePaymentSummary {
            invoice_id: invoice.id.clone(),
            total_amount: invoice.total_amount,
            stats,
            status: StatusLabeler::status(Some(&stats)),
            minimum_upfront: self.calculator.policy().minimum_required(invoice.total_amount),
        }
    }

    pub async fn payments_for_invoice(&self, invoice_id: &str) -> Result<Vec<Payment>> {
        self.load_invoice(invoice_id).await?;
        self.payment_repo.find_by_invoice(invoice_id).await
    }

    pub async fn list_payments(&self, query: &PaymentQuery) -> Result<Vec<Payment>> {
        self.payment_repo.list(query).await
    }

    /// Delete a payment; the invoice's next submission is re-evaluated from
    /// whatever payments remain.
    pub async fn delete_payment(&self, payment_id: &str) -> Result<()> {
        let payment = self
            .payment_repo
            .find_by_id(payment_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Payment '{}' not found", payment_id)))?;

        let _guard = self.locks.acquire(&payment.invoice_id).await;

        // A concurrent delete may have won the lock first.
        if self.payment_repo.find_by_id(payment_id).await?.is_none() {
            return Err(AppError::not_found(format!("Payment '{}' not found", payment_id)));
        }
        self.payment_repo.delete(payment_id).await?;

        info!(
            invoice_id = %payment.invoice_id,
            payment_id = %payment_id,
            "Payment deleted"
        );

        Ok(())
    }

    async fn load_invoice(&self, invoice_id: &str) -> Result<Invoice> {
        self.invoice_repo
            .find_by_id(invoice_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Invoice '{}' not found", invoice_id)))
    }
}
