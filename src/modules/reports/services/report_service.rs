// Payments overview.
//
// Groups every payment under its invoice, derives stats and status per
// invoice, then applies the status filter and search before sorting by the
// most recent payment.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::core::Result;
use crate::modules::invoices::models::Invoice;
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::payments::models::Payment;
use crate::modules::payments::repositories::{PaymentQuery, PaymentRepository};
use crate::modules::payments::services::{PaymentStatsCalculator, StatusLabeler};
use crate::modules::reports::models::{OverviewQuery, OverviewRow, PaymentOverview};

/// Build an overview from already-fetched invoices and payments
///
/// Payments whose invoice is not in `invoices` are ignored.
pub fn build_overview(
    invoices: Vec<Invoice>,
    payments: Vec<Payment>,
    query: &OverviewQuery,
    calculator: &PaymentStatsCalculator,
) -> PaymentOverview {
    let mut by_invoice: HashMap<String, Vec<Payment>> = HashMap::new();
    for payment in payments {
        by_invoice
            .entry(payment.invoice_id.clone())
            .or_default()
            .push(payment);
    }

    let needle = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut rows: Vec<OverviewRow> = invoices
        .into_iter()
        .filter(|invoice| needle.as_deref().map_or(true, |n| matches_search(invoice, n)))
        .map(|invoice| {
            let mut payments = by_invoice.remove(&invoice.id).unwrap_or_default();
            payments.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

            let stats = calculator.calculate(invoice.total_amount, &payments);
            OverviewRow {
                status: StatusLabeler::status(Some(&stats)),
                latest_payment_date: payments.first().map(|p| p.date),
                invoice_id: invoice.id,
                invoice_number: invoice.invoice_number,
                client_name: invoice.client_name,
                total_amount: invoice.total_amount,
                stats,
                payments,
            }
        })
        .filter(|row| query.status.matches(&row.stats))
        .collect();

    // Option orders None first; reversing puts unpaid invoices last.
    rows.sort_by(|a, b| {
        b.latest_payment_date
            .cmp(&a.latest_payment_date)
            .then_with(|| a.invoice_number.cmp(&b.invoice_number))
    });

    PaymentOverview::new(rows)
}

fn matches_search(invoice: &Invoice, needle: &str) -> bool {
    [&invoice.id, &invoice.invoice_number, &invoice.client_name]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Service for generating payment reports
pub struct ReportService {
    invoice_repo: Arc<dyn InvoiceRepository>,
    payment_repo: Arc<dyn PaymentRepository>,
    calculator: PaymentStatsCalculator,
}

impl ReportService {
    pub fn new(
        invoice_repo: Arc<dyn InvoiceRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        calculator: PaymentStatsCalculator,
    ) -> Self {
        Self {
            invoice_repo,
            payment_repo,
            calculator,
        }
    }

    /// Generate the payments overview
    ///
    /// # Arguments
    /// * `query` - Status filter and optional search text
    ///
    /// # Returns
    /// Matching invoices, most recently paid first, with totals over the
    /// returned rows
    pub async fn payment_overview(&self, query: &OverviewQuery) -> Result<PaymentOverview> {
        let invoices = self.invoice_repo.list().await?;
        let payments = self.payment_repo.list(&PaymentQuery::default()).await?;

        debug!(
            invoices = invoices.len(),
            payments = payments.len(),
            status = %query.status,
            search = ?query.search,
            "Building payment overview"
        );

        Ok(build_overview(invoices, payments, query, &self.calculator))
    }
}
