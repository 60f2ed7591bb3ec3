use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::invoices::models::{Invoice, NewInvoice};
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::payments::services::AmountNormalizer;

/// Service for invoice business logic
pub struct InvoiceService {
    invoice_repo: Arc<dyn InvoiceRepository>,
}

impl InvoiceService {
    pub fn new(invoice_repo: Arc<dyn InvoiceRepository>) -> Self {
        Self { invoice_repo }
    }

    /// Create an invoice from a request whose total may be a display string
    pub async fn create_invoice(&self, request: NewInvoice) -> Result<Invoice> {
        let total_amount = AmountNormalizer::parse_strict(&request.total_amount)?;

        let mut invoice = Invoice::new(request.invoice_number, request.client_name, total_amount)?;
        if let Some(client_id) = request.client_id {
            invoice = invoice.with_client_id(client_id);
        }

        let invoice = self.invoice_repo.create(invoice).await?;

        info!(
            invoice_id = %invoice.id,
            invoice_number = %invoice.invoice_number,
            total_amount = %invoice.total_amount,
            "Invoice created"
        );

        Ok(invoice)
    }

    pub async fn get_invoice(&self, id: &str) -> Result<Invoice> {
        self.invoice_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Invoice '{}' not found", id)))
    }

    pub async fn list_invoices(&self) -> Result<Vec<Invoice>> {
        self.invoice_repo.list().await
    }
}
