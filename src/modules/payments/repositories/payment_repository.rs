// Payment data source.
//
// Supplies the complete current list of payments for an invoice. The
// in-memory implementation stands in for the hosted record store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::core::{AppError, Result};
use crate::modules::payments::models::{Payment, PaymentRecordStatus};

/// Filters for listing payments
#[derive(Debug, Clone, Default)]
pub struct PaymentQuery {
    pub invoice_id: Option<String>,
    pub status: Option<PaymentRecordStatus>,
}

impl PaymentQuery {
    pub fn for_invoice(invoice_id: impl Into<String>) -> Self {
        Self {
            invoice_id: Some(invoice_id.into()),
            status: None,
        }
    }

    fn matches(&self, payment: &Payment) -> bool {
        self.invoice_id
            .as_deref()
            .map_or(true, |id| payment.invoice_id == id)
            && self.status.map_or(true, |s| payment.status == s)
    }
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Store a new payment
    async fn create(&self, payment: Payment) -> Result<Payment>;

    /// Find a payment by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>>;

    /// Every payment recorded against an invoice, newest first
    async fn find_by_invoice(&self, invoice_id: &str) -> Result<Vec<Payment>> {
        self.list(&PaymentQuery::for_invoice(invoice_id)).await
    }

    /// Payments matching a query, newest first
    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>>;

    /// Remove a payment
    async fn delete(&self, id: &str) -> Result<()>;
}

/// In-memory payment store
#[derive(Debug, Default)]
pub struct InMemoryPaymentRepository {
    payments: RwLock<HashMap<String, Payment>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records
    pub fn with_payments(payments: impl IntoIterator<Item = Payment>) -> Self {
        let payments = payments.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self {
            payments: RwLock::new(payments),
        }
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn create(&self, payment: Payment) -> Result<Payment> {
        let mut payments = self.payments.write().await;
        if payments.contains_key(&payment.id) {
            return Err(AppError::validation(format!(
                "Payment '{}' already exists",
                payment.id
            )));
        }
        payments.insert(payment.id.clone(), payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>> {
        Ok(self.payments.read().await.get(id).cloned())
    }

    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>> {
        let mut payments: Vec<Payment> = self
            .payments
            .read()
            .await
            .values()
            .filter(|p| query.matches(p))
            .cloned()
            .collect();

        payments.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));
        Ok(payments)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.payments
            .write()
            .await
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Payment '{}' not found", id)))
    }
}
