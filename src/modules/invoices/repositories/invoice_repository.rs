// Invoice data source.
//
// The hosted record store is an external collaborator; the trait is the
// contract this crate consumes. The in-memory implementation is
// process-local and non-durable.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::core::Result;
use crate::modules::invoices::models::Invoice;

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Store a new invoice
    async fn create(&self, invoice: Invoice) -> Result<Invoice>;

    /// Find an invoice by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Invoice>>;

    /// All invoices, newest first
    async fn list(&self) -> Result<Vec<Invoice>>;
}

/// In-memory invoice store
#[derive(Debug, Default)]
pub struct InMemoryInvoiceRepository {
    invoices: RwLock<HashMap<String, Invoice>>,
}

impl InMemoryInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn create(&self, invoice: Invoice) -> Result<Invoice> {
        self.invoices
            .write()
            .await
            .insert(invoice.id.clone(), invoice.clone());
        Ok(invoice)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Invoice>> {
        Ok(self.invoices.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = self.invoices.read().await.values().cloned().collect();
        invoices.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(invoices)
    }
}
