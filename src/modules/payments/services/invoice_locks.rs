use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Per-invoice async mutexes.
///
/// A payment submission holds its invoice's guard across the
/// read-payments / validate / write sequence, so two submissions against
/// the same invoice cannot both pass the remaining-amount check on a stale
/// payment list. Submissions against different invoices do not contend.
#[derive(Debug, Default)]
pub struct InvoiceLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl InvoiceLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to one invoice
    pub async fn acquire(&self, invoice_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(invoice_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        lock.lock_owned().await
    }

    /// Number of invoices that have been locked at least once
    pub async fn tracked_invoices(&self) -> usize {
        self.locks.lock().await.len()
    }
}
