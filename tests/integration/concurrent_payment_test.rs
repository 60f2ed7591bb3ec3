// Concurrent submissions against one invoice must never overshoot the total.
//
// The payment store below yields between reading and writing so that,
// without per-invoice serialization, both submissions would see the same
// remaining balance.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use paytrack::core::{AppError, Result};
use paytrack::invoices::{InMemoryInvoiceRepository, Invoice, InvoiceRepository};
use paytrack::payments::models::{NewPayment, Payment};
use paytrack::payments::repositories::{InMemoryPaymentRepository, PaymentQuery, PaymentRepository};
use paytrack::payments::services::{PaymentRejection, PaymentService, UpfrontPolicy};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Payment store that stalls every read
struct SlowPaymentRepository {
    inner: InMemoryPaymentRepository,
    delay: Duration,
}

#[async_trait]
impl PaymentRepository for SlowPaymentRepository {
    async fn create(&self, payment: Payment) -> Result<Payment> {
        self.inner.create(payment).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Payment>> {
        self.inner.find_by_id(id).await
    }

    async fn list(&self, query: &PaymentQuery) -> Result<Vec<Payment>> {
        let payments = self.inner.list(query).await?;
        tokio::time::sleep(self.delay).await;
        Ok(payments)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.inner.delete(id).await
    }
}

fn on(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 8, day).unwrap()
}

async fn service_with_balance(total: Decimal, already_paid: Decimal) -> (Arc<PaymentService>, String) {
    let invoice_repo = Arc::new(InMemoryInvoiceRepository::new());
    let invoice = Invoice::new("INV-2024-020", "Lisa Park", total).unwrap();
    let invoice_id = invoice.id.clone();
    invoice_repo.create(invoice).await.unwrap();

    let payment_repo = SlowPaymentRepository {
        inner: InMemoryPaymentRepository::with_payments([
            Payment::new(invoice_id.clone(), already_paid, on(1), "Bank Transfer").upfront(true),
        ]),
        delay: Duration::from_millis(20),
    };

    let service = PaymentService::new(invoice_repo, Arc::new(payment_repo), UpfrontPolicy::default());
    (Arc::new(service), invoice_id)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_payments_for_last_balance_only_one_succeeds() {
    let (service, invoice_id) = service_with_balance(dec!(5000), dec!(2000)).await;

    let handles: Vec<_> = (0..2)
        .map(|i| {
            let service = service.clone();
            let invoice_id = invoice_id.clone();
            tokio::spawn(async move {
                service
                    .record_payment(&invoice_id, NewPayment::new("3000", on(2 + i), "Wire"))
                    .await
            })
        })
        .collect();

    let mut accepted = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => accepted += 1,
            Err(AppError::PaymentRejected(PaymentRejection::ExceedsRemaining { remaining })) => {
                assert_eq!(remaining, Decimal::ZERO);
                rejected += 1;
            }
            Err(other) => panic!("unexpected error: {}", other),
        }
    }

    assert_eq!(accepted, 1);
    assert_eq!(rejected, 1);

    let summary = service.invoice_summary(&invoice_id).await.unwrap();
    assert_eq!(summary.stats.paid_amount, dec!(5000));
    assert!(summary.stats.is_paid);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_small_payments_never_overshoot() {
    let (service, invoice_id) = service_with_balance(dec!(1000), dec!(400)).await;

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let service = service.clone();
            let invoice_id = invoice_id.clone();
            tokio::spawn(async move {
                service
                    .record_payment(&invoice_id, NewPayment::new("100", on(2 + i), "Card"))
                    .await
            })
        })
        .collect();

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            accepted += 1;
        }
    }

    assert_eq!(accepted, 6);
    let summary = service.invoice_summary(&invoice_id).await.unwrap();
    assert_eq!(summary.stats.paid_amount, dec!(1000));
    assert_eq!(summary.stats.remaining_amount, Decimal::ZERO);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_different_invoices_proceed_independently() {
    let invoice_repo = Arc::new(InMemoryInvoiceRepository::new());
    let mut ids = Vec::new();
    for n in 0..4 {
        let invoice = Invoice::new(format!("INV-2024-10{}", n), "Client", dec!(1000)).unwrap();
        ids.push(invoice.id.clone());
        invoice_repo.create(invoice).await.unwrap();
    }

    let service = Arc::new(PaymentService::new(
        invoice_repo,
        Arc::new(InMemoryPaymentRepository::new()),
        UpfrontPolicy::default(),
    ));

    let handles: Vec<_> = ids
        .iter()
        .cloned()
        .map(|id| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .record_payment(&id, NewPayment::new(dec!(1000), on(3), "Cash"))
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().unwrap().is_upfront);
    }
}
