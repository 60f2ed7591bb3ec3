// Payment recording flow through the service layer:
// invoice creation -> upfront payment -> follow-up payments -> settlement

use std::sync::Arc;

use chrono::NaiveDate;
use paytrack::core::AppError;
use paytrack::invoices::{InMemoryInvoiceRepository, InvoiceService, NewInvoice};
use paytrack::payments::models::{NewPayment, PaymentStatus};
use paytrack::payments::repositories::InMemoryPaymentRepository;
use paytrack::payments::services::{PaymentRejection, PaymentService, UpfrontPolicy};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

struct Fixture {
    invoices: InvoiceService,
    payments: PaymentService,
}

fn fixture(policy: UpfrontPolicy) -> Fixture {
    let invoice_repo = Arc::new(InMemoryInvoiceRepository::new());
    let payment_repo = Arc::new(InMemoryPaymentRepository::new());

    Fixture {
        invoices: InvoiceService::new(invoice_repo.clone()),
        payments: PaymentService::new(invoice_repo, payment_repo, policy),
    }
}

fn new_invoice(total: &str) -> NewInvoice {
    NewInvoice {
        invoice_number: "INV-2024-007".to_string(),
        client_name: "Robert Wilson".to_string(),
        client_id: Some("client-7".to_string()),
        total_amount: total.into(),
    }
}

fn pay(amount: &str, day: u32) -> NewPayment {
    NewPayment::new(
        amount,
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap(),
        "Bank Transfer",
    )
}

#[tokio::test]
async fn test_full_payment_lifecycle() {
    let fx = fixture(UpfrontPolicy::default());
    let invoice = fx.invoices.create_invoice(new_invoice("$5,750.00")).await.unwrap();
    assert_eq!(invoice.total_amount, dec!(5750));

    let summary = fx.payments.invoice_summary(&invoice.id).await.unwrap();
    assert_eq!(summary.status, PaymentStatus::Unpaid);
    assert_eq!(summary.minimum_upfront, dec!(2300));

    // 40% upfront
    let upfront = fx.payments.record_payment(&invoice.id, pay("$2,300.00", 1)).await.unwrap();
    assert!(upfront.is_upfront);
    assert_eq!(upfront.name, "Payment for INV-2024-007");

    let summary = fx.payments.invoice_summary(&invoice.id).await.unwrap();
    assert_eq!(summary.stats.percent_paid, dec!(40));
    assert_eq!(summary.status, PaymentStatus::PartiallyPaid);

    // Small follow-up is allowed after the upfront payment
    let follow_up = fx.payments.record_payment(&invoice.id, pay("150", 10)).await.unwrap();
    assert!(!follow_up.is_upfront);

    // Overpaying the balance is refused
    let remaining = fx.payments.invoice_summary(&invoice.id).await.unwrap().stats.remaining_amount;
    assert_eq!(remaining, dec!(3300));
    let err = fx
        .payments
        .record_payment(&invoice.id, pay("3300.01", 15))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::PaymentRejected(PaymentRejection::ExceedsRemaining { remaining }) if remaining == dec!(3300)
    ));

    // Settle
    fx.payments.record_payment(&invoice.id, pay("$3,300.00", 20)).await.unwrap();
    let summary = fx.payments.invoice_summary(&invoice.id).await.unwrap();
    assert!(summary.stats.is_paid);
    assert_eq!(summary.stats.remaining_amount, Decimal::ZERO);
    assert_eq!(summary.status, PaymentStatus::Paid);

    // Nothing left to pay
    let err = fx.payments.record_payment(&invoice.id, pay("1", 21)).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::PaymentRejected(PaymentRejection::ExceedsRemaining { .. })
    ));

    let payments = fx.payments.payments_for_invoice(&invoice.id).await.unwrap();
    assert_eq!(payments.len(), 3);
    assert_eq!(payments[0].date, NaiveDate::from_ymd_opt(2024, 7, 20).unwrap());
}

#[tokio::test]
async fn test_rejected_payment_leaves_no_record() {
    let fx = fixture(UpfrontPolicy::default());
    let invoice = fx.invoices.create_invoice(new_invoice("5000")).await.unwrap();

    let err = fx.payments.record_payment(&invoice.id, pay("1999.99", 1)).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::PaymentRejected(PaymentRejection::UpfrontNotMet { .. })
    ));

    for malformed in ["abc", "", "-5"] {
        let err = fx.payments.record_payment(&invoice.id, pay(malformed, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{:?}", malformed);
    }

    let err = fx.payments.record_payment(&invoice.id, pay("0", 1)).await.unwrap_err();
    assert!(matches!(
        err,
        AppError::PaymentRejected(PaymentRejection::InvalidAmount)
    ));

    assert!(fx.payments.payments_for_invoice(&invoice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_configured_floor_applies_to_gate_and_stats() {
    let fx = fixture(UpfrontPolicy::new(dec!(25)).unwrap());
    let invoice = fx.invoices.create_invoice(new_invoice("1000")).await.unwrap();

    fx.payments.record_payment(&invoice.id, pay("250", 1)).await.unwrap();

    let summary = fx.payments.invoice_summary(&invoice.id).await.unwrap();
    assert!(summary.stats.upfront_met);
    assert_eq!(summary.minimum_upfront, dec!(250));
    assert_eq!(summary.status, PaymentStatus::PartiallyPaid);
}

#[tokio::test]
async fn test_deleting_last_payment_restores_upfront_rule() {
    let fx = fixture(UpfrontPolicy::default());
    let invoice = fx.invoices.create_invoice(new_invoice("5000")).await.unwrap();

    let first = fx.payments.record_payment(&invoice.id, pay("2000", 1)).await.unwrap();
    fx.payments.delete_payment(&first.id).await.unwrap();

    let summary = fx.payments.invoice_summary(&invoice.id).await.unwrap();
    assert_eq!(summary.status, PaymentStatus::Unpaid);

    let replacement = fx.payments.record_payment(&invoice.id, pay("3000", 2)).await.unwrap();
    assert!(replacement.is_upfront);

    assert!(matches!(
        fx.payments.delete_payment(&first.id).await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_unknown_invoice_is_not_found() {
    let fx = fixture(UpfrontPolicy::default());

    assert!(matches!(
        fx.payments.invoice_summary("missing").await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        fx.payments.payments_for_invoice("missing").await,
        Err(AppError::NotFound(_))
    ));
}
