// HTTP handlers for payment endpoints
//
// Endpoints:
// - GET    /invoices/{invoice_id}/payment-stats - Payment progress and status badge
// - GET    /invoices/{invoice_id}/payments      - Payments recorded against an invoice
// - POST   /invoices/{invoice_id}/payments      - Record a payment
// - GET    /payments                            - List payments (invoice_id/status filters)
// - DELETE /payments/{payment_id}               - Delete a payment

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::{format_percent, format_usd, round_cents};
use crate::core::{AppError, Result};
use crate::modules::payments::models::{InvoicePaymentSummary, NewPayment, Payment};
use crate::modules::payments::repositories::PaymentQuery;
use crate::modules::payments::services::{AmountNormalizer, PaymentService};

/// Response for a single payment
#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub id: String,
    pub invoice_id: String,
    pub name: String,
    pub amount: String,
    pub display_amount: String,
    pub date: String,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub is_upfront: bool,
    pub status: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        let amount = AmountNormalizer::normalize(&payment.amount);
        Self {
            id: payment.id,
            invoice_id: payment.invoice_id,
            name: payment.name,
            amount: amount.to_string(),
            display_amount: format_usd(amount),
            date: payment.date.to_string(),
            method: payment.method,
            notes: payment.notes,
            is_upfront: payment.is_upfront,
            status: payment.status.to_string(),
        }
    }
}

/// Response for GET /invoices/{id}/payment-stats
#[derive(Debug, Serialize, Deserialize)]
pub struct PaymentStatsResponse {
    pub invoice_id: String,
    pub total_amount: String,
    pub paid_amount: String,
    pub percent_paid: String,
    pub remaining_amount: String,
    pub upfront_met: bool,
    pub is_paid: bool,
    pub is_partially_paid: bool,
    pub minimum_upfront: String,
    pub status: String,
    pub status_label: String,
    pub status_class: String,
    pub display: StatsDisplay,
}

/// Pre-formatted figures for the progress bar
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsDisplay {
    pub paid: String,
    pub percent_paid: String,
    pub remaining: String,
    /// Progress bar width, capped at 100
    pub progress_width: String,
}

impl From<InvoicePaymentSummary> for PaymentStatsResponse {
    fn from(summary: InvoicePaymentSummary) -> Self {
        let stats = summary.stats;
        Self {
            invoice_id: summary.invoice_id,
            total_amount: summary.total_amount.to_string(),
            paid_amount: stats.paid_amount.to_string(),
            percent_paid: stats.percent_paid.round_dp(2).normalize().to_string(),
            remaining_amount: stats.remaining_amount.to_string(),
            upfront_met: stats.upfront_met,
            is_paid: stats.is_paid,
            is_partially_paid: stats.is_partially_paid,
            minimum_upfront: format!("{:.2}", round_cents(summary.minimum_upfront)),
            status: summary.status.as_str().to_string(),
            status_label: summary.status.label().to_string(),
            status_class: summary.status.css_class().to_string(),
            display: StatsDisplay {
                paid: format_usd(stats.paid_amount),
                percent_paid: format_percent(stats.percent_paid),
                remaining: format_usd(stats.remaining_amount),
                progress_width: format_percent(stats.percent_paid.min(Decimal::ONE_HUNDRED)),
            },
        }
    }
}

/// Query for GET /payments
#[derive(Debug, Deserialize)]
pub struct ListPaymentsQuery {
    pub invoice_id: Option<String>,
    pub status: Option<String>,
}

impl TryFrom<ListPaymentsQuery> for PaymentQuery {
    type Error = AppError;

    fn try_from(query: ListPaymentsQuery) -> Result<Self> {
        let status = query
            .status
            .map(|s| s.parse())
            .transpose()
            .map_err(AppError::Validation)?;

        Ok(PaymentQuery {
            invoice_id: query.invoice_id,
            status,
        })
    }
}

/// GET /invoices/{invoice_id}/payment-stats
///
/// # Returns
/// - 200: Paid/remaining figures, upfront flag and status badge
/// - 404: Invoice not found
pub async fn get_payment_stats(
    invoice_id: web::Path<String>,
    service: web::Data<PaymentService>,
) -> Result<HttpResponse> {
    let summary = service.invoice_summary(&invoice_id).await?;
    Ok(HttpResponse::Ok().json(PaymentStatsResponse::from(summary)))
}

/// GET /invoices/{invoice_id}/payments
pub async fn get_invoice_payments(
    invoice_id: web::Path<String>,
    service: web::Data<PaymentService>,
) -> Result<HttpResponse> {
    let payments = service.payments_for_invoice(&invoice_id).await?;
    let body: Vec<PaymentResponse> = payments.into_iter().map(PaymentResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /invoices/{invoice_id}/payments
///
/// # Request Body
/// ```json
/// {"amount": "$2,000.00", "date": "2024-06-01", "method": "Bank Transfer", "notes": "Upfront"}
/// ```
///
/// # Returns
/// - 201: Payment recorded
/// - 400: Malformed amount, amount above remaining balance, or first payment under the upfront floor
/// - 404: Invoice not found
pub async fn record_payment(
    invoice_id: web::Path<String>,
    request: web::Json<NewPayment>,
    service: web::Data<PaymentService>,
) -> Result<HttpResponse> {
    let payment = service
        .record_payment(&invoice_id, request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(PaymentResponse::from(payment)))
}

/// GET /payments
pub async fn list_payments(
    query: web::Query<ListPaymentsQuery>,
    service: web::Data<PaymentService>,
) -> Result<HttpResponse> {
    let query = PaymentQuery::try_from(query.into_inner())?;
    let payments = service.list_payments(&query).await?;
    let body: Vec<PaymentResponse> = payments.into_iter().map(PaymentResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// DELETE /payments/{payment_id}
pub async fn delete_payment(
    payment_id: web::Path<String>,
    service: web::Data<PaymentService>,
) -> Result<HttpResponse> {
    service.delete_payment(&payment_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Configure payment routes
///
/// Register after the report routes: `/payments/{payment_id}` would
/// otherwise shadow `/payments/overview`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/invoices/{invoice_id}/payment-stats")
            .route(web::get().to(get_payment_stats)),
    )
    .service(
        web::resource("/invoices/{invoice_id}/payments")
            .route(web::get().to(get_invoice_payments))
            .route(web::post().to(record_payment)),
    )
    .service(web::resource("/payments").route(web::get().to(list_payments)))
    .service(web::resource("/payments/{payment_id}").route(web::delete().to(delete_payment)));
}
