// HTTP handlers for invoice endpoints
//
// Endpoints:
// - POST /invoices              - Create an invoice
// - GET  /invoices              - List invoices, newest first
// - GET  /invoices/{invoice_id} - Get one invoice

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::core::money::format_usd;
use crate::core::Result;
use crate::modules::invoices::models::{Invoice, NewInvoice};
use crate::modules::invoices::services::InvoiceService;

/// Response for invoice endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct InvoiceResponse {
    pub id: String,
    pub invoice_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub client_name: String,
    pub total_amount: String,
    pub display_total: String,
    pub created_at: String,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            display_total: format_usd(invoice.total_amount),
            total_amount: invoice.total_amount.to_string(),
            id: invoice.id,
            invoice_number: invoice.invoice_number,
            client_id: invoice.client_id,
            client_name: invoice.client_name,
            created_at: invoice.created_at.to_rfc3339(),
        }
    }
}

/// POST /invoices
///
/// # Request Body
/// ```json
/// {"invoice_number": "INV-2024-001", "client_name": "Sarah Johnson", "total_amount": "$7,000.00"}
/// ```
///
/// # Returns
/// - 201: Invoice created
/// - 400: Blank number or malformed/negative total
pub async fn create_invoice(
    request: web::Json<NewInvoice>,
    service: web::Data<InvoiceService>,
) -> Result<HttpResponse> {
    let invoice = service.create_invoice(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(InvoiceResponse::from(invoice)))
}

/// GET /invoices
pub async fn list_invoices(service: web::Data<InvoiceService>) -> Result<HttpResponse> {
    let invoices = service.list_invoices().await?;
    let body: Vec<InvoiceResponse> = invoices.into_iter().map(InvoiceResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /invoices/{invoice_id}
pub async fn get_invoice(
    invoice_id: web::Path<String>,
    service: web::Data<InvoiceService>,
) -> Result<HttpResponse> {
    let invoice = service.get_invoice(&invoice_id).await?;
    Ok(HttpResponse::Ok().json(InvoiceResponse::from(invoice)))
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/invoices")
            .route(web::post().to(create_invoice))
            .route(web::get().to(list_invoices)),
    )
    .service(web::resource("/invoices/{invoice_id}").route(web::get().to(get_invoice)));
}
