// HTTP handlers for payment reports
//
// Endpoints:
// - GET /payments/overview?status=&search= - Per-invoice payment overview

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::core::money::{format_percent, format_usd};
use crate::core::{AppError, Result};
use crate::modules::payments::controllers::PaymentResponse;
use crate::modules::reports::models::{
    OverviewQuery, OverviewRow, OverviewTotals, PaymentOverview, StatusFilter,
};
use crate::modules::reports::services::ReportService;

/// Query parameters for the overview endpoint
#[derive(Debug, Deserialize)]
pub struct OverviewParams {
    /// all | fully-paid | partially-paid | unpaid | upfront-required
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl TryFrom<OverviewParams> for OverviewQuery {
    type Error = AppError;

    fn try_from(params: OverviewParams) -> Result<Self> {
        let status = params
            .status
            .as_deref()
            .map(str::parse::<StatusFilter>)
            .transpose()
            .map_err(AppError::Validation)?
            .unwrap_or_default();

        Ok(OverviewQuery {
            status,
            search: params.search,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub status_filter: String,
    pub invoices: Vec<OverviewRowResponse>,
    pub totals: OverviewTotalsResponse,
}

#[derive(Debug, Serialize)]
pub struct OverviewRowResponse {
    pub invoice_id: String,
    pub invoice_number: String,
    pub client_name: String,
    pub total_amount: String,
    pub paid_amount: String,
    pub remaining_amount: String,
    pub percent_paid: String,
    pub status: String,
    pub status_label: String,
    pub status_class: String,
    pub latest_payment_date: Option<String>,
    pub payments: Vec<PaymentResponse>,
}

#[derive(Debug, Serialize)]
pub struct OverviewTotalsResponse {
    pub invoice_count: usize,
    pub total_billed: String,
    pub total_collected: String,
    pub total_outstanding: String,
    pub open_invoices: usize,
}

impl From<OverviewRow> for OverviewRowResponse {
    fn from(row: OverviewRow) -> Self {
        Self {
            invoice_id: row.invoice_id,
            invoice_number: row.invoice_number,
            client_name: row.client_name,
            total_amount: format_usd(row.total_amount),
            paid_amount: format_usd(row.stats.paid_amount),
            remaining_amount: format_usd(row.stats.remaining_amount),
            percent_paid: format_percent(row.stats.percent_paid),
            status: row.status.as_str().to_string(),
            status_label: row.status.label().to_string(),
            status_class: row.status.css_class().to_string(),
            latest_payment_date: row.latest_payment_date.map(|d| d.to_string()),
            payments: row.payments.into_iter().map(PaymentResponse::from).collect(),
        }
    }
}

impl From<OverviewTotals> for OverviewTotalsResponse {
    fn from(totals: OverviewTotals) -> Self {
        Self {
            invoice_count: totals.invoice_count,
            total_billed: format_usd(totals.total_billed),
            total_collected: format_usd(totals.total_collected),
            total_outstanding: format_usd(totals.total_outstanding),
            open_invoices: totals.open_invoices,
        }
    }
}

impl OverviewResponse {
    fn new(filter: StatusFilter, overview: PaymentOverview) -> Self {
        Self {
            status_filter: filter.to_string(),
            invoices: overview
                .rows
                .into_iter()
                .map(OverviewRowResponse::from)
                .collect(),
            totals: overview.totals.into(),
        }
    }
}

/// GET /payments/overview
///
/// # Returns
/// - 200: Invoices with their payment stats, most recently paid first
/// - 400: Unknown status filter
pub async fn get_payment_overview(
    params: web::Query<OverviewParams>,
    service: web::Data<ReportService>,
) -> Result<HttpResponse> {
    let query = OverviewQuery::try_from(params.into_inner())?;
    let overview = service.payment_overview(&query).await?;
    Ok(HttpResponse::Ok().json(OverviewResponse::new(query.status, overview)))
}

/// Configure report routes
///
/// Must be registered before the payment routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/payments/overview").route(web::get().to(get_payment_overview)));
}
