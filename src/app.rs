// Service wiring shared by the binary and the HTTP tests.

use std::sync::Arc;

use actix_web::web;

use crate::middleware::{json_config, query_config};
use crate::modules::invoices::repositories::{InMemoryInvoiceRepository, InvoiceRepository};
use crate::modules::invoices::services::InvoiceService;
use crate::modules::payments::repositories::{InMemoryPaymentRepository, PaymentRepository};
use crate::modules::payments::services::{PaymentService, UpfrontPolicy};
use crate::modules::reports::services::ReportService;
use crate::modules::{health, invoices, payments, reports};

/// Services handed to every worker
#[derive(Clone)]
pub struct AppState {
    pub invoices: web::Data<InvoiceService>,
    pub payments: web::Data<PaymentService>,
    pub reports: web::Data<ReportService>,
}

impl AppState {
    pub fn new(
        invoice_repo: Arc<dyn InvoiceRepository>,
        payment_repo: Arc<dyn PaymentRepository>,
        policy: UpfrontPolicy,
    ) -> Self {
        let payment_service = PaymentService::new(invoice_repo.clone(), payment_repo.clone(), policy);
        let calculator = *payment_service.calculator();

        Self {
            invoices: web::Data::new(InvoiceService::new(invoice_repo.clone())),
            reports: web::Data::new(ReportService::new(invoice_repo, payment_repo, calculator)),
            payments: web::Data::new(payment_service),
        }
    }

    /// Process-local stores
    pub fn in_memory(policy: UpfrontPolicy) -> Self {
        Self::new(
            Arc::new(InMemoryInvoiceRepository::new()),
            Arc::new(InMemoryPaymentRepository::new()),
            policy,
        )
    }

    /// Register app data, extractor configs and every route
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.invoices.clone())
            .app_data(self.payments.clone())
            .app_data(self.reports.clone())
            .app_data(json_config())
            .app_data(query_config());

        // Reports first: /payments/overview must win over /payments/{payment_id}
        health::configure(cfg);
        invoices::controllers::configure(cfg);
        reports::controllers::configure(cfg);
        payments::controllers::configure(cfg);
    }
}
