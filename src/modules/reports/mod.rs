// Reports module: payments overview across invoices

pub mod controllers;
pub mod models;
pub mod services;

pub use models::{OverviewQuery, PaymentOverview, StatusFilter};
pub use services::ReportService;
