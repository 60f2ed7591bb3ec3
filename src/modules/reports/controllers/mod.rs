pub mod report_controller;

pub use report_controller::{configure, get_payment_overview, OverviewResponse};
