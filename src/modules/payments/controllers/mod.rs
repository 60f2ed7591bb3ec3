pub mod payment_controller;

pub use payment_controller::{
    configure, delete_payment, get_invoice_payments, get_payment_stats, list_payments,
    record_payment, PaymentResponse, PaymentStatsResponse,
};
