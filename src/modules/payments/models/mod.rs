pub mod payment;
pub mod payment_stats;
pub mod payment_status;

pub use payment::{NewPayment, Payment, PaymentRecordStatus};
pub use payment_stats::{InvoicePaymentSummary, PaymentStats};
pub use payment_status::{PaymentStatus, StatusTone};
