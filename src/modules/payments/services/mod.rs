pub mod amount_normalizer;
pub mod invoice_locks;
pub mod payment_service;
pub mod payment_validator;
pub mod stats_calculator;
pub mod status_labeler;
pub mod upfront_policy;

pub use amount_normalizer::AmountNormalizer;
pub use invoice_locks::InvoiceLocks;
pub use payment_service::PaymentService;
pub use payment_validator::{PaymentRejection, PaymentValidator};
pub use stats_calculator::PaymentStatsCalculator;
pub use status_labeler::StatusLabeler;
pub use upfront_policy::{UpfrontPolicy, DEFAULT_MINIMUM_PERCENT};
