// Payments module: stats core, submission gate and recording service

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{NewPayment, Payment, PaymentStats, PaymentStatus};
pub use repositories::{InMemoryPaymentRepository, PaymentQuery, PaymentRepository};
pub use services::{
    AmountNormalizer, PaymentRejection, PaymentService, PaymentStatsCalculator, PaymentValidator,
    StatusLabeler, UpfrontPolicy,
};
