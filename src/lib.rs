//! PayTrack invoice payment tracking library
//!
//! Computes per-invoice payment progress, enforces the upfront-payment rule
//! on first payments, and serves both over a JSON API.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use app::AppState;
pub use modules::invoices;
pub use modules::payments;
pub use modules::reports;
