// Invoice as seen by payment tracking.
//
// Line items, rooms and catalog pricing live upstream; here an invoice is
// its identity, its client and a finalized total.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, RawAmount, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    /// Human-facing number, e.g. "INV-2024-001"
    pub invoice_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub client_name: String,
    /// Finalized total, never negative
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Create a new invoice with validation
    ///
    /// # Arguments
    /// * `invoice_number` - Display number (must not be blank)
    /// * `client_name` - Billed client
    /// * `total_amount` - Finalized total (must not be negative)
    pub fn new(
        invoice_number: impl Into<String>,
        client_name: impl Into<String>,
        total_amount: Decimal,
    ) -> Result<Self> {
        let invoice_number = invoice_number.into();
        if invoice_number.trim().is_empty() {
            return Err(AppError::validation("Invoice number cannot be empty"));
        }

        if total_amount < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Invoice total cannot be negative, got {}",
                total_amount
            )));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            invoice_number,
            client_id: None,
            client_name: client_name.into(),
            total_amount,
            created_at: Utc::now(),
        })
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }
}

/// Request body for creating an invoice
#[derive(Debug, Clone, Deserialize)]
pub struct NewInvoice {
    pub invoice_number: String,
    pub client_name: String,
    #[serde(default)]
    pub client_id: Option<String>,
    pub total_amount: RawAmount,
}
