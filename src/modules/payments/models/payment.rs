// Payment record as stored by the record store and consumed by the stats core.
//
// Amounts are kept in their raw form (number or display string) because
// records created by older clients carry strings like "$1,200.00".

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::RawAmount;

/// Record-level status carried by the store (does not affect stats)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentRecordStatus {
    Completed,
    Pending,
    Failed,
}

impl Default for PaymentRecordStatus {
    fn default() -> Self {
        PaymentRecordStatus::Completed
    }
}

impl std::fmt::Display for PaymentRecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentRecordStatus::Completed => write!(f, "completed"),
            PaymentRecordStatus::Pending => write!(f, "pending"),
            PaymentRecordStatus::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for PaymentRecordStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completed" => Ok(PaymentRecordStatus::Completed),
            "pending" => Ok(PaymentRecordStatus::Pending),
            "failed" => Ok(PaymentRecordStatus::Failed),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

/// A payment recorded against exactly one invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub invoice_id: String,
    /// Display name, e.g. "Payment for INV-2024-001"
    pub name: String,
    pub amount: RawAmount,
    pub date: NaiveDate,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// True only for the first payment accepted against the invoice
    #[serde(default)]
    pub is_upfront: bool,
    #[serde(default)]
    pub status: PaymentRecordStatus,
}

impl Payment {
    /// Build a completed, unnamed payment with a fresh id
    pub fn new(
        invoice_id: impl Into<String>,
        amount: impl Into<RawAmount>,
        date: NaiveDate,
        method: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: String::new(),
            invoice_id: invoice_id.into(),
            amount: amount.into(),
            date,
            method: method.into(),
            notes: None,
            is_upfront: false,
            status: PaymentRecordStatus::Completed,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn upfront(mut self, is_upfront: bool) -> Self {
        self.is_upfront = is_upfront;
        self
    }

    pub fn with_status(mut self, status: PaymentRecordStatus) -> Self {
        self.status = status;
        self
    }
}

/// Payment submission as entered in the payment form
#[derive(Debug, Clone, Deserialize)]
pub struct NewPayment {
    pub amount: RawAmount,
    pub date: NaiveDate,
    pub method: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl NewPayment {
    pub fn new(amount: impl Into<RawAmount>, date: NaiveDate, method: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            date,
            method: method.into(),
            notes: None,
            name: None,
        }
    }

    /// Convert into a stored payment once the amount has been accepted
    pub fn into_payment(
        self,
        invoice_id: &str,
        invoice_number: &str,
        accepted_amount: Decimal,
        is_upfront: bool,
    ) -> Payment {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Payment for {}", invoice_number));

        let payment = Payment::new(invoice_id, accepted_amount, self.date, self.method)
            .with_name(name)
            .upfront(is_upfront);

        match self.notes {
            Some(notes) => payment.with_notes(notes),
            None => payment,
        }
    }
}
