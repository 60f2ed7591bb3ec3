use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::payments::models::{Payment, PaymentStats, PaymentStatus};

/// Payment-status filter for the overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    /// Nothing left to pay
    FullyPaid,
    /// Something paid, something left
    PartiallyPaid,
    /// Nothing paid yet
    Unpaid,
    /// Something paid, but below the upfront floor
    UpfrontRequired,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::FullyPaid => "fully-paid",
            StatusFilter::PartiallyPaid => "partially-paid",
            StatusFilter::Unpaid => "unpaid",
            StatusFilter::UpfrontRequired => "upfront-required",
        }
    }

    pub fn matches(&self, stats: &PaymentStats) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::FullyPaid => stats.is_paid,
            StatusFilter::PartiallyPaid => stats.is_partially_paid && !stats.is_paid,
            StatusFilter::Unpaid => stats.paid_amount <= Decimal::ZERO,
            StatusFilter::UpfrontRequired => {
                !stats.upfront_met && stats.paid_amount > Decimal::ZERO
            }
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(StatusFilter::All),
            "fully-paid" => Ok(StatusFilter::FullyPaid),
            "partially-paid" => Ok(StatusFilter::PartiallyPaid),
            "unpaid" => Ok(StatusFilter::Unpaid),
            "upfront-required" => Ok(StatusFilter::UpfrontRequired),
            other => Err(format!("Unknown payment status filter: {}", other)),
        }
    }
}

/// Overview request
#[derive(Debug, Clone, Default)]
pub struct OverviewQuery {
    pub status: StatusFilter,
    /// Case-insensitive substring over invoice id, number and client name
    pub search: Option<String>,
}

/// One invoice in the overview
#[derive(Debug, Clone, Serialize)]
pub struct OverviewRow {
    pub invoice_id: String,
    pub invoice_number: String,
    pub client_name: String,
    pub total_amount: Decimal,
    pub stats: PaymentStats,
    pub status: PaymentStatus,
    /// Date of the most recent payment, if any
    pub latest_payment_date: Option<NaiveDate>,
    /// Newest first
    pub payments: Vec<Payment>,
}

/// Totals across the rows of an overview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OverviewTotals {
    pub invoice_count: usize,
    pub total_billed: Decimal,
    pub total_collected: Decimal,
    pub total_outstanding: Decimal,
    /// Invoices with a balance still due
    pub open_invoices: usize,
}

impl OverviewTotals {
    pub fn from_rows(rows: &[OverviewRow]) -> Self {
        rows.iter().fold(Self::default(), |mut totals, row| {
            totals.invoice_count += 1;
            totals.total_billed = totals.total_billed.saturating_add(row.total_amount);
            totals.total_collected = totals.total_collected.saturating_add(row.stats.paid_amount);
            totals.total_outstanding = totals
                .total_outstanding
                .saturating_add(row.stats.remaining_amount);
            if !row.stats.is_paid {
                totals.open_invoices += 1;
            }
            totals
        })
    }
}

/// Payments overview: filtered, sorted rows plus their totals
#[derive(Debug, Clone, Serialize)]
pub struct PaymentOverview {
    pub rows: Vec<OverviewRow>,
    pub totals: OverviewTotals,
}

impl PaymentOverview {
    pub fn new(rows: Vec<OverviewRow>) -> Self {
        let totals = OverviewTotals::from_rows(&rows);
        Self { rows, totals }
    }
}
