use serde::{Deserialize, Serialize};

/// Presentation tone of a status badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTone {
    Success,
    Error,
    Info,
    Warning,
    Neutral,
}

/// Closed set of payment status labels shown for an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentStatus {
    /// Nothing left to pay
    Paid,
    /// No money received yet
    Unpaid,
    /// Partial payment with the upfront floor cleared
    PartiallyPaid,
    /// Partial payment still under the upfront floor
    UpfrontRequired,
    /// Stats were not available
    Unknown,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
            Self::PartiallyPaid => "partially-paid",
            Self::UpfrontRequired => "upfront-required",
            Self::Unknown => "unknown",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Unpaid => "Unpaid",
            Self::PartiallyPaid => "Partially Paid",
            Self::UpfrontRequired => "Upfront Required",
            Self::Unknown => "Unknown",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            Self::Paid => StatusTone::Success,
            Self::Unpaid => StatusTone::Error,
            Self::PartiallyPaid => StatusTone::Info,
            Self::UpfrontRequired => StatusTone::Warning,
            Self::Unknown => StatusTone::Neutral,
        }
    }

    /// Badge classes (light and dark variants)
    pub fn css_class(&self) -> &'static str {
        match self.tone() {
            StatusTone::Success => {
                "bg-green-100 text-green-800 dark:bg-green-900 dark:text-green-200"
            }
            StatusTone::Error => "bg-red-100 text-red-800 dark:bg-red-900 dark:text-red-200",
            StatusTone::Info => "bg-blue-100 text-blue-800 dark:bg-blue-900 dark:text-blue-200",
            StatusTone::Warning => {
                "bg-amber-100 text-amber-800 dark:bg-amber-900 dark:text-amber-200"
            }
            StatusTone::Neutral => "bg-gray-100 text-gray-800 dark:bg-gray-800 dark:text-gray-200",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "paid" => Ok(Self::Paid),
            "unpaid" => Ok(Self::Unpaid),
            "partially-paid" => Ok(Self::PartiallyPaid),
            "upfront-required" => Ok(Self::UpfrontRequired),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}
