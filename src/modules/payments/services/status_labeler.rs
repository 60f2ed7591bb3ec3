use crate::modules::payments::models::{PaymentStats, PaymentStatus};

/// Maps payment stats to a display status.
///
/// Rules are checked in a fixed order and the first match wins, so a fully
/// paid invoice is `Paid` even though it also clears the upfront floor.
pub struct StatusLabeler;

impl StatusLabeler {
    pub fn status(stats: Option<&PaymentStats>) -> PaymentStatus {
        let Some(stats) = stats else {
            return PaymentStatus::Unknown;
        };

        if stats.is_paid {
            PaymentStatus::Paid
        } else if !stats.is_partially_paid {
            PaymentStatus::Unpaid
        } else if stats.upfront_met {
            PaymentStatus::PartiallyPaid
        } else {
            PaymentStatus::UpfrontRequired
        }
    }

    pub fn label(stats: Option<&PaymentStats>) -> &'static str {
        Self::status(stats).label()
    }

    pub fn css_class(stats: Option<&PaymentStats>) -> &'static str {
        Self::status(stats).css_class()
    }
}
