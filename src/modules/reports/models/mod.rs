pub mod payment_overview;

pub use payment_overview::{
    OverviewQuery, OverviewRow, OverviewTotals, PaymentOverview, StatusFilter,
};
