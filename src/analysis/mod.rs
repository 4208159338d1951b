//! Analysis modules.
//!
//! Pure aggregations over the nomination collection: the dashboard
//! metrics and the insights breakdowns.

pub mod insights;
pub mod metrics;

pub use insights::{insights, BiasBreakdown, DepartmentSentiment, Insights};
pub use metrics::{aggregate, mean, percentage, CalendarMonth, TREND_MONTHS};
