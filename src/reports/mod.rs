//! Reports module
//!
//! The aggregation engine and the reports built on it: the dashboard and the
//! monthly report.

pub mod aggregate;
pub mod dashboard;
pub mod monthly;
pub mod summary;

pub use aggregate::{aggregate, in_window, top_recent, AggregationResult, GroupTotal};
pub use dashboard::DashboardReport;
pub use monthly::MonthlyReport;
pub use summary::{summary_line, Summary};
