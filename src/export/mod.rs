//! Export module
//!
//! - CSV: expense listings and report breakdowns (spreadsheet-compatible)
//! - JSON: machine-readable monthly reports
//! - YAML: human-readable monthly reports

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{to_csv, write_breakdown_csv, write_expenses_csv, EXPENSE_HEADER};
pub use json::{export_report_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_report_yaml;
