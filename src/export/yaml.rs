//! YAML export of monthly reports (human-readable)

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::reports::MonthlyReport;

use super::json::ReportExport;

/// Export a monthly report as YAML with a short comment header
pub fn export_report_yaml<W: Write>(report: &MonthlyReport, writer: &mut W) -> ExpenseResult<()> {
    let export = ReportExport::new(report);

    writeln!(
        writer,
        "# Expense report for {} {}",
        report.window.month_name(),
        report.window.year()
    )
    .map_err(|e| ExpenseError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| ExpenseError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export)?;
    Ok(())
}
