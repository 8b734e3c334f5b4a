//! CLI commands for reports
//!
//! The dashboard, the monthly breakdown and report exports.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::export::{export_report_json, export_report_yaml};
use crate::models::YearMonth;
use crate::reports::{DashboardReport, MonthlyReport};
use crate::storage::Storage;

/// Export formats for the monthly report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// The month's expenses, one row each
    Csv,
    /// Per-category and per-person totals
    Breakdown,
    Json,
    Yaml,
}

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// All-time and current-month totals plus the most recent expenses
    Dashboard {
        /// Month to treat as "this month" (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Number of recent expenses to list
        #[arg(short, long)]
        recent: Option<usize>,
    },

    /// Totals, average and breakdowns for one month
    Monthly {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Export a month's report
    Export {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,
        /// Output file; stdout when omitted
        #[arg(short, long, conflicts_with = "save")]
        output: Option<PathBuf>,
        /// Write to the default file name (expense-report-YYYY-M.csv)
        #[arg(long)]
        save: bool,
    },
}

/// Handle report commands
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> ExpenseResult<()> {
    let records = storage.expenses.get_all()?;
    let symbol = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        ReportCommands::Dashboard { month, recent } => {
            let month = parse_month(month)?;
            let limit = recent.unwrap_or(settings.recent_limit);
            let report = DashboardReport::generate(&records, month, limit);
            println!("{}", report.format_terminal(symbol, date_format));
        }

        ReportCommands::Monthly { month } => {
            let report = MonthlyReport::generate(&records, parse_month(month)?);
            println!("{}", report.format_terminal(symbol));
        }

        ReportCommands::Export {
            month,
            format,
            output,
            save,
        } => {
            let report = MonthlyReport::generate(&records, parse_month(month)?);
            let target = match (output, save) {
                (Some(path), _) => Some(path),
                (None, true) => Some(PathBuf::from(report.default_file_name())),
                (None, false) => None,
            };

            match target {
                Some(path) => {
                    let mut writer = create_file(&path)?;
                    write_report(&report, format, &mut writer)?;
                    writer
                        .flush()
                        .map_err(|e| ExpenseError::Export(e.to_string()))?;
                    println!("Report exported to: {}", path.display());
                }
                None => {
                    let stdout = io::stdout();
                    let mut handle = stdout.lock();
                    write_report(&report, format, &mut handle)?;
                }
            }
        }
    }

    Ok(())
}

fn write_report<W: Write>(
    report: &MonthlyReport,
    format: ExportFormat,
    writer: &mut W,
) -> ExpenseResult<()> {
    match format {
        ExportFormat::Csv => report.export_csv(writer),
        ExportFormat::Breakdown => report.export_breakdown_csv(writer),
        ExportFormat::Json => export_report_json(report, writer, true),
        ExportFormat::Yaml => export_report_yaml(report, writer),
    }
}

fn create_file(path: &Path) -> ExpenseResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        ExpenseError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

fn parse_month(month: Option<String>) -> ExpenseResult<YearMonth> {
    match month {
        Some(text) => YearMonth::parse(&text).map_err(|e| {
            ExpenseError::Validation(format!("{}. Use YYYY-MM (e.g., 2024-01)", e))
        }),
        None => Ok(YearMonth::current()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Expense, Money};
    use chrono::NaiveDate;

    fn report() -> MonthlyReport {
        let records = vec![Expense::new(
            "Milk",
            Money::from_cents(350),
            "Groceries",
            NaiveDate::from_ymd_opt(2024, 1, 3).unwrap(),
            "Alice",
        )];
        MonthlyReport::generate(&records, YearMonth::new(2024, 1).unwrap())
    }

    #[test]
    fn test_write_report_formats() {
        let report = report();

        let mut csv = Vec::new();
        write_report(&report, ExportFormat::Csv, &mut csv).unwrap();
        assert!(String::from_utf8(csv)
            .unwrap()
            .starts_with("Description,Category,Amount,Paid By,Date\n"));

        let mut breakdown = Vec::new();
        write_report(&report, ExportFormat::Breakdown, &mut breakdown).unwrap();
        assert!(String::from_utf8(breakdown).unwrap().contains("Person,Alice,3.50,1"));

        let mut json = Vec::new();
        write_report(&report, ExportFormat::Json, &mut json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&json).unwrap();
        assert_eq!(value["report"]["total"], 350);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(
            parse_month(Some("2024-03".into())).unwrap(),
            YearMonth::new(2024, 3).unwrap()
        );
        assert!(parse_month(Some("March".into())).unwrap_err().is_validation());
        assert!(parse_month(None).is_ok());
    }
}
