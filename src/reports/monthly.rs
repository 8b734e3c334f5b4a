//! Monthly Report
//!
//! Totals, average and the per-category/per-person breakdown for one calendar
//! month, plus the expenses that went into them.

use std::io::Write;

use serde::Serialize;

use crate::display::report::{format_percentage_or_na, separator};
use crate::error::ExpenseResult;
use crate::export::csv::{write_breakdown_csv, write_expenses_csv};
use crate::models::{Expense, YearMonth};

use super::aggregate::{aggregate, in_window, AggregationResult, GroupTotal};
use super::summary::{summary_line, Summary};

/// Report for a single month
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    /// The month covered
    pub window: YearMonth,
    /// Headline figures
    pub summary: Summary,
    /// Full aggregation result
    #[serde(flatten)]
    pub result: AggregationResult,
    /// Valid expenses in the month, in store order
    pub expenses: Vec<Expense>,
}

impl MonthlyReport {
    /// Build the report for `window` from the full expense list
    pub fn generate(records: &[Expense], window: YearMonth) -> Self {
        let result = aggregate(records, Some(window));
        let expenses: Vec<Expense> = records
            .iter()
            .filter(|e| in_window(e, Some(window)) && e.is_valid())
            .cloned()
            .collect();

        tracing::info!(
            month = %window,
            count = result.count,
            skipped = result.skipped,
            "generated monthly report"
        );

        Self {
            window,
            summary: summary_line(&result),
            result,
            expenses,
        }
    }

    /// File name offered for the CSV export ("expense-report-2024-1.csv")
    pub fn default_file_name(&self) -> String {
        format!(
            "expense-report-{}-{}.csv",
            self.window.year(),
            self.window.month()
        )
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Summary for {} {}\n",
            self.window.month_name(),
            self.window.year()
        ));
        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Expenses:          {}\n",
            self.summary.total.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Number of Transactions:  {}\n",
            self.summary.count
        ));
        output.push_str(&format!(
            "Average per Transaction: {}\n",
            self.summary.average.format_with_symbol(symbol)
        ));
        if self.result.skipped > 0 {
            output.push_str(&format!(
                "Skipped (invalid):       {}\n",
                self.result.skipped
            ));
        }

        output.push_str(&format_breakdown(
            "By Category",
            "Category",
            &self.result.by_category,
            &self.result,
            symbol,
        ));
        output.push_str(&format_breakdown(
            "By Person",
            "Person",
            &self.result.by_person,
            &self.result,
            symbol,
        ));

        output
    }

    /// Export the month's expenses as CSV
    pub fn export_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        write_expenses_csv(&self.expenses, writer)
    }

    /// Export the category and person breakdown as CSV
    pub fn export_breakdown_csv<W: Write>(&self, writer: W) -> ExpenseResult<()> {
        write_breakdown_csv(&self.result, writer)
    }
}

fn format_breakdown(
    title: &str,
    column: &str,
    groups: &[GroupTotal],
    result: &AggregationResult,
    symbol: &str,
) -> String {
    let mut output = format!("\n{}\n", title);

    if groups.is_empty() {
        output.push_str(&format!("No {} data available\n", column.to_lowercase()));
        return output;
    }

    output.push_str(&format!(
        "{:<30} {:>14} {:>10}\n",
        column, "Amount", "Percentage"
    ));
    output.push_str(&separator(56));
    output.push('\n');
    for group in groups {
        output.push_str(&format!(
            "{:<30} {:>14} {:>10}\n",
            group.key,
            group.total.format_with_symbol(symbol),
            format_percentage_or_na(group.percentage(result.total))
        ));
    }

    output
}
