//! Dashboard
//!
//! All-time, current-month and previous-month totals, the category breakdown
//! and the most recent expenses.

use serde::Serialize;

use crate::display::report::separator;
use crate::models::{Expense, YearMonth};

use super::aggregate::{aggregate, top_recent, AggregationResult};

/// Dashboard figures
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    /// Month treated as "this month"
    pub month: YearMonth,
    /// Aggregation over every expense
    pub all_time: AggregationResult,
    /// Aggregation over `month`
    pub this_month: AggregationResult,
    /// Aggregation over the month before `month`
    pub last_month: AggregationResult,
    /// Most recent expenses, newest first
    pub recent: Vec<Expense>,
}

impl DashboardReport {
    /// Build the dashboard from the full expense list
    pub fn generate(records: &[Expense], month: YearMonth, recent_limit: usize) -> Self {
        Self {
            month,
            all_time: aggregate(records, None),
            this_month: aggregate(records, Some(month)),
            last_month: aggregate(records, Some(month.prev())),
            recent: top_recent(records, recent_limit),
        }
    }

    /// Format the dashboard for terminal display
    pub fn format_terminal(&self, symbol: &str, date_format: &str) -> String {
        let mut output = String::new();

        output.push_str("Family Expense Dashboard\n");
        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "Total Expenses: {}\n",
            self.all_time.total.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "This Month ({}): {}\n",
            self.month,
            self.this_month.total.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Last Month ({}): {}\n",
            self.month.prev(),
            self.last_month.total.format_with_symbol(symbol)
        ));
        output.push_str(&format!(
            "Categories:     {}\n",
            self.all_time.by_category.len()
        ));

        output.push_str("\nRecent Expenses\n");
        if self.recent.is_empty() {
            output.push_str("No expenses recorded yet.\n");
        } else {
            for expense in &self.recent {
                output.push_str(&format!(
                    "  {:<10}  {:<28} {:<16} {:>12}\n",
                    expense.date.format_with(date_format),
                    expense.description,
                    expense.category,
                    expense.amount.format_with_symbol(symbol)
                ));
            }
        }

        output.push_str("\nBy Category\n");
        if self.all_time.by_category.is_empty() {
            output.push_str("No category data available.\n");
        } else {
            for group in &self.all_time.by_category {
                output.push_str(&format!(
                    "  {:<30} {:>12}\n",
                    group.key,
                    group.total.format_with_symbol(symbol)
                ));
            }
        }

        output
    }
}
