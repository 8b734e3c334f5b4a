//! Expense display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Expense;

use super::report::truncate;

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Paid By")]
    paid_by: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table, dates rendered with `date_format`
pub fn format_expense_table(expenses: &[Expense], symbol: &str, date_format: &str) -> String {
    if expenses.is_empty() {
        return "No expenses found.".to_string();
    }

    let rows = expenses.iter().map(|e| ExpenseRow {
        id: e.id.to_string(),
        date: e.date.format_with(date_format),
        description: truncate(&e.description, 32),
        category: e.category.clone(),
        paid_by: e.paid_by.clone(),
        amount: e.amount.format_with_symbol(symbol),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Format a single expense with all of its fields
pub fn format_expense_details(expense: &Expense, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Expense:     {}\n", expense.description));
    output.push_str(&format!("ID:          {}\n", expense.id.as_uuid()));
    output.push_str(&format!(
        "Amount:      {}\n",
        expense.amount.format_with_symbol(symbol)
    ));
    output.push_str(&format!("Category:    {}\n", expense.category));
    output.push_str(&format!(
        "Date:        {}\n",
        expense.date.format_with(date_format)
    ));
    output.push_str(&format!("Paid by:     {}\n", expense.paid_by));
    if let Some(created) = expense.created_at {
        output.push_str(&format!(
            "Created:     {}\n",
            created.format("%Y-%m-%d %H:%M")
        ));
    }
    if let Err(reason) = expense.validate() {
        output.push_str(&format!("Invalid:     {}\n", reason));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    fn sample() -> Expense {
        Expense::new(
            "Groceries run",
            Money::from_cents(4599),
            "Groceries",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            "Alice",
        )
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_expense_table(&[], "$", "%Y-%m-%d"), "No expenses found.");
    }

    #[test]
    fn test_table_contents() {
        let table = format_expense_table(&[sample()], "$", "%Y-%m-%d");
        assert!(table.contains("Paid By"));
        assert!(table.contains("Groceries run"));
        assert!(table.contains("$45.99"));
        assert!(table.contains("2024-01-05"));
    }

    #[test]
    fn test_configured_date_format() {
        let table = format_expense_table(&[sample()], "$", "%d/%m/%Y");
        assert!(table.contains("05/01/2024"));
        assert!(!table.contains("2024-01-05"));

        let details = format_expense_details(&sample(), "$", "%d.%m.%Y");
        assert!(details.contains("Date:        05.01.2024"));
    }

    #[test]
    fn test_details_flag_invalid() {
        let mut expense = sample();
        assert!(!format_expense_details(&expense, "$", "%Y-%m-%d").contains("Invalid"));
        expense.paid_by.clear();
        assert!(format_expense_details(&expense, "$", "%Y-%m-%d")
            .contains("Invalid:     Paid by cannot be empty"));
    }
}
