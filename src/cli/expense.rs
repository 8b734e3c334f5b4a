//! Expense CLI commands

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::{format_expense_details, format_expense_table};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{ExpenseDate, Money, YearMonth};
use crate::services::{
    CreateExpenseInput, ExpenseFilter, ExpenseService, ImportService, UpdateExpenseInput,
};
use crate::storage::Storage;

/// Expense subcommands
#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// What the money was spent on
        description: String,
        /// Amount (e.g., "12.50")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Who paid
        #[arg(short, long)]
        paid_by: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List expenses
    List {
        /// Only this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only expenses paid by this person
        #[arg(short, long)]
        paid_by: Option<String>,
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Show at most this many
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show expense details
    Show {
        /// Expense ID (full or short form)
        id: String,
    },

    /// Edit an expense
    Edit {
        /// Expense ID (full or short form)
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        paid_by: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Delete an expense
    Delete {
        /// Expense ID (full or short form)
        id: String,
    },

    /// Import expenses from a CSV file in the export layout
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },
}

/// Handle an expense command
pub fn handle_expense_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExpenseCommands,
) -> ExpenseResult<()> {
    let service = ExpenseService::new(storage);
    let symbol = settings.currency_symbol.as_str();
    let date_format = settings.date_format.as_str();

    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            paid_by,
            date,
        } => {
            let date = match date {
                Some(text) => parse_date_arg(&text)?,
                None => Local::now().date_naive(),
            };

            let expense = service.create(CreateExpenseInput {
                description,
                amount: parse_amount(&amount)?,
                category,
                date: date.into(),
                paid_by,
            })?;

            println!("Recorded expense: {}", expense.description);
            println!("  Amount: {}", expense.amount.format_with_symbol(symbol));
            println!("  ID: {}", expense.id);
        }

        ExpenseCommands::List {
            category,
            paid_by,
            month,
            from,
            to,
            limit,
        } => {
            let mut filter = ExpenseFilter {
                category,
                paid_by,
                ..Default::default()
            };
            if let Some(month) = month {
                let month = YearMonth::parse(&month)
                    .map_err(|e| ExpenseError::Validation(e.to_string()))?;
                filter.start_date = Some(month.first_day());
                filter.end_date = Some(month.last_day());
            }
            if let Some(from) = from {
                filter.start_date = Some(parse_date_arg(&from)?);
            }
            if let Some(to) = to {
                filter.end_date = Some(parse_date_arg(&to)?);
            }

            let mut expenses = service.list(&filter)?;
            if let Some(limit) = limit {
                expenses.truncate(limit);
            }
            println!("{}", format_expense_table(&expenses, symbol, date_format));
        }

        ExpenseCommands::Show { id } => {
            let expense = service
                .find(&id)?
                .ok_or_else(|| ExpenseError::expense_not_found(&id))?;
            print!("{}", format_expense_details(&expense, symbol, date_format));
        }

        ExpenseCommands::Edit {
            id,
            description,
            amount,
            category,
            paid_by,
            date,
        } => {
            let expense = service
                .find(&id)?
                .ok_or_else(|| ExpenseError::expense_not_found(&id))?;

            if description.is_none()
                && amount.is_none()
                && category.is_none()
                && paid_by.is_none()
                && date.is_none()
            {
                println!("No changes specified. Use --description, --amount, --category, --paid-by or --date.");
                return Ok(());
            }

            let input = UpdateExpenseInput {
                description,
                amount: amount.as_deref().map(parse_amount).transpose()?,
                category,
                date: date
                    .as_deref()
                    .map(|d| parse_date_arg(d).map(ExpenseDate::from))
                    .transpose()?,
                paid_by,
            };

            let updated = service.update(expense.id, input)?;
            println!("Updated expense: {}", updated);
        }

        ExpenseCommands::Delete { id } => {
            let expense = service
                .find(&id)?
                .ok_or_else(|| ExpenseError::expense_not_found(&id))?;
            service.delete(expense.id)?;
            println!("Deleted expense: {}", expense.description);
        }

        ExpenseCommands::Import { file } => {
            let result = ImportService::new(storage).import_file(&file)?;
            println!("Imported {} expense(s) from {}", result.imported, file.display());
            if result.has_errors() {
                println!("Skipped {} row(s):", result.errors.len());
                for (line, reason) in &result.errors {
                    println!("  line {}: {}", line, reason);
                }
            }
        }
    }

    Ok(())
}

fn parse_amount(text: &str) -> ExpenseResult<Money> {
    Money::parse(text).map_err(|e| ExpenseError::Validation(format!("Invalid amount: {}", e)))
}

/// Parse a date argument; unlike stored data, typed dates must be well formed
pub(crate) fn parse_date_arg(text: &str) -> ExpenseResult<NaiveDate> {
    ExpenseDate::parse(text).as_date().ok_or_else(|| {
        ExpenseError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", text))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(
            parse_date_arg("2024-02-29").unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert!(parse_date_arg("2023-02-29").unwrap_err().is_validation());
        assert!(parse_date_arg("yesterday").is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("$12.50").unwrap().cents(), 1250);
        assert!(parse_amount("twelve").unwrap_err().is_validation());
    }
}
