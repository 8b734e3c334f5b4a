//! CSV export
//!
//! Expense listings and report breakdowns as comma-separated text. Fields
//! holding commas, quotes or line breaks are quoted by the `csv` writer.

use std::io::Write;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, Money};
use crate::reports::{AggregationResult, GroupTotal};

/// Header row of expense exports
pub const EXPENSE_HEADER: [&str; 5] = ["Description", "Category", "Amount", "Paid By", "Date"];

/// Header row of breakdown exports
pub const BREAKDOWN_HEADER: [&str; 5] = ["Group", "Name", "Amount", "Count", "Percentage"];

fn writer<W: Write>(inner: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(inner)
}

/// Write expenses, one row per record in input order
pub fn write_expenses_csv<W: Write>(records: &[Expense], out: W) -> ExpenseResult<()> {
    let mut wtr = writer(out);
    wtr.write_record(EXPENSE_HEADER)?;

    for expense in records {
        wtr.write_record([
            expense.description.as_str(),
            expense.category.as_str(),
            expense.amount.to_decimal_string().as_str(),
            expense.paid_by.as_str(),
            expense.date.to_string().as_str(),
        ])?;
    }

    wtr.flush()
        .map_err(|e| ExpenseError::Export(format!("Failed to flush CSV: {}", e)))?;
    Ok(())
}

/// Render expenses as CSV text
pub fn to_csv(records: &[Expense]) -> ExpenseResult<String> {
    let mut buf = Vec::new();
    write_expenses_csv(records, &mut buf)?;
    String::from_utf8(buf).map_err(|e| ExpenseError::Export(e.to_string()))
}

/// Write the per-category and per-person breakdown of a result
///
/// Percentages are `N/A` when the total is zero.
pub fn write_breakdown_csv<W: Write>(result: &AggregationResult, out: W) -> ExpenseResult<()> {
    let mut wtr = writer(out);
    wtr.write_record(BREAKDOWN_HEADER)?;

    let sections: [(&str, &[GroupTotal]); 2] = [
        ("Category", &result.by_category),
        ("Person", &result.by_person),
    ];
    for (label, groups) in sections {
        for group in groups {
            write_group_row(&mut wtr, label, group, result.total)?;
        }
    }

    wtr.write_record([
        "Total",
        "",
        result.total.to_decimal_string().as_str(),
        result.count.to_string().as_str(),
        if result.total.is_zero() { "N/A" } else { "100.00" },
    ])?;

    wtr.flush()
        .map_err(|e| ExpenseError::Export(format!("Failed to flush CSV: {}", e)))?;
    Ok(())
}

fn write_group_row<W: Write>(
    wtr: &mut csv::Writer<W>,
    label: &str,
    group: &GroupTotal,
    total: Money,
) -> ExpenseResult<()> {
    let percentage = group
        .percentage(total)
        .map(|p| format!("{:.2}", p))
        .unwrap_or_else(|| "N/A".to_string());

    wtr.write_record([
        label,
        group.key.as_str(),
        group.total.to_decimal_string().as_str(),
        group.count.to_string().as_str(),
        percentage.as_str(),
    ])?;
    Ok(())
}
