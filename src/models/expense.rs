//! Expense model
//!
//! An expense is one payment made by a family member, filed under a
//! category by name.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt::{self, Write as _};

use super::ids::ExpenseId;
use super::money::Money;

/// Date format used by the record store
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The calendar date of an expense
///
/// Records coming from the store may carry dates that do not parse; those are
/// kept verbatim so they still show up in listings and exports. A missing or
/// non-string date reads as malformed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ExpenseDate {
    Valid(NaiveDate),
    Malformed(String),
}

impl ExpenseDate {
    /// Parse a "YYYY-MM-DD" date, keeping the raw text when it doesn't parse
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            Ok(date) => Self::Valid(date),
            Err(_) => Self::Malformed(s.to_string()),
        }
    }

    /// The parsed date, if any
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Valid(date) => Some(*date),
            Self::Malformed(_) => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }

    /// Render with a strftime pattern. An unusable pattern falls back to
    /// `DATE_FORMAT`; malformed dates are shown as stored.
    pub fn format_with(&self, pattern: &str) -> String {
        match self {
            Self::Valid(date) => {
                let mut out = String::new();
                match write!(out, "{}", date.format(pattern)) {
                    Ok(()) => out,
                    Err(_) => date.format(DATE_FORMAT).to_string(),
                }
            }
            Self::Malformed(raw) => raw.clone(),
        }
    }

    /// No date text at all, as opposed to text that failed to parse
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Malformed(raw) if raw.trim().is_empty())
    }
}

impl Default for ExpenseDate {
    fn default() -> Self {
        Self::Malformed(String::new())
    }
}

impl<'de> Deserialize<'de> for ExpenseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => Self::parse(&text),
            Value::Null => Self::default(),
            other => Self::Malformed(other.to_string()),
        })
    }
}

impl From<NaiveDate> for ExpenseDate {
    fn from(date: NaiveDate) -> Self {
        Self::Valid(date)
    }
}

impl fmt::Display for ExpenseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid(date) => write!(f, "{}", date.format(DATE_FORMAT)),
            Self::Malformed(raw) => write!(f, "{}", raw),
        }
    }
}

/// A single household expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier
    pub id: ExpenseId,

    /// What was bought
    #[serde(default)]
    pub description: String,

    /// Amount paid, positive for a valid expense
    #[serde(default, deserialize_with = "lenient_amount")]
    pub amount: Money,

    /// Category name (soft reference)
    #[serde(default)]
    pub category: String,

    /// Date of the expense
    #[serde(default)]
    pub date: ExpenseDate,

    /// Name of the family member who paid
    #[serde(default)]
    pub paid_by: String,

    /// When the expense was recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the expense was last modified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Create a new expense stamped with the current time
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        date: impl Into<ExpenseDate>,
        paid_by: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExpenseId::new(),
            description: description.into(),
            amount,
            category: category.into(),
            date: date.into(),
            paid_by: paid_by.into(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }
        if !self.amount.is_positive() {
            return Err(ExpenseValidationError::NonPositiveAmount(self.amount));
        }
        if self.category.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyCategory);
        }
        if self.paid_by.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyPaidBy);
        }
        if self.date.is_missing() {
            return Err(ExpenseValidationError::MissingDate);
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Mark the expense as modified now
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, paid by {}) {}",
            self.date, self.description, self.category, self.paid_by, self.amount
        )
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpenseValidationError {
    #[error("Description cannot be empty")]
    EmptyDescription,
    #[error("Amount must be greater than zero, got {0}")]
    NonPositiveAmount(Money),
    #[error("Category cannot be empty")]
    EmptyCategory,
    #[error("Paid by cannot be empty")]
    EmptyPaidBy,
    #[error("Date is missing")]
    MissingDate,
}

/// Stored amounts are integer cents. Anything else reads as zero, which fails
/// validation, so one bad record cannot make the whole store unreadable.
fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    let amount = match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64().map(Money::from_cents),
        Value::String(text) => Money::parse(&text).ok(),
        _ => None,
    };
    Ok(amount.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Expense {
        Expense::new(
            "Weekly shop",
            Money::from_cents(4250),
            "Groceries",
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            "Alice",
        )
    }

    #[test]
    fn test_new_expense_is_valid() {
        let expense = sample();
        assert!(expense.is_valid());
        assert!(expense.created_at.is_some());
    }

    #[test]
    fn test_validation_rules() {
        let mut e = sample();
        e.description = "   ".into();
        assert_eq!(e.validate(), Err(ExpenseValidationError::EmptyDescription));

        let mut e = sample();
        e.amount = Money::zero();
        assert_eq!(
            e.validate(),
            Err(ExpenseValidationError::NonPositiveAmount(Money::zero()))
        );

        let mut e = sample();
        e.amount = Money::from_cents(-100);
        assert!(!e.is_valid());

        let mut e = sample();
        e.category = String::new();
        assert_eq!(e.validate(), Err(ExpenseValidationError::EmptyCategory));

        let mut e = sample();
        e.paid_by = String::new();
        assert_eq!(e.validate(), Err(ExpenseValidationError::EmptyPaidBy));

        let mut e = sample();
        e.date = ExpenseDate::parse("  ");
        assert_eq!(e.validate(), Err(ExpenseValidationError::MissingDate));

        let mut e = sample();
        e.date = ExpenseDate::parse("someday");
        assert!(e.is_valid());
    }

    #[test]
    fn test_date_parse() {
        assert_eq!(
            ExpenseDate::parse("2024-01-05").as_date(),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        let bad = ExpenseDate::parse("05/01/2024");
        assert!(bad.is_malformed());
        assert_eq!(bad.to_string(), "05/01/2024");
    }

    #[test]
    fn test_format_with_pattern() {
        let date = ExpenseDate::parse("2024-01-05");
        assert_eq!(date.format_with("%d/%m/%Y"), "05/01/2024");
        assert_eq!(date.format_with("%b %e, %Y"), "Jan  5, 2024");
        assert_eq!(date.format_with("%Q"), "2024-01-05");
        assert_eq!(ExpenseDate::parse("soon").format_with("%d/%m/%Y"), "soon");
    }

    #[test]
    fn test_serde_camel_case_and_malformed_date() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "description": "Fuel",
            "amount": 500,
            "category": "Transportation",
            "date": "not a date",
            "paidBy": "Bob"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.paid_by, "Bob");
        assert_eq!(expense.date, ExpenseDate::Malformed("not a date".into()));
        assert!(expense.created_at.is_none());

        let out = serde_json::to_value(&expense).unwrap();
        assert_eq!(out["paidBy"], "Bob");
        assert_eq!(out["date"], "not a date");
    }

    #[test]
    fn test_serde_valid_date_round_trip() {
        let expense = sample();
        let json = serde_json::to_string(&expense).unwrap();
        assert!(json.contains("\"date\":\"2024-01-05\""));
        let back: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expense);
    }

    #[test]
    fn test_incomplete_record_deserializes_as_invalid() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "description": "Fuel",
            "category": "Transportation",
            "paidBy": "Bob"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert!(expense.amount.is_zero());
        assert!(expense.date.is_missing());
        assert!(!expense.is_valid());
    }

    #[test]
    fn test_non_string_date_and_amount_are_kept_as_invalid() {
        let json = r#"{
            "id": "550e8400-e29b-41d4-a716-446655440000",
            "description": "Fuel",
            "amount": "twelve",
            "category": "Transportation",
            "date": 20240105,
            "paidBy": "Bob"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.date, ExpenseDate::Malformed("20240105".into()));
        assert!(expense.amount.is_zero());

        let null_date: ExpenseDate = serde_json::from_str("null").unwrap();
        assert_eq!(null_date, ExpenseDate::default());
    }
}
