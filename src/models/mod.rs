//! Core data models
//!
//! Expenses, the categories they are filed under, the family members who pay
//! them, plus the money and calendar-month value types.

pub mod category;
pub mod expense;
pub mod ids;
pub mod member;
pub mod money;
pub mod period;

pub use category::{Category, CategoryValidationError};
pub use expense::{Expense, ExpenseDate, ExpenseValidationError};
pub use ids::{CategoryId, ExpenseId, MemberId};
pub use member::{Member, MemberRole, MemberValidationError};
pub use money::{Money, MoneyParseError};
pub use period::{PeriodParseError, YearMonth};
