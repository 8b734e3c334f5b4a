//! CLI command handlers
//!
//! Bridges clap argument parsing with the service and report layers.

pub mod category;
pub mod expense;
pub mod member;
pub mod report;

pub use category::{handle_category_command, CategoryCommands};
pub use expense::{handle_expense_command, ExpenseCommands};
pub use member::{handle_member_command, MemberCommands};
pub use report::{handle_report_command, ExportFormat, ReportCommands};
