//! Display formatting for terminal output

pub mod category;
pub mod expense;
pub mod member;
pub mod report;

pub use category::{format_category_list, format_default_categories};
pub use expense::{format_expense_details, format_expense_table};
pub use member::format_member_list;
