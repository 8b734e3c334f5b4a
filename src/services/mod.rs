//! Service layer
//!
//! Business logic on top of the storage layer: validation, name resolution
//! and the write-through to disk after each change.

pub mod category;
pub mod expense;
pub mod import;
pub mod member;

pub use category::{CategoryService, UpdateCategoryInput};
pub use expense::{CreateExpenseInput, ExpenseFilter, ExpenseService, UpdateExpenseInput};
pub use import::{ImportResult, ImportService};
pub use member::MemberService;
