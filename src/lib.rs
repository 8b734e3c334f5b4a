//! Family expense tracker
//!
//! Records household expenses, who paid for them and under which category,
//! and turns them into totals, per-category and per-person breakdowns,
//! monthly summaries and CSV/JSON/YAML exports.
//!
//! # Architecture
//!
//! - `config`: data directory and user settings
//! - `error`: the crate error type
//! - `models`: expenses, categories, members, money and months
//! - `storage`: JSON file snapshot of the record store
//! - `services`: validated operations on top of storage
//! - `reports`: the aggregation engine and the reports built on it
//! - `export`: CSV, JSON and YAML writers
//! - `display`: terminal formatting
//! - `cli`: command handlers for the `famexp` binary
//! - `logging`: tracing subscriber setup
//!
//! # Example
//!
//! ```rust,ignore
//! use family_expenses::reports::{aggregate, summary_line};
//!
//! let result = aggregate(&expenses, Some(YearMonth::parse("2024-01")?));
//! let summary = summary_line(&result);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{ExpenseError, ExpenseResult};
