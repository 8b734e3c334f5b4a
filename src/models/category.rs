//! Expense category model
//!
//! Expenses refer to categories by name; the category record adds display
//! metadata and an active flag used to hide retired categories from entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Default display colour for new categories
pub const DEFAULT_COLOR: &str = "#3498db";

/// An expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: String,

    /// Display colour ("#rrggbb")
    #[serde(default = "default_color")]
    pub color: String,

    /// Optional icon (usually an emoji)
    #[serde(default)]
    pub icon: String,

    /// Whether the category is offered for new expenses
    #[serde(default = "default_active")]
    pub is_active: bool,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_active() -> bool {
    true
}

impl Category {
    /// Create a new active category
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            description: String::new(),
            color: default_color(),
            icon: String::new(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if !is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }

    /// Flip the active flag
    pub fn toggle_active(&mut self) {
        self.is_active = !self.is_active;
        self.updated_at = Utc::now();
    }

    /// Name prefixed with the icon, when one is set
    pub fn label(&self) -> String {
        if self.icon.is_empty() {
            self.name.clone()
        } else {
            format!("{} {}", self.icon, self.name)
        }
    }
}

fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#')
        .map(|hex| hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()))
        .unwrap_or(false)
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryValidationError {
    #[error("Category name cannot be empty")]
    EmptyName,
    #[error("Category name too long ({0} chars, max 50)")]
    NameTooLong(usize),
    #[error("Invalid colour '{0}', expected #rrggbb")]
    InvalidColor(String),
}
