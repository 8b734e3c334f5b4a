//! Family member model
//!
//! Members are the people who pay for expenses; an expense's `paid_by` holds
//! the member's name.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::MemberId;

/// Role of a family member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    #[default]
    Member,
    Admin,
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member => write!(f, "member"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// A family member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Unique identifier
    pub id: MemberId,

    /// Display name, used as `paid_by` on expenses
    pub name: String,

    /// Contact email
    pub email: String,

    #[serde(default)]
    pub role: MemberRole,

    /// When the member was added
    pub created_at: DateTime<Utc>,
}

impl Member {
    /// Create a new member with the default role
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(),
            name: name.into(),
            email: email.into(),
            role: MemberRole::Member,
            created_at: Utc::now(),
        }
    }

    /// Validate the member
    pub fn validate(&self) -> Result<(), MemberValidationError> {
        if self.name.trim().is_empty() {
            return Err(MemberValidationError::EmptyName);
        }
        if self.email.trim().is_empty() {
            return Err(MemberValidationError::EmptyEmail);
        }
        if !self.email.contains('@') {
            return Err(MemberValidationError::InvalidEmail(self.email.clone()));
        }
        Ok(())
    }

    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}

/// Validation errors for members
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemberValidationError {
    #[error("Member name cannot be empty")]
    EmptyName,
    #[error("Email cannot be empty")]
    EmptyEmail,
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
}
