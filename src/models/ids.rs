//! Record identifiers
//!
//! Expenses, categories and members are keyed by random UUIDs wrapped in
//! distinct newtypes. On screen they show as a short tagged form such as
//! `exp-1a2b3c4d`, and commands accept either that form or the full UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $tag:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Tag shown in front of the short form
            pub const TAG: &'static str = $tag;

            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Whether `text` names this ID: a leading run of its UUID,
            /// with or without the tag
            pub fn matches_prefix(&self, text: &str) -> bool {
                let text = text.strip_prefix(Self::TAG).unwrap_or(text);
                !text.is_empty() && self.0.to_string().starts_with(&text.to_ascii_lowercase())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let simple = self.0.simple().to_string();
                write!(f, "{}{}", Self::TAG, &simple[..8])
            }
        }

        /// Parses a full UUID, optionally tagged
        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Uuid::parse_str(s.strip_prefix(Self::TAG).unwrap_or(s)).map(Self)
            }
        }
    };
}

record_id!(
    /// Identifies an expense
    ExpenseId,
    "exp-"
);
record_id!(
    /// Identifies a category
    CategoryId,
    "cat-"
);
record_id!(
    /// Identifies a family member
    MemberId,
    "mem-"
);
