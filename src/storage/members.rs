//! Family member repository for JSON storage

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::{Member, MemberId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct MemberData {
    members: Vec<Member>,
}

/// Repository for member persistence
pub struct MemberRepository {
    path: PathBuf,
    data: RwLock<Vec<Member>>,
}

impl MemberRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: MemberData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;
        *data = file_data.members;
        Ok(())
    }

    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self.data.read().map_err(lock_error)?;
        let file_data = MemberData {
            members: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: MemberId) -> Result<Option<Member>, ExpenseError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.iter().find(|m| m.id == id).cloned())
    }

    /// Get a member by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Member>, ExpenseError> {
        let data = self.data.read().map_err(lock_error)?;
        let name = name.trim();
        Ok(data
            .iter()
            .find(|m| m.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Get all members in the order they were added
    pub fn get_all(&self) -> Result<Vec<Member>, ExpenseError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.clone())
    }

    pub fn upsert(&self, member: Member) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(lock_error)?;
        match data.iter_mut().find(|m| m.id == member.id) {
            Some(existing) => *existing = member,
            None => data.push(member),
        }
        Ok(())
    }

    pub fn delete(&self, id: MemberId) -> Result<bool, ExpenseError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let before = data.len();
        data.retain(|m| m.id != id);
        Ok(data.len() != before)
    }
}
