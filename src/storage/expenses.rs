//! Expense repository for JSON storage
//!
//! Manages loading and saving expenses to expenses.json. Records keep the
//! order in which they were added, which is the creation order used to break
//! date ties in recent-expense listings.

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::{Expense, ExpenseId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

/// Serializable expense data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct ExpenseData {
    expenses: Vec<Expense>,
}

/// Repository for expense persistence
pub struct ExpenseRepository {
    path: PathBuf,
    data: RwLock<Vec<Expense>>,
}

impl ExpenseRepository {
    /// Create a new expense repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load expenses from disk
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: ExpenseData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;
        tracing::debug!(count = file_data.expenses.len(), "loaded expenses");
        *data = file_data.expenses;
        Ok(())
    }

    /// Save expenses to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self.data.read().map_err(lock_error)?;
        let file_data = ExpenseData {
            expenses: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> Result<Option<Expense>, ExpenseError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.iter().find(|e| e.id == id).cloned())
    }

    /// Get all expenses in insertion order
    pub fn get_all(&self) -> Result<Vec<Expense>, ExpenseError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.clone())
    }

    /// Insert a new expense at the end, or replace an existing one in place
    pub fn upsert(&self, expense: Expense) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(lock_error)?;
        match data.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => *existing = expense,
            None => data.push(expense),
        }
        Ok(())
    }

    /// Delete an expense, returning whether it existed
    pub fn delete(&self, id: ExpenseId) -> Result<bool, ExpenseError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let before = data.len();
        data.retain(|e| e.id != id);
        Ok(data.len() != before)
    }

    /// Count expenses
    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::reports::aggregate;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, ExpenseRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("expenses.json");
        let repo = ExpenseRepository::new(path);
        (temp_dir, repo)
    }

    fn expense(description: &str, cents: i64) -> Expense {
        Expense::new(
            description,
            Money::from_cents(cents),
            "Groceries",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            "Alice",
        )
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_upsert_keeps_insertion_order() {
        let (_temp_dir, repo) = create_test_repo();
        let first = expense("first", 100);
        let second = expense("second", 200);
        repo.upsert(first.clone()).unwrap();
        repo.upsert(second.clone()).unwrap();

        let mut edited = first.clone();
        edited.amount = Money::from_cents(150);
        repo.upsert(edited).unwrap();

        let all = repo.get_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[0].amount.cents(), 150);
        assert_eq!(all[1].id, second.id);
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let e = expense("Weekly shop", 5000);
        let id = e.id;
        repo.upsert(e).unwrap();
        repo.save().unwrap();

        let repo2 = ExpenseRepository::new(temp_dir.path().join("expenses.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.count().unwrap(), 1);
        assert_eq!(repo2.get(id).unwrap().unwrap().amount.cents(), 5000);
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, repo) = create_test_repo();
        let e = expense("Weekly shop", 5000);
        let id = e.id;
        repo.upsert(e).unwrap();

        assert!(repo.delete(id).unwrap());
        assert!(!repo.delete(id).unwrap());
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_incomplete_record_loads_and_is_skipped() {
        let (temp_dir, repo) = create_test_repo();
        let json = r#"{
            "expenses": [
                {
                    "id": "550e8400-e29b-41d4-a716-446655440000",
                    "description": "Weekly shop",
                    "amount": 4250,
                    "category": "Groceries",
                    "date": "2024-01-05",
                    "paidBy": "Alice"
                },
                {
                    "id": "660e8400-e29b-41d4-a716-446655440000",
                    "description": "Bus pass",
                    "category": "Transportation",
                    "date": "2024-01-06",
                    "paidBy": "Bob"
                },
                {
                    "id": "770e8400-e29b-41d4-a716-446655440000",
                    "description": "Cinema",
                    "amount": 1200,
                    "category": "Entertainment",
                    "paidBy": "Bob"
                }
            ]
        }"#;
        std::fs::write(temp_dir.path().join("expenses.json"), json).unwrap();

        repo.load().unwrap();
        let records = repo.get_all().unwrap();
        assert_eq!(records.len(), 3);

        let all_time = aggregate(&records, None);
        assert_eq!(all_time.count, 1);
        assert_eq!(all_time.skipped, 2);
        assert_eq!(all_time.total, Money::from_cents(4250));
    }
}
