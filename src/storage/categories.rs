//! Category repository for JSON storage

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::ExpenseError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<Vec<Category>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load categories from disk
    pub fn load(&self) -> Result<(), ExpenseError> {
        let file_data: CategoryData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;
        *data = file_data.categories;
        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), ExpenseError> {
        let data = self.data.read().map_err(lock_error)?;
        let file_data = CategoryData {
            categories: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: CategoryId) -> Result<Option<Category>, ExpenseError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.iter().find(|c| c.id == id).cloned())
    }

    /// Get a category by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, ExpenseError> {
        let data = self.data.read().map_err(lock_error)?;
        let name = name.trim();
        Ok(data
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    /// Get all categories sorted by name
    pub fn get_all(&self) -> Result<Vec<Category>, ExpenseError> {
        let data = self.data.read().map_err(lock_error)?;
        let mut categories = data.clone();
        categories.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        Ok(categories)
    }

    pub fn upsert(&self, category: Category) -> Result<(), ExpenseError> {
        let mut data = self.data.write().map_err(lock_error)?;
        match data.iter_mut().find(|c| c.id == category.id) {
            Some(existing) => *existing = category,
            None => data.push(category),
        }
        Ok(())
    }

    pub fn delete(&self, id: CategoryId) -> Result<bool, ExpenseError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let before = data.len();
        data.retain(|c| c.id != id);
        Ok(data.len() != before)
    }

    pub fn count(&self) -> Result<usize, ExpenseError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
