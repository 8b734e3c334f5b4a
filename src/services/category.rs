//! Category service
//!
//! Provides business logic for the household category list: CRUD, toggling
//! categories in and out of use, and the configured fallback list.

use crate::config::settings::Settings;
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, CategoryId};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// Partial edit of a category; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

impl<'a> CategoryService<'a> {
    /// Create a new category service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new category
    pub fn create(
        &self,
        name: &str,
        description: Option<&str>,
        color: Option<&str>,
        icon: Option<&str>,
    ) -> ExpenseResult<Category> {
        let name = name.trim();
        self.ensure_unique(name, None)?;

        let mut category = Category::new(name);
        if let Some(description) = description {
            category.description = description.trim().to_string();
        }
        if let Some(color) = color {
            category.color = color.trim().to_string();
        }
        if let Some(icon) = icon {
            category.icon = icon.trim().to_string();
        }

        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    /// Find a category by name or ID string
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Category>> {
        if let Some(category) = self.storage.categories.get_by_name(identifier)? {
            return Ok(Some(category));
        }

        if let Ok(id) = identifier.trim().parse::<CategoryId>() {
            return self.storage.categories.get(id);
        }

        let identifier = identifier.trim();
        let mut matches: Vec<Category> = self
            .storage
            .categories
            .get_all()?
            .into_iter()
            .filter(|c| c.id.matches_prefix(identifier))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(ExpenseError::Validation(format!(
                "ID '{}' is ambiguous ({} categories match)",
                identifier, n
            ))),
        }
    }

    /// List categories sorted by name
    pub fn list(&self, active_only: bool) -> ExpenseResult<Vec<Category>> {
        let mut categories = self.storage.categories.get_all()?;
        if active_only {
            categories.retain(|c| c.is_active);
        }
        Ok(categories)
    }

    /// Active category names, or the configured defaults when none are stored
    pub fn names_or_default(&self, settings: &Settings) -> ExpenseResult<Vec<String>> {
        let names: Vec<String> = self
            .list(true)?
            .into_iter()
            .map(|c| c.name)
            .collect();

        if names.is_empty() {
            tracing::debug!("no stored categories, falling back to configured defaults");
            return Ok(settings.default_categories.clone());
        }
        Ok(names)
    }

    /// Update a category
    pub fn update(&self, id: CategoryId, input: UpdateCategoryInput) -> ExpenseResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))?;

        if let Some(name) = input.name {
            let name = name.trim();
            self.ensure_unique(name, Some(id))?;
            category.name = name.to_string();
        }
        if let Some(description) = input.description {
            category.description = description.trim().to_string();
        }
        if let Some(color) = input.color {
            category.color = color.trim().to_string();
        }
        if let Some(icon) = input.icon {
            category.icon = icon.trim().to_string();
        }

        category
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;
        category.updated_at = chrono::Utc::now();

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(id = %category.id, "category updated");
        Ok(category)
    }

    /// Flip a category between active and inactive
    pub fn toggle(&self, id: CategoryId) -> ExpenseResult<Category> {
        let mut category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))?;

        category.toggle_active();

        self.storage.categories.upsert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(id = %category.id, active = category.is_active, "category toggled");
        Ok(category)
    }

    /// Delete a category. Expenses keep their category name as text.
    pub fn delete(&self, id: CategoryId) -> ExpenseResult<Category> {
        let category = self
            .storage
            .categories
            .get(id)?
            .ok_or_else(|| ExpenseError::category_not_found(id.to_string()))?;

        self.storage.categories.delete(id)?;
        self.storage.categories.save()?;

        tracing::info!(id = %category.id, name = %category.name, "category deleted");
        Ok(category)
    }

    fn ensure_unique(&self, name: &str, except: Option<CategoryId>) -> ExpenseResult<()> {
        if let Some(existing) = self.storage.categories.get_by_name(name)? {
            if Some(existing.id) != except {
                return Err(ExpenseError::Duplicate {
                    entity_type: "Category",
                    identifier: name.to_string(),
                });
            }
        }
        Ok(())
    }
}
