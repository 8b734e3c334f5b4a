//! Storage initialization
//!
//! Handles first-run setup: directories, the starter category list taken
//! from the settings, and empty snapshots for the other stores.

use crate::config::settings::Settings;
use crate::error::ExpenseError;
use crate::models::Category;

use super::Storage;

/// Initialize storage for a fresh installation
///
/// Returns the number of categories seeded (zero if a category file already
/// existed). Every store file exists afterwards.
pub fn initialize_storage(storage: &Storage, settings: &Settings) -> Result<usize, ExpenseError> {
    storage.paths().ensure_directories()?;

    let mut seeded = 0;
    if !storage.paths().categories_file().exists() && storage.categories.count()? == 0 {
        for name in settings
            .default_categories
            .iter()
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
        {
            storage.categories.upsert(Category::new(name))?;
            seeded += 1;
        }
    }

    storage.save_all()?;
    tracing::info!(seeded, "initialized stores");

    Ok(seeded)
}
