//! Expense service
//!
//! Business logic for recording, editing and listing household expenses.

use chrono::NaiveDate;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Expense, ExpenseDate, ExpenseId, Money};
use crate::storage::Storage;

/// Service for expense management
pub struct ExpenseService<'a> {
    storage: &'a Storage,
}

/// Options for filtering expenses
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    /// Whole category name, ignoring ASCII case
    pub category: Option<String>,
    /// Whole payer name, ignoring ASCII case
    pub paid_by: Option<String>,
    /// Inclusive start date
    pub start_date: Option<NaiveDate>,
    /// Inclusive end date
    pub end_date: Option<NaiveDate>,
}

impl ExpenseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn paid_by(mut self, paid_by: impl Into<String>) -> Self {
        self.paid_by = Some(paid_by.into());
        self
    }

    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    fn has_date_bounds(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Check whether an expense passes every set criterion
    pub fn matches(&self, expense: &Expense) -> bool {
        if let Some(category) = &self.category {
            if !expense.category.trim().eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }
        if let Some(paid_by) = &self.paid_by {
            if !expense.paid_by.trim().eq_ignore_ascii_case(paid_by.trim()) {
                return false;
            }
        }
        if self.has_date_bounds() {
            // Unparseable dates cannot satisfy a date filter
            let Some(date) = expense.date.as_date() else {
                return false;
            };
            if self.start_date.is_some_and(|start| date < start) {
                return false;
            }
            if self.end_date.is_some_and(|end| date > end) {
                return false;
            }
        }
        true
    }
}

/// Input for creating a new expense
#[derive(Debug, Clone)]
pub struct CreateExpenseInput {
    pub description: String,
    pub amount: Money,
    pub category: String,
    pub date: ExpenseDate,
    pub paid_by: String,
}

/// Partial edit of an existing expense; `None` leaves a field unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateExpenseInput {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub date: Option<ExpenseDate>,
    pub paid_by: Option<String>,
}

impl<'a> ExpenseService<'a> {
    /// Create a new expense service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new expense
    pub fn create(&self, input: CreateExpenseInput) -> ExpenseResult<Expense> {
        let category = self.resolve_category(&input.category)?;
        let expense = Expense::new(
            input.description.trim(),
            input.amount,
            category,
            input.date,
            input.paid_by.trim(),
        );

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        tracing::info!(id = %expense.id, amount = %expense.amount, "expense created");
        Ok(expense)
    }

    /// Add an already-built expense, as the importer does
    pub fn insert(&self, expense: Expense) -> ExpenseResult<Expense> {
        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;
        self.storage.expenses.upsert(expense.clone())?;
        Ok(expense)
    }

    /// Get an expense by ID
    pub fn get(&self, id: ExpenseId) -> ExpenseResult<Option<Expense>> {
        self.storage.expenses.get(id)
    }

    /// Find an expense by full ID or by the short `exp-xxxxxxxx` form
    pub fn find(&self, identifier: &str) -> ExpenseResult<Option<Expense>> {
        let identifier = identifier.trim();
        if let Ok(id) = identifier.parse::<ExpenseId>() {
            return self.storage.expenses.get(id);
        }

        let mut matches: Vec<Expense> = self
            .storage
            .expenses
            .get_all()?
            .into_iter()
            .filter(|e| e.id.matches_prefix(identifier))
            .collect();

        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(ExpenseError::Validation(format!(
                "ID '{}' is ambiguous ({} expenses match)",
                identifier, n
            ))),
        }
    }

    /// List expenses in insertion order, filtered
    pub fn list(&self, filter: &ExpenseFilter) -> ExpenseResult<Vec<Expense>> {
        let mut expenses = self.storage.expenses.get_all()?;
        expenses.retain(|e| filter.matches(e));
        Ok(expenses)
    }

    /// All stored expenses, valid or not
    pub fn all(&self) -> ExpenseResult<Vec<Expense>> {
        self.storage.expenses.get_all()
    }

    /// Apply a partial edit
    pub fn update(&self, id: ExpenseId, input: UpdateExpenseInput) -> ExpenseResult<Expense> {
        let mut expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        if let Some(description) = input.description {
            expense.description = description.trim().to_string();
        }
        if let Some(amount) = input.amount {
            expense.amount = amount;
        }
        if let Some(category) = input.category {
            expense.category = self.resolve_category(&category)?;
        }
        if let Some(date) = input.date {
            expense.date = date;
        }
        if let Some(paid_by) = input.paid_by {
            expense.paid_by = paid_by.trim().to_string();
        }

        expense
            .validate()
            .map_err(|e| ExpenseError::Validation(e.to_string()))?;
        expense.touch();

        self.storage.expenses.upsert(expense.clone())?;
        self.storage.expenses.save()?;

        tracing::info!(id = %expense.id, "expense updated");
        Ok(expense)
    }

    /// Delete an expense
    pub fn delete(&self, id: ExpenseId) -> ExpenseResult<Expense> {
        let expense = self
            .storage
            .expenses
            .get(id)?
            .ok_or_else(|| ExpenseError::expense_not_found(id.to_string()))?;

        self.storage.expenses.delete(id)?;
        self.storage.expenses.save()?;

        tracing::info!(id = %expense.id, "expense deleted");
        Ok(expense)
    }

    /// Canonicalise a category name against the stored list.
    ///
    /// With no stored categories any non-empty name is accepted as typed.
    fn resolve_category(&self, name: &str) -> ExpenseResult<String> {
        let name = name.trim();
        if name.is_empty() || self.storage.categories.count()? == 0 {
            return Ok(name.to_string());
        }
        match self.storage.categories.get_by_name(name)? {
            Some(category) => Ok(category.name),
            None => Err(ExpenseError::category_not_found(name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::Category;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(description: &str, cents: i64, category: &str, on: NaiveDate, who: &str) -> CreateExpenseInput {
        CreateExpenseInput {
            description: description.into(),
            amount: Money::from_cents(cents),
            category: category.into(),
            date: on.into(),
            paid_by: who.into(),
        }
    }

    #[test]
    fn test_create_and_get() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let expense = service
            .create(input("  Milk ", 499, "Groceries", date(2024, 1, 2), "Alice"))
            .unwrap();
        assert_eq!(expense.description, "Milk");

        let fetched = service.get(expense.id).unwrap().unwrap();
        assert_eq!(fetched.amount.cents(), 499);
        assert!(storage.paths().expenses_file().exists());
    }

    #[test]
    fn test_create_rejects_invalid() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);

        let err = service
            .create(input("Refund", 0, "Groceries", date(2024, 1, 2), "Alice"))
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .create(input("Milk", 100, "Groceries", date(2024, 1, 2), " "))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(storage.expenses.count().unwrap(), 0);
    }

    #[test]
    fn test_category_canonicalised_when_stored() {
        let (_temp_dir, storage) = create_test_storage();
        storage.categories.upsert(Category::new("Groceries")).unwrap();
        let service = ExpenseService::new(&storage);

        let expense = service
            .create(input("Milk", 100, "groceries", date(2024, 1, 2), "Alice"))
            .unwrap();
        assert_eq!(expense.category, "Groceries");

        let err = service
            .create(input("Cinema", 100, "Fun", date(2024, 1, 2), "Alice"))
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service
            .create(input("Milk", 100, "Groceries", date(2024, 1, 2), "Alice"))
            .unwrap();

        let short = expense.id.to_string();
        assert_eq!(service.find(&short).unwrap().unwrap().id, expense.id);
        assert_eq!(
            service.find(&expense.id.as_uuid().to_string()).unwrap().unwrap().id,
            expense.id
        );
        assert!(service.find("exp-zzzzzzzz").unwrap().is_none());
    }

    #[test]
    fn test_list_filters() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        service
            .create(input("Milk", 100, "Groceries", date(2024, 1, 2), "Alice"))
            .unwrap();
        service
            .create(input("Power", 5000, "Utilities", date(2024, 2, 1), "Bob"))
            .unwrap();
        storage
            .expenses
            .upsert(Expense::new("Odd", Money::from_cents(10), "Groceries", ExpenseDate::parse("soon"), "Bob"))
            .unwrap();

        assert_eq!(service.list(&ExpenseFilter::new()).unwrap().len(), 3);
        assert_eq!(
            service.list(&ExpenseFilter::new().category("groceries")).unwrap().len(),
            2
        );
        assert_eq!(service.list(&ExpenseFilter::new().paid_by("Bob")).unwrap().len(), 2);

        let january = ExpenseFilter::new().date_range(date(2024, 1, 1), date(2024, 1, 31));
        let listed = service.list(&january).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].description, "Milk");
    }

    #[test]
    fn test_name_filters_match_whole_name_ignoring_case() {
        let milk = Expense::new("Milk", Money::from_cents(100), "Groceries", date(2024, 1, 2), "Alice");

        assert!(ExpenseFilter::new().category("GROCERIES").matches(&milk));
        assert!(ExpenseFilter::new().category(" groceries ").matches(&milk));
        assert!(!ExpenseFilter::new().category("Groc").matches(&milk));
        assert!(ExpenseFilter::new().paid_by("alice").matches(&milk));
        assert!(!ExpenseFilter::new().paid_by("Ali").matches(&milk));
    }

    #[test]
    fn test_update_and_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = ExpenseService::new(&storage);
        let expense = service
            .create(input("Milk", 100, "Groceries", date(2024, 1, 2), "Alice"))
            .unwrap();

        let updated = service
            .update(
                expense.id,
                UpdateExpenseInput {
                    amount: Some(Money::from_cents(250)),
                    paid_by: Some("Bob".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.amount.cents(), 250);
        assert_eq!(updated.paid_by, "Bob");
        assert_eq!(updated.description, "Milk");

        let err = service
            .update(
                expense.id,
                UpdateExpenseInput {
                    description: Some("".into()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());

        service.delete(expense.id).unwrap();
        assert!(service.get(expense.id).unwrap().is_none());
        assert!(service.delete(expense.id).unwrap_err().is_not_found());
    }
}
