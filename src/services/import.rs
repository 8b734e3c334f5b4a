//! CSV import service
//!
//! Reads expenses back from files in the export layout
//! (`Description,Category,Amount,Paid By,Date`). Columns are located by header
//! name so reordered files still import; bad rows are reported and skipped.

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::{Reader, StringRecord};

use crate::error::{ExpenseError, ExpenseResult};
use crate::export::EXPENSE_HEADER;
use crate::models::{Expense, ExpenseDate, Money};
use crate::services::ExpenseService;
use crate::storage::Storage;

/// Positions of the expense columns within a file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub description: usize,
    pub category: usize,
    pub amount: usize,
    pub paid_by: usize,
    pub date: usize,
}

impl ColumnMapping {
    /// Locate every required column in a header record
    pub fn from_headers(headers: &StringRecord) -> ExpenseResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| normalize_header(h) == normalize_header(name))
                .ok_or_else(|| ExpenseError::Import(format!("Missing '{}' column", name)))
        };

        Ok(Self {
            description: find(EXPENSE_HEADER[0])?,
            category: find(EXPENSE_HEADER[1])?,
            amount: find(EXPENSE_HEADER[2])?,
            paid_by: find(EXPENSE_HEADER[3])?,
            date: find(EXPENSE_HEADER[4])?,
        })
    }
}

fn normalize_header(h: &str) -> String {
    h.trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_')
        .collect::<String>()
        .to_lowercase()
}

/// Outcome of an import run
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Number of expenses added
    pub imported: usize,
    /// Rejected rows as (line number in the file, reason)
    pub errors: Vec<(usize, String)>,
}

impl ImportResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Import expenses from a CSV file on disk
    pub fn import_file(&self, path: &Path) -> ExpenseResult<ImportResult> {
        let file = std::fs::File::open(path).map_err(|e| {
            ExpenseError::Import(format!("Cannot open {}: {}", path.display(), e))
        })?;
        self.import_from_reader(file)
    }

    /// Import expenses from any CSV source
    pub fn import_from_reader<R: Read>(&self, source: R) -> ExpenseResult<ImportResult> {
        let mut reader = Reader::from_reader(source);
        let mapping = ColumnMapping::from_headers(reader.headers()?)?;
        let expenses = ExpenseService::new(self.storage);

        let mut result = ImportResult::default();
        for (idx, record) in reader.records().enumerate() {
            // Line 1 is the header
            let line = idx + 2;
            let parsed = record
                .map_err(|e| format!("Error reading CSV record: {}", e))
                .and_then(|record| self.parse_record(&record, &mapping));

            match parsed.and_then(|expense| expenses.insert(expense).map_err(|e| e.to_string())) {
                Ok(_) => result.imported += 1,
                Err(reason) => {
                    tracing::warn!(line, %reason, "skipping import row");
                    result.errors.push((line, reason));
                }
            }
        }

        if result.imported > 0 {
            self.storage.expenses.save()?;
        }
        tracing::info!(
            imported = result.imported,
            rejected = result.errors.len(),
            "CSV import finished"
        );
        Ok(result)
    }

    fn parse_record(&self, record: &StringRecord, mapping: &ColumnMapping) -> Result<Expense, String> {
        let field = |idx: usize, name: &str| {
            record
                .get(idx)
                .map(str::trim)
                .ok_or_else(|| format!("Missing {} value", name))
        };

        let description = field(mapping.description, "description")?;
        let amount = Money::parse(field(mapping.amount, "amount")?).map_err(|e| e.to_string())?;
        let date = parse_date(field(mapping.date, "date")?)?;
        let paid_by = field(mapping.paid_by, "paid by")?;
        let category = self.resolve_category(field(mapping.category, "category")?)?;

        let expense = Expense::new(description, amount, category, date, paid_by);
        expense.validate().map_err(|e| e.to_string())?;
        Ok(expense)
    }

    fn resolve_category(&self, name: &str) -> Result<String, String> {
        let known = self.storage.categories.count().map_err(|e| e.to_string())?;
        if known == 0 || name.is_empty() {
            return Ok(name.to_string());
        }
        match self.storage.categories.get_by_name(name) {
            Ok(Some(category)) => Ok(category.name),
            Ok(None) => Err(format!("Unknown category '{}'", name)),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// Parse an ISO date, falling back to a few common spreadsheet layouts
fn parse_date(s: &str) -> Result<ExpenseDate, String> {
    let parsed = ExpenseDate::parse(s);
    if !parsed.is_malformed() {
        return Ok(parsed);
    }

    for format in ["%m/%d/%Y", "%Y/%m/%d", "%d.%m.%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(s, format) {
            return Ok(date.into());
        }
    }

    Err(format!("Could not parse date: '{}'", s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::export::to_csv;
    use crate::models::Category;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_import_export_layout() {
        let (_temp_dir, storage) = create_test_storage();
        let data = "Description,Category,Amount,Paid By,Date\n\
                    \"Milk, eggs\",Groceries,12.40,Alice,2024-01-03\n\
                    Power,Utilities,80,Bob,01/15/2024\n";

        let result = ImportService::new(&storage)
            .import_from_reader(data.as_bytes())
            .unwrap();
        assert_eq!(result.imported, 2);
        assert!(!result.has_errors());

        let all = storage.expenses.get_all().unwrap();
        assert_eq!(all[0].description, "Milk, eggs");
        assert_eq!(all[0].amount.cents(), 1240);
        assert_eq!(all[1].date.to_string(), "2024-01-15");
    }

    #[test]
    fn test_bad_rows_reported_with_line_numbers() {
        let (_temp_dir, storage) = create_test_storage();
        let data = "Description,Category,Amount,Paid By,Date\n\
                    Milk,Groceries,abc,Alice,2024-01-03\n\
                    Bread,Groceries,3.00,Alice,someday\n\
                    Refund,Groceries,-5.00,Alice,2024-01-04\n\
                    Eggs,Groceries,4.00,Alice,2024-01-05\n";

        let result = ImportService::new(&storage)
            .import_from_reader(data.as_bytes())
            .unwrap();
        assert_eq!(result.imported, 1);
        let lines: Vec<usize> = result.errors.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
        assert!(result.errors[1].1.contains("someday"));
    }

    #[test]
    fn test_reordered_columns_and_missing_column() {
        let (_temp_dir, storage) = create_test_storage();
        let data = "date,paid_by,amount,category,description\n2024-02-01,Bob,9.99,Fun,Cinema\n";
        let result = ImportService::new(&storage)
            .import_from_reader(data.as_bytes())
            .unwrap();
        assert_eq!(result.imported, 1);
        assert_eq!(storage.expenses.get_all().unwrap()[0].paid_by, "Bob");

        let err = ImportService::new(&storage)
            .import_from_reader("Description,Amount\nx,1\n".as_bytes())
            .unwrap_err();
        assert!(matches!(err, ExpenseError::Import(_)));
    }

    #[test]
    fn test_unknown_category_rejected_when_categories_stored() {
        let (_temp_dir, storage) = create_test_storage();
        storage.categories.upsert(Category::new("Groceries")).unwrap();
        let data = "Description,Category,Amount,Paid By,Date\n\
                    Milk,groceries,1.00,Alice,2024-01-03\n\
                    Cinema,Fun,9.00,Bob,2024-01-04\n";

        let result = ImportService::new(&storage)
            .import_from_reader(data.as_bytes())
            .unwrap();
        assert_eq!(result.imported, 1);
        assert_eq!(storage.expenses.get_all().unwrap()[0].category, "Groceries");
        assert!(result.errors[0].1.contains("Unknown category"));
    }

    #[test]
    fn test_reimports_own_export() {
        let (_temp_dir, storage) = create_test_storage();
        let exported = vec![Expense::new(
            "Dinner \"out\"",
            Money::from_cents(4550),
            "Entertainment",
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            "Carol",
        )];
        let text = to_csv(&exported).unwrap();

        let result = ImportService::new(&storage)
            .import_from_reader(text.as_bytes())
            .unwrap();
        assert_eq!(result.imported, 1);
        let back = &storage.expenses.get_all().unwrap()[0];
        assert_eq!(back.description, "Dinner \"out\"");
        assert_eq!(back.amount, exported[0].amount);
    }
}
