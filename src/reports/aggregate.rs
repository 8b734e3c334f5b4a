//! Expense aggregation
//!
//! Pure functions turning a slice of expenses into totals, per-category and
//! per-person breakdowns, optionally restricted to one calendar month. Every
//! total shown by the dashboard and the monthly report comes from here.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{Expense, Money, YearMonth};

/// Summed amount for one category or one payer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTotal {
    /// Category name or payer name
    pub key: String,
    /// Sum of amounts in the group
    pub total: Money,
    /// Number of expenses in the group
    pub count: usize,
}

impl GroupTotal {
    /// Share of `whole` in percent; `None` when `whole` is zero
    pub fn percentage(&self, whole: Money) -> Option<f64> {
        self.total.percentage_of(whole)
    }
}

/// Result of aggregating a set of expenses
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult {
    /// Sum of amounts over the valid expenses in the window
    pub total: Money,
    /// Number of valid expenses in the window
    pub count: usize,
    /// Invalid expenses in the window, left out of every sum
    pub skipped: usize,
    /// Totals per category, largest first, ties by name
    pub by_category: Vec<GroupTotal>,
    /// Totals per payer, largest first, ties by name
    pub by_person: Vec<GroupTotal>,
}

impl AggregationResult {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Percentage of the total for a category, `None` if absent or total is zero
    pub fn category_percentage(&self, category: &str) -> Option<f64> {
        self.by_category
            .iter()
            .find(|g| g.key == category)
            .and_then(|g| g.percentage(self.total))
    }

    /// Percentage of the total for a payer, `None` if absent or total is zero
    pub fn person_percentage(&self, paid_by: &str) -> Option<f64> {
        self.by_person
            .iter()
            .find(|g| g.key == paid_by)
            .and_then(|g| g.percentage(self.total))
    }
}

/// Whether an expense falls inside the window
///
/// With no window every expense passes. Expenses whose date did not parse
/// never pass a window.
pub fn in_window(expense: &Expense, window: Option<YearMonth>) -> bool {
    match window {
        None => true,
        Some(ym) => expense.date.as_date().is_some_and(|d| ym.contains(d)),
    }
}

/// Aggregate expenses, optionally restricted to one calendar month
///
/// Invalid expenses inside the window are counted in `skipped` and contribute
/// nothing else. Never fails: an empty selection yields a zeroed result and
/// totals beyond the `i64` cent range clamp at its maximum.
pub fn aggregate(records: &[Expense], window: Option<YearMonth>) -> AggregationResult {
    let mut total = Money::zero();
    let mut count = 0;
    let mut skipped = 0;
    let mut by_category: BTreeMap<&str, (Money, usize)> = BTreeMap::new();
    let mut by_person: BTreeMap<&str, (Money, usize)> = BTreeMap::new();

    for expense in records.iter().filter(|e| in_window(e, window)) {
        if let Err(reason) = expense.validate() {
            tracing::debug!(id = %expense.id, %reason, "skipping invalid expense");
            skipped += 1;
            continue;
        }

        total += expense.amount;
        count += 1;

        let entry = by_category
            .entry(expense.category.as_str())
            .or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;

        let entry = by_person
            .entry(expense.paid_by.as_str())
            .or_insert((Money::zero(), 0));
        entry.0 += expense.amount;
        entry.1 += 1;
    }

    if skipped > 0 {
        tracing::warn!(skipped, "invalid expenses left out of aggregation");
    }

    AggregationResult {
        total,
        count,
        skipped,
        by_category: into_ranked(by_category),
        by_person: into_ranked(by_person),
    }
}

/// Turn a name-ordered map into groups ranked by total, largest first
fn into_ranked(groups: BTreeMap<&str, (Money, usize)>) -> Vec<GroupTotal> {
    let mut ranked: Vec<GroupTotal> = groups
        .into_iter()
        .map(|(key, (total, count))| GroupTotal {
            key: key.to_string(),
            total,
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.key.cmp(&b.key)));
    ranked
}

/// The `limit` most recent expenses
///
/// Ordered by date descending; expenses on the same date are ordered by
/// creation time descending, then by position in `records` descending.
/// Expenses with a malformed date sort after all dated ones.
pub fn top_recent(records: &[Expense], limit: usize) -> Vec<Expense> {
    if limit == 0 {
        return Vec::new();
    }

    let mut indexed: Vec<(usize, &Expense)> = records.iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| recency(a, b).then_with(|| ib.cmp(ia)));

    indexed
        .into_iter()
        .take(limit)
        .map(|(_, e)| e.clone())
        .collect()
}

/// Most recent first; `None` dates and creation stamps sort last
fn recency(a: &Expense, b: &Expense) -> Ordering {
    b.date
        .as_date()
        .cmp(&a.date.as_date())
        .then_with(|| b.created_at.cmp(&a.created_at))
}
