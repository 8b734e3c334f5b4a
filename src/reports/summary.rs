//! Headline figures for a report: total, number of expenses, average

use serde::{Deserialize, Serialize};

use crate::models::Money;

use super::aggregate::AggregationResult;

/// Total, count and average per expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: Money,
    pub count: usize,
    /// `total / count` to the nearest cent, zero when there are no expenses
    pub average: Money,
}

/// Summarise an aggregation result
pub fn summary_line(result: &AggregationResult) -> Summary {
    Summary {
        total: result.total,
        count: result.count,
        average: result.total.div_round(result.count),
    }
}

impl From<&AggregationResult> for Summary {
    fn from(result: &AggregationResult) -> Self {
        summary_line(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average() {
        let result = AggregationResult {
            total: Money::from_cents(3000),
            count: 2,
            ..Default::default()
        };
        let summary = summary_line(&result);
        assert_eq!(summary.total, Money::from_cents(3000));
        assert_eq!(summary.count, 2);
        assert_eq!(summary.average, Money::from_cents(1500));
    }

    #[test]
    fn test_average_rounds_to_cent() {
        let result = AggregationResult {
            total: Money::from_cents(1000),
            count: 3,
            ..Default::default()
        };
        assert_eq!(Summary::from(&result).average, Money::from_cents(333));
    }

    #[test]
    fn test_empty_average_is_zero() {
        let summary = summary_line(&AggregationResult::default());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, Money::zero());
    }
}
