//! Currency amounts in whole cents
//!
//! Expense sums are exact: amounts are integers of the smallest currency unit
//! and only percentages ever touch floating point.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// A monetary amount stored as cents
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// ```
    /// use family_expenses::models::Money;
    /// assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn cents(&self) -> i64 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Split into `parts` equal shares rounded half away from zero.
    /// Zero parts give zero.
    pub fn div_round(&self, parts: usize) -> Self {
        if parts == 0 {
            return Self::zero();
        }
        let parts = parts as i64;
        let (quotient, remainder) = (self.0 / parts, self.0 % parts);
        if remainder.abs() * 2 >= parts {
            Self(quotient + self.0.signum())
        } else {
            Self(quotient)
        }
    }

    /// This amount as a percentage of `whole`, `None` when `whole` is zero
    pub fn percentage_of(&self, whole: Money) -> Option<f64> {
        (!whole.is_zero()).then(|| self.0 as f64 * 100.0 / whole.0 as f64)
    }

    /// Parse user or file input such as "12.5", "$1,250.00" or "-3".
    ///
    /// At most two decimals are accepted; "1.005" is an error rather than a
    /// silently rounded amount.
    pub fn parse(s: &str) -> Result<Self, MoneyParseError> {
        let invalid = || MoneyParseError::InvalidFormat(s.trim().to_string());

        let text = s.trim();
        let (negative, text) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let text = text.strip_prefix('$').unwrap_or(text).replace(',', "");

        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if fraction.len() > 2 {
            return Err(MoneyParseError::TooPrecise(s.trim().to_string()));
        }

        let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().map_err(|_| invalid())? };
        let fraction: i64 = match fraction.len() {
            0 => 0,
            1 => fraction.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => fraction.parse().map_err(|_| invalid())?,
        };

        let cents = whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(fraction))
            .ok_or_else(invalid)?;
        Ok(Self(if negative { -cents } else { cents }))
    }

    /// Plain decimal form without a currency symbol ("10.50", "-3.05")
    pub fn to_decimal_string(&self) -> String {
        self.format_with_symbol("")
    }

    /// "$10.50", "-$3.05"
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        format!("{}{}{}.{:02}", sign, symbol, abs / 100, abs % 100)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol("$"))
    }
}

/// Addition saturates: a running total clamps at the `i64` cent bounds
/// instead of overflowing.
impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyParseError {
    #[error("Invalid money format: {0}")]
    InvalidFormat(String),
    #[error("Amount has more than two decimals: {0}")]
    TooPrecise(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatting() {
        assert_eq!(Money::from_cents(1050).to_string(), "$10.50");
        assert_eq!(Money::zero().to_string(), "$0.00");
        assert_eq!(Money::from_cents(-305).to_string(), "-$3.05");
        assert_eq!(Money::from_cents(1050).format_with_symbol("€"), "€10.50");
        assert_eq!(Money::from_cents(-305).to_decimal_string(), "-3.05");
        assert_eq!(Money::from_cents(7).to_decimal_string(), "0.07");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("10.50").unwrap().cents(), 1050);
        assert_eq!(Money::parse(" $1,250.5 ").unwrap().cents(), 125050);
        assert_eq!(Money::parse("-3").unwrap().cents(), -300);
        assert_eq!(Money::parse(".75").unwrap().cents(), 75);
        assert_eq!(Money::parse("80.").unwrap().cents(), 8000);
        assert!(Money::parse("ten").is_err());
        assert!(Money::parse(".").is_err());
        assert!(Money::parse("").is_err());
        assert!(Money::parse("1.2.3").is_err());
        assert_eq!(
            Money::parse("1.005"),
            Err(MoneyParseError::TooPrecise("1.005".into()))
        );
    }

    #[test]
    fn test_decimal_string_parses_back() {
        for cents in [0, 1, 99, 100, 1050, 123456, -42] {
            let m = Money::from_cents(cents);
            assert_eq!(Money::parse(&m.to_decimal_string()).unwrap(), m);
        }
    }

    #[test]
    fn test_cent_sums_are_exact() {
        // 0.1 + 0.2 style inputs that drift in binary floating point
        let total: Money = ["0.10", "0.20", "0.30"]
            .iter()
            .map(|s| Money::parse(s).unwrap())
            .sum();
        assert_eq!(total, Money::from_cents(60));
        assert_eq!(total.to_decimal_string(), "0.60");
    }

    #[test]
    fn test_sums_clamp_instead_of_overflowing() {
        let half = Money::from_cents(i64::MAX / 2 + 1);
        assert_eq!(half + half, Money::from_cents(i64::MAX));

        let mut low = Money::from_cents(i64::MIN);
        low += Money::from_cents(-1);
        assert_eq!(low, Money::from_cents(i64::MIN));
    }

    #[test]
    fn test_div_round() {
        assert_eq!(Money::from_cents(1000).div_round(3).cents(), 333);
        assert_eq!(Money::from_cents(2000).div_round(3).cents(), 667);
        assert_eq!(Money::from_cents(5).div_round(2).cents(), 3);
        assert_eq!(Money::from_cents(-5).div_round(2).cents(), -3);
        assert_eq!(Money::from_cents(1000).div_round(0), Money::zero());
    }

    #[test]
    fn test_percentage_of() {
        let part = Money::from_cents(250);
        assert_eq!(part.percentage_of(Money::from_cents(1000)), Some(25.0));
        assert_eq!(part.percentage_of(Money::zero()), None);
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(1050)).unwrap();
        assert_eq!(json, "1050");
        assert_eq!(serde_json::from_str::<Money>("1050").unwrap(), Money::from_cents(1050));
    }
}
