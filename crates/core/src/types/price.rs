//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog services usually send prices as JSON numbers (`139.9`), while the
//! persisted cart snapshot stores them as decimal strings (`"139.9"`). `Price`
//! accepts both on input and always writes the string form, so a snapshot read
//! back from storage compares equal to what was written.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a price from text.
#[derive(Debug, Error)]
pub enum PriceError {
    #[error("Invalid price '{0}': {1}")]
    Invalid(String, String),
}

/// A unit or line price in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an integer number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.display())
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('$');
        Decimal::from_str(trimmed)
            .map(Self)
            .map_err(|e| PriceError::Invalid(s.to_string(), e.to_string()))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_price_display_rounds_to_cents() {
        assert_eq!(Price::from_cents(13990).display(), "$139.90");
        assert_eq!("179.9".parse::<Price>().unwrap().to_string(), "$179.90");
    }

    #[test]
    fn test_price_accepts_json_number_and_string() {
        let from_number: Price = serde_json::from_str("139.9").unwrap();
        let from_string: Price = serde_json::from_str("\"139.9\"").unwrap();
        assert_eq!(from_number, from_string);
    }

    #[test]
    fn test_price_serialized_form_reads_back_equal() {
        let price: Price = serde_json::from_str("139.9").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(price, back);
    }

    #[test]
    fn test_price_times_and_sum() {
        let unit = Price::from_cents(1050);
        assert_eq!(unit.times(3), Price::from_cents(3150));

        let total: Price = [Price::from_cents(100), Price::from_cents(250)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(350));
    }

    #[test]
    fn test_price_from_str_invalid() {
        let err = "abc".parse::<Price>().unwrap_err();
        assert!(matches!(err, PriceError::Invalid(_, _)));
    }
}
