//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog reports prices as bare JSON numbers in US dollars
//! (`"price": 109.95`). `Price` keeps them as exact decimals so that cart
//! totals never pick up binary floating point error.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cart::Quantity;

/// A price in the store currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an integer amount of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Round to two decimal places (banker's rounding, as `rust_decimal` does).
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self(self.0.round_dp(2))
    }

    /// Format for display with exactly two decimals (e.g., "$19.98").
    #[must_use]
    pub fn display(&self) -> String {
        format!("${:.2}", self.0.round_dp(2))
    }
}

/// Displays the amount as the catalog reports it (e.g., "$109.95", "$7.5").
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0.normalize())
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul<Quantity> for Price {
    type Output = Self;

    fn mul(self, rhs: Quantity) -> Self::Output {
        Self(self.0 * Decimal::from(rhs.get()))
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
    fn test_display_two_decimals() {
        assert_eq!(Price::from_cents(1998).display(), "$19.98");
        assert_eq!(Price::from_cents(750).display(), "$7.50");
        assert_eq!(Price::ZERO.display(), "$0.00");
    }

    #[test]
    fn test_display_catalog_style() {
        assert_eq!(Price::from_cents(10995).to_string(), "$109.95");
        assert_eq!(Price::from_cents(750).to_string(), "$7.5");
        assert_eq!(Price::from_cents(6400).to_string(), "$64");
    }

    #[test]
    fn test_multiply_by_quantity() {
        let price = Price::from_cents(999);
        let total = price * Quantity::new(3).unwrap();
        assert_eq!(total, Price::from_cents(2997));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_cents(999), Price::from_cents(1)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(1000));

        let empty: Price = core::iter::empty().sum();
        assert_eq!(empty, Price::ZERO);
    }

    #[test]
    fn test_deserialize_from_json_number() {
        let price: Price = serde_json::from_str("109.95").unwrap();
        assert_eq!(price, Price::from_cents(10995));

        let price: Price = serde_json::from_str("22.3").unwrap();
        assert_eq!(price, Price::from_cents(2230));
    }

    #[test]
    fn test_deserialize_from_string() {
        let price: Price = serde_json::from_str("\"9.99\"").unwrap();
        assert_eq!(price, Price::from_cents(999));
    }
}
