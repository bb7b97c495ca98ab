//! Type-safe price representation using decimal arithmetic.
//!
//! Catalog prices are plain non-negative amounts in the portal's display
//! currency (USD). Floating point never touches a price.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative")]
    Negative,
    /// The input is not a decimal number.
    #[error("price must be a decimal number: {0}")]
    Invalid(String),
}

/// A non-negative price.
///
/// ## Examples
///
/// ```
/// use nexus_portal_core::Price;
///
/// let price: Price = "1299.99".parse().unwrap();
/// assert_eq!(price.to_string(), "$1299.99");
///
/// assert!("-1".parse::<Price>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// Create a price from an integer number of cents.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `cents` is below zero.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, 2))
    }

    /// Returns the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::ZERO
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|e| PriceError::Invalid(e.to_string()))?;
        Self::new(amount)
    }
}

/// Formats as dollars with two decimal places (e.g. `$89.00`).
impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0.round_dp(2))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_pads_cents() {
        assert_eq!(Price::from_cents(8900).unwrap().to_string(), "$89.00");
        assert_eq!(Price::from_cents(15950).unwrap().to_string(), "$159.50");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(Price::from_cents(-1), Err(PriceError::Negative));
        assert_eq!("-0.01".parse::<Price>(), Err(PriceError::Negative));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!("abc".parse::<Price>(), Err(PriceError::Invalid(_))));
    }

    #[test]
    fn test_serde_uses_decimal_string() {
        let price: Price = "9.99".parse().unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"9.99\"");

        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);

        assert!(serde_json::from_str::<Price>("\"-5\"").is_err());
    }
}
