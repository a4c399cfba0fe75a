//! # Money Value Object
//!
//! Currency-tagged decimal amounts for customs values and carrier charges.
//!
//! # Examples
//!
//! ```
//! use carrier_client::domain::value_objects::money::Money;
//! use rust_decimal::Decimal;
//!
//! let a = Money::new("usd", Decimal::new(45000, 2)).unwrap();
//! let b = Money::new("USD", Decimal::new(45000, 2)).unwrap();
//! let total = a.checked_add(&b).unwrap();
//!
//! assert_eq!(total.currency(), "USD");
//! assert_eq!(total.amount(), Decimal::new(90000, 2));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A currency code and a decimal amount.
///
/// # Invariants
///
/// - Currency codes are stored upper-cased
/// - Amounts are non-negative, including deserialized ones
///
/// A zero amount with a currency is a real value; absence is modeled as
/// `Option<Money>` by the containing type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "RawMoney")]
pub struct Money {
    currency: String,
    amount: Decimal,
}

/// Wire shape of [`Money`] before validation.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawMoney {
    currency: String,
    amount: Decimal,
}

impl TryFrom<RawMoney> for Money {
    type Error = DomainError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        Money::new(raw.currency, raw.amount)
    }
}

impl Money {
    /// Creates a non-negative amount in the given currency.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` if `amount` is negative.
    pub fn new(currency: impl Into<String>, amount: Decimal) -> DomainResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::invalid_amount(format!(
                "amount must be non-negative, got {}",
                amount
            )));
        }
        Ok(Self {
            currency: currency.into().to_uppercase(),
            amount,
        })
    }

    /// Creates a zero amount in the given currency.
    #[must_use]
    pub fn zero(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into().to_uppercase(),
            amount: Decimal::ZERO,
        }
    }

    /// Returns the currency code.
    #[inline]
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Returns the amount.
    #[inline]
    #[must_use]
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns true if the amount is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Adds two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::CurrencyMismatch` if the currencies differ, or
    /// `DomainError::Overflow` if the sum overflows.
    pub fn checked_add(&self, other: &Money) -> DomainResult<Money> {
        if self.currency != other.currency {
            return Err(DomainError::currency_mismatch(
                self.currency.clone(),
                other.currency.clone(),
            ));
        }
        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(DomainError::Overflow("money sum"))?;
        Ok(Self {
            currency: self.currency.clone(),
            amount,
        })
    }

    /// Multiplies the amount by a quantity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Overflow` if the product overflows.
    pub fn checked_mul(&self, factor: Decimal) -> DomainResult<Money> {
        let amount = self
            .amount
            .checked_mul(factor)
            .ok_or(DomainError::Overflow("money product"))?;
        Ok(Self {
            currency: self.currency.clone(),
            amount,
        })
    }

    /// Returns true if this amount is in `currency` and at or above `threshold`.
    #[must_use]
    pub fn reaches(&self, currency: &str, threshold: Decimal) -> bool {
        self.currency.eq_ignore_ascii_case(currency) && self.amount >= threshold
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_currency() {
        let money = Money::new("usd", Decimal::ONE).unwrap();
        assert_eq!(money.currency(), "USD");
    }

    #[test]
    fn new_rejects_negative() {
        let result = Money::new("USD", Decimal::new(-1, 0));
        assert!(matches!(result, Err(DomainError::InvalidAmount(_))));
    }

    #[test]
    fn zero_is_a_value() {
        let zero = Money::zero("CAD");
        assert!(zero.is_zero());
        assert_eq!(zero.currency(), "CAD");
    }

    #[test]
    fn add_rejects_mixed_currencies() {
        let usd = Money::new("USD", Decimal::ONE).unwrap();
        let cad = Money::new("CAD", Decimal::ONE).unwrap();
        assert!(matches!(
            usd.checked_add(&cad),
            Err(DomainError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn reaches_threshold_inclusive() {
        let money = Money::new("USD", Decimal::new(800, 0)).unwrap();
        assert!(money.reaches("USD", Decimal::new(800, 0)));
        assert!(!money.reaches("CAD", Decimal::new(800, 0)));
        assert!(!money.reaches("USD", Decimal::new(801, 0)));
    }

    #[test]
    fn deserializes_string_amounts() {
        let money: Money =
            serde_json::from_str(r#"{"Currency":"USD","Amount":"12.50"}"#).unwrap();
        assert_eq!(money.amount(), Decimal::new(1250, 2));
    }

    #[test]
    fn deserialize_normalizes_currency() {
        let money: Money = serde_json::from_str(r#"{"Currency":"cad","Amount":"3"}"#).unwrap();
        assert_eq!(money, Money::new("CAD", Decimal::new(3, 0)).unwrap());
    }

    #[test]
    fn deserialize_rejects_negative() {
        let result = serde_json::from_str::<Money>(r#"{"Currency":"USD","Amount":"-0.01"}"#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("non-negative"), "{message}");
    }

    #[test]
    fn display() {
        let money = Money::new("USD", Decimal::new(900, 0)).unwrap();
        assert_eq!(money.to_string(), "900 USD");
    }
}
