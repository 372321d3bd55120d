//! Monetary amount value object.
//!
//! Amounts are positive decimal values with an ISO-4217 currency code.
//! Positivity is enforced at construction, so a held `Amount` never needs
//! re-checking downstream.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// A positive decimal currency amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    value: Decimal,
    currency: String,
}

impl Amount {
    /// Creates an amount, validating that the value is strictly positive.
    ///
    /// # Errors
    ///
    /// - `NotPositive` if value <= 0
    /// - `EmptyField` if the currency code is blank
    pub fn new(value: Decimal, currency: impl Into<String>) -> Result<Self, ValidationError> {
        let currency = currency.into();
        if currency.trim().is_empty() {
            return Err(ValidationError::empty_field("currency"));
        }
        if value <= Decimal::ZERO {
            return Err(ValidationError::not_positive("amount", value));
        }
        Ok(Self {
            value,
            currency: currency.to_ascii_uppercase(),
        })
    }

    /// Parses a plain decimal string (no symbols or separators) into an amount.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat` if the string is not a decimal number
    /// - `NotPositive` if the parsed value is <= 0
    pub fn parse(raw: &str, currency: impl Into<String>) -> Result<Self, ValidationError> {
        let value = Decimal::from_str(raw.trim())
            .map_err(|e| ValidationError::invalid_format("amount", e.to_string()))?;
        Self::new(value, currency)
    }

    /// Returns the decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns the ISO currency code.
    pub fn currency(&self) -> &str {
        &self.currency
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}
