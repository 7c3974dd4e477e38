use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of minor units (paise, cents) in one major currency unit.
pub const MINOR_UNITS_PER_MAJOR: u64 = 100;

/// A positive amount expressed in the smallest indivisible currency unit.
///
/// Serializes as a bare integer, which is the shape the order endpoint
/// expects for `amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinorUnits(u64);

impl MinorUnits {
    pub fn new(value: u64) -> Result<Self> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(CheckoutError::Validation(
                "Amount must be positive".to_string(),
            ))
        }
    }

    /// Parses user-entered text holding a whole major-unit amount (e.g.
    /// rupees) and converts it to minor units.
    ///
    /// Only plain digits are accepted: `"10"` becomes `1000`, while signs,
    /// fractions, separators and anything else are rejected.
    pub fn parse_major(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CheckoutError::Validation("Amount is required".to_string()));
        }

        if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CheckoutError::Validation(format!(
                "'{trimmed}' is not a whole number"
            )));
        }

        let major: u64 = trimmed
            .parse()
            .map_err(|_| CheckoutError::Validation("Amount is too large".to_string()))?;

        let minor = major
            .checked_mul(MINOR_UNITS_PER_MAJOR)
            .ok_or_else(|| CheckoutError::Validation("Amount is too large".to_string()))?;

        Self::new(minor)
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// The amount in major units, for display.
    pub fn to_major(&self) -> Decimal {
        Decimal::from(self.0) / Decimal::from(MINOR_UNITS_PER_MAJOR)
    }
}

impl TryFrom<u64> for MinorUnits {
    type Error = CheckoutError;

    fn try_from(value: u64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<MinorUnits> for u64 {
    fn from(amount: MinorUnits) -> Self {
        amount.0
    }
}

impl fmt::Display for MinorUnits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
