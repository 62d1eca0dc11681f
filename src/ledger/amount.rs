// Amount - Non-negative coin amounts with checked arithmetic
// Amounts travel as decimal strings and never wrap on overflow

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from amount parsing and arithmetic
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    #[error("Invalid amount '{0}': expected a non-negative decimal integer")]
    InvalidFormat(String),

    #[error("Amount overflow: {0} + {1}")]
    Overflow(Amount, Amount),

    #[error("Amount underflow: {0} - {1}")]
    Underflow(Amount, Amount),

    #[error("Division by zero")]
    DivisionByZero,
}

/// A non-negative integer amount of coin in its smallest unit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(u128);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Create an amount from smallest units
    pub const fn new(units: u128) -> Self {
        Self(units)
    }

    /// Get the raw number of units
    pub fn units(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a decimal string such as "5000000000000"
    pub fn parse(s: &str) -> Result<Self, AmountError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::InvalidFormat(s.to_string()));
        }
        s.parse::<u128>()
            .map(Self)
            .map_err(|_| AmountError::InvalidFormat(s.to_string()))
    }

    pub fn checked_add(self, other: Amount) -> Result<Amount, AmountError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(AmountError::Overflow(self, other))
    }

    pub fn checked_sub(self, other: Amount) -> Result<Amount, AmountError> {
        self.0
            .checked_sub(other.0)
            .map(Amount)
            .ok_or(AmountError::Underflow(self, other))
    }

    /// Floor division by a plain divisor
    pub fn checked_div(self, divisor: u128) -> Result<Amount, AmountError> {
        self.0
            .checked_div(divisor)
            .map(Amount)
            .ok_or(AmountError::DivisionByZero)
    }

    pub fn checked_rem(self, divisor: u128) -> Result<Amount, AmountError> {
        self.0
            .checked_rem(divisor)
            .map(Amount)
            .ok_or(AmountError::DivisionByZero)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<u64> for Amount {
    fn from(units: u64) -> Self {
        Self(units as u128)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Amount::parse(&s).map_err(serde::de::Error::custom)
    }
}
