// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::require_non_negative;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A non-negative amount in a single currency.
///
/// Arithmetic produces new values and requires both operands to share a
/// currency. Currency codes are stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawMoney")]
pub struct Money {
    amount: Decimal,
    currency: String,
}

#[derive(Deserialize)]
struct RawMoney {
    amount: Decimal,
    currency: String,
}

impl TryFrom<RawMoney> for Money {
    type Error = DomainError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        Self::new(raw.amount, &raw.currency)
    }
}

impl Money {
    /// Creates a new `Money` value.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `amount` is negative
    /// - `currency` is not three ASCII letters
    pub fn new(amount: Decimal, currency: &str) -> Result<Self, DomainError> {
        require_non_negative(amount, "amount")?;
        let currency: String = normalize_currency(currency)?;
        Ok(Self { amount, currency })
    }

    /// A zero amount in `currency`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCurrency` if `currency` is malformed.
    pub fn zero(currency: &str) -> Result<Self, DomainError> {
        Self::new(Decimal::ZERO, currency)
    }

    /// An amount in US dollars.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NegativeValue` if `amount` is negative.
    pub fn usd(amount: Decimal) -> Result<Self, DomainError> {
        Self::new(amount, "USD")
    }

    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Adds two amounts.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The currencies differ
    /// - The sum exceeds the decimal range
    pub fn add(&self, other: &Self) -> Result<Self, DomainError> {
        self.ensure_same_currency(other)?;
        let amount: Decimal = self
            .amount
            .checked_add(other.amount)
            .ok_or(DomainError::ArithmeticOverflow {
                operation: "adding amounts",
            })?;
        Ok(Self {
            amount,
            currency: self.currency.clone(),
        })
    }

    /// Subtracts `other` from this amount.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The currencies differ
    /// - The result would be negative
    pub fn subtract(&self, other: &Self) -> Result<Self, DomainError> {
        self.ensure_same_currency(other)?;
        if other.amount > self.amount {
            return Err(DomainError::InsufficientAmount {
                available: self.amount,
                requested: other.amount,
            });
        }
        Ok(Self {
            amount: self.amount - other.amount,
            currency: self.currency.clone(),
        })
    }

    /// Scales this amount by a non-negative factor.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `factor` is negative
    /// - The product exceeds the decimal range
    pub fn multiply(&self, factor: Decimal) -> Result<Self, DomainError> {
        require_non_negative(factor, "factor")?;
        let amount: Decimal = self
            .amount
            .checked_mul(factor)
            .ok_or(DomainError::ArithmeticOverflow {
                operation: "multiplying an amount",
            })?;
        Ok(Self {
            amount,
            currency: self.currency.clone(),
        })
    }

    fn ensure_same_currency(&self, other: &Self) -> Result<(), DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }
        Ok(())
    }
}

impl Default for Money {
    fn default() -> Self {
        Self {
            amount: Decimal::ZERO,
            currency: String::from("USD"),
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} {}", self.amount, self.currency)
    }
}

fn normalize_currency(currency: &str) -> Result<String, DomainError> {
    let trimmed: &str = currency.trim();
    if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::InvalidCurrency(currency.to_string()));
    }
    Ok(trimmed.to_ascii_uppercase())
}

/// Sums `amounts`, reporting `operation` if the total leaves the decimal range.
///
/// # Errors
///
/// Returns `DomainError::ArithmeticOverflow` if the running total overflows.
pub fn checked_total<I>(amounts: I, operation: &'static str) -> Result<Decimal, DomainError>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts.into_iter().try_fold(Decimal::ZERO, |total, amount| {
        total
            .checked_add(amount)
            .ok_or(DomainError::ArithmeticOverflow { operation })
    })
}
