// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Argument guards shared by the aggregates and value objects.

use crate::error::DomainError;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").ok());

/// Validates that a required text field is not empty or whitespace.
///
/// # Errors
///
/// Returns `DomainError::EmptyField` if the value is blank.
pub fn require_non_empty(value: &str, field: &'static str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::EmptyField { field });
    }
    Ok(())
}

/// Validates that an identifier is not the nil UUID.
///
/// # Errors
///
/// Returns `DomainError::InvalidIdentifier` if `is_nil` is true.
pub const fn require_identifier(is_nil: bool, field: &'static str) -> Result<(), DomainError> {
    if is_nil {
        return Err(DomainError::InvalidIdentifier { field });
    }
    Ok(())
}

/// Validates that a decimal is zero or positive.
///
/// # Errors
///
/// Returns `DomainError::NegativeValue` if the value is negative.
pub fn require_non_negative(value: Decimal, field: &'static str) -> Result<(), DomainError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::NegativeValue { field, value });
    }
    Ok(())
}

/// Validates that a decimal percentage lies within `[0, 100]`.
///
/// # Errors
///
/// Returns `DomainError::InvalidPercentage` if the value is out of range.
pub fn validate_percentage(value: Decimal, field: &'static str) -> Result<(), DomainError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(DomainError::InvalidPercentage { field, value });
    }
    Ok(())
}

/// Validates that an allocation percentage lies within `[1, 100]`.
///
/// # Errors
///
/// Returns `DomainError::InvalidAllocation` if the value is out of range.
pub const fn validate_allocation(value: u8) -> Result<(), DomainError> {
    if value == 0 || value > 100 {
        return Err(DomainError::InvalidAllocation { value });
    }
    Ok(())
}

/// Validates that logged hours lie within `(0, 24]`.
///
/// # Errors
///
/// Returns `DomainError::InvalidHours` if the value is out of range.
pub fn validate_hours(hours: Decimal) -> Result<(), DomainError> {
    if hours <= Decimal::ZERO || hours > Decimal::from(24) {
        return Err(DomainError::InvalidHours { hours });
    }
    Ok(())
}

/// Validates e-mail syntax (`local@domain.tld`, no whitespace).
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let valid: bool = EMAIL_PATTERN
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(email));
    if !valid {
        return Err(DomainError::InvalidEmail(email.to_string()));
    }
    Ok(())
}

/// Normalizes an optional text field: blank strings become `None`.
#[must_use]
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
