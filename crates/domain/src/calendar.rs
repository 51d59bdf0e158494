// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar arithmetic used by the derived metrics.

use crate::error::DomainError;
use time::{Date, Month, Weekday};

/// Whole days from `from` to `to`. Negative when `to` precedes `from`.
#[must_use]
pub fn days_between(from: Date, to: Date) -> i64 {
    (to - from).whole_days()
}

/// Counts Monday-to-Friday days in the inclusive range `[start, end]`.
///
/// Returns 0 when `end` precedes `start`.
#[must_use]
pub fn working_days_between(start: Date, end: Date) -> u32 {
    let mut days: u32 = 0;
    let mut current: Date = start;

    while current <= end {
        if !matches!(current.weekday(), Weekday::Saturday | Weekday::Sunday) {
            days += 1;
        }
        match current.next_day() {
            Some(next) => current = next,
            None => break,
        }
    }

    days
}

/// Returns the first day of the month containing `date`.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the date cannot be built.
pub fn first_day_of_month(date: Date) -> Result<Date, DomainError> {
    Date::from_calendar_date(date.year(), date.month(), 1).map_err(|e| {
        DomainError::DateArithmeticOverflow {
            operation: format!("computing the first day of {}: {e}", date.month()),
        }
    })
}

/// Returns the last day of the month containing `date`.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the date cannot be built.
pub fn last_day_of_month(date: Date) -> Result<Date, DomainError> {
    let (year, month): (i32, Month) = if date.month() == Month::December {
        (date.year() + 1, Month::January)
    } else {
        (date.year(), date.month().next())
    };

    Date::from_calendar_date(year, month, 1)
        .ok()
        .and_then(Date::previous_day)
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: format!("computing the last day of {}", date.month()),
        })
}
