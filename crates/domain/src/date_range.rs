// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::days_between;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;

/// A date period with an optional end.
///
/// When an end is present it is strictly after the start. An absent end means
/// the period is ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start_date: Date,
    end_date: Option<Date>,
}

/// Unchecked wire form, validated through [`DateRange::new`].
#[derive(Deserialize)]
struct RawDateRange {
    start_date: Date,
    end_date: Option<Date>,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DomainError;

    fn try_from(raw: RawDateRange) -> Result<Self, Self::Error> {
        Self::new(raw.start_date, raw.end_date)
    }
}

impl DateRange {
    /// Creates a new `DateRange`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end_date` is not after `start_date`.
    pub fn new(start_date: Date, end_date: Option<Date>) -> Result<Self, DomainError> {
        if let Some(end) = end_date.filter(|end| *end <= start_date) {
            return Err(DomainError::InvalidDateRange {
                start: start_date,
                end,
            });
        }

        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Creates an open-ended range starting on `start_date`.
    #[must_use]
    pub const fn open(start_date: Date) -> Self {
        Self {
            start_date,
            end_date: None,
        }
    }

    #[must_use]
    pub const fn start_date(&self) -> Date {
        self.start_date
    }

    #[must_use]
    pub const fn end_date(&self) -> Option<Date> {
        self.end_date
    }

    /// Returns true if the range has no end.
    #[must_use]
    pub const fn is_open_ended(&self) -> bool {
        self.end_date.is_none()
    }

    /// Returns true if the two ranges share at least one day.
    ///
    /// An open-ended range overlaps everything.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        match (self.end_date, other.end_date) {
            (Some(end), Some(other_end)) => {
                self.start_date <= other_end && other.start_date <= end
            }
            _ => true,
        }
    }

    /// Returns true if `date` falls within the range, bounds inclusive.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start_date && self.end_date.is_none_or(|end| date <= end)
    }

    /// Returns true if `today` falls within the range.
    #[must_use]
    pub fn is_active(&self, today: Date) -> bool {
        self.contains(today)
    }

    /// Returns true if the range ended before `today`.
    #[must_use]
    pub fn is_completed(&self, today: Date) -> bool {
        self.end_date.is_some_and(|end| end < today)
    }

    /// Number of days covered, counting both bounds.
    ///
    /// Open ranges are measured up to `today`. Negative when an open range
    /// starts after `today`.
    #[must_use]
    pub fn duration_in_days(&self, today: Date) -> i64 {
        let end: Date = self.end_date.unwrap_or(today);
        days_between(self.start_date, end) + 1
    }

    /// Returns a copy of this range ending on `end_date`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end_date` is not after the start.
    pub fn with_end(&self, end_date: Date) -> Result<Self, DomainError> {
        Self::new(self.start_date, Some(end_date))
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.end_date {
            Some(end) => write!(f, "{} - {end}", self.start_date),
            None => write!(f, "{} - Ongoing", self.start_date),
        }
    }
}
