// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::date_range::DateRange;
use crate::error::DomainError;
use crate::types::{AssignmentId, EmployeeId, ProjectId};
use crate::validation::{
    require_identifier, require_non_empty, require_non_negative, validate_allocation,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Standard working hours per day used by cost estimates.
pub const HOURS_PER_DAY: i64 = 8;

/// An employee staffed on a project for a period at a given allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectAssignment {
    id: AssignmentId,
    project_id: ProjectId,
    employee_id: EmployeeId,
    role: String,
    allocation_percentage: u8,
    period: DateRange,
    hourly_rate: Decimal,
    created_at: OffsetDateTime,
}

impl ProjectAssignment {
    /// Creates a new assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either identifier is nil
    /// - `role` is empty
    /// - `allocation_percentage` is outside `[1, 100]`
    /// - `hourly_rate` is negative
    pub fn new(
        project_id: ProjectId,
        employee_id: EmployeeId,
        role: &str,
        allocation_percentage: u8,
        period: DateRange,
        hourly_rate: Decimal,
    ) -> Result<Self, DomainError> {
        require_identifier(project_id.is_nil(), "project_id")?;
        require_identifier(employee_id.is_nil(), "employee_id")?;
        require_non_empty(role, "role")?;
        validate_allocation(allocation_percentage)?;
        require_non_negative(hourly_rate, "hourly_rate")?;

        Ok(Self {
            id: AssignmentId::new(),
            project_id,
            employee_id,
            role: role.trim().to_string(),
            allocation_percentage,
            period,
            hourly_rate,
            created_at: OffsetDateTime::now_utc(),
        })
    }

    #[must_use]
    pub const fn id(&self) -> AssignmentId {
        self.id
    }

    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    #[must_use]
    pub const fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    #[must_use]
    pub const fn allocation_percentage(&self) -> u8 {
        self.allocation_percentage
    }

    #[must_use]
    pub const fn period(&self) -> &DateRange {
        &self.period
    }

    #[must_use]
    pub const fn hourly_rate(&self) -> Decimal {
        self.hourly_rate
    }

    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Returns true if the assignment period contains `date`.
    #[must_use]
    pub fn is_active_on(&self, date: Date) -> bool {
        self.period.contains(date)
    }

    /// Estimated cost over the whole assignment period.
    ///
    /// Working days are approximated as five sevenths of the calendar
    /// duration, truncated, and hours are truncated after applying the
    /// allocation. Open-ended periods are measured up to `today`. Assignments
    /// without a positive rate cost nothing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ArithmeticOverflow` if the cost exceeds the
    /// decimal range.
    pub fn estimated_cost(&self, today: Date) -> Result<Decimal, DomainError> {
        if self.hourly_rate <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        let duration: i64 = self.period.duration_in_days(today).max(0);
        let working_days: i64 = duration * 5 / 7;
        let hours: i64 = working_days * HOURS_PER_DAY * i64::from(self.allocation_percentage) / 100;

        Decimal::from(hours)
            .checked_mul(self.hourly_rate)
            .ok_or(DomainError::ArithmeticOverflow {
                operation: "estimating assignment cost",
            })
    }

    /// Changes the allocation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAllocation` if the value is outside `[1, 100]`.
    pub fn update_allocation(&mut self, allocation_percentage: u8) -> Result<(), DomainError> {
        validate_allocation(allocation_percentage)?;
        self.allocation_percentage = allocation_percentage;
        Ok(())
    }

    /// Changes the hourly rate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NegativeValue` if the rate is negative.
    pub fn update_rate(&mut self, hourly_rate: Decimal) -> Result<(), DomainError> {
        require_non_negative(hourly_rate, "hourly_rate")?;
        self.hourly_rate = hourly_rate;
        Ok(())
    }

    /// Ends the assignment on `date`.
    ///
    /// When `date` is not after the start, the assignment ends the day after
    /// it started so the period stays valid.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` if the start is the last
    /// representable date.
    pub fn end_on(&mut self, date: Date) -> Result<(), DomainError> {
        let start: Date = self.period.start_date();
        let end: Date = if date > start {
            date
        } else {
            start
                .next_day()
                .ok_or_else(|| DomainError::DateArithmeticOverflow {
                    operation: String::from("ending an assignment"),
                })?
        };
        self.period = self.period.with_end(end)?;
        Ok(())
    }
}
