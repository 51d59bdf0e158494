// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{EmployeeId, ProjectId, TenantId, TimeEntryId};
use crate::validation::{
    normalize_optional, require_identifier, require_non_negative, validate_hours,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Hours an employee logged against a project on one day.
///
/// Approval is a single flag: once approved, hours, description and
/// billability are frozen until the approval is withdrawn with
/// [`TimeEntry::reject`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    id: TimeEntryId,
    tenant_id: TenantId,
    employee_id: EmployeeId,
    project_id: ProjectId,
    date: Date,
    hours: Decimal,
    task_description: Option<String>,
    billable: bool,
    approved: bool,
    approved_by: Option<EmployeeId>,
    approved_at: Option<OffsetDateTime>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TimeEntry {
    /// Creates an unapproved entry.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either identifier is nil
    /// - `hours` is outside `(0, 24]`
    /// - `date` is after `today`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tenant_id: TenantId,
        employee_id: EmployeeId,
        project_id: ProjectId,
        date: Date,
        hours: Decimal,
        task_description: Option<String>,
        billable: bool,
        today: Date,
    ) -> Result<Self, DomainError> {
        require_identifier(employee_id.is_nil(), "employee_id")?;
        require_identifier(project_id.is_nil(), "project_id")?;
        validate_hours(hours)?;
        if date > today {
            return Err(DomainError::FutureDate { date });
        }

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        Ok(Self {
            id: TimeEntryId::new(),
            tenant_id,
            employee_id,
            project_id,
            date,
            hours,
            task_description: normalize_optional(task_description),
            billable,
            approved: false,
            approved_by: None,
            approved_at: None,
            created_at: now,
            updated_at: now,
        })
    }

    #[must_use]
    pub const fn id(&self) -> TimeEntryId {
        self.id
    }

    #[must_use]
    pub const fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    #[must_use]
    pub const fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    #[must_use]
    pub const fn date(&self) -> Date {
        self.date
    }

    #[must_use]
    pub const fn hours(&self) -> Decimal {
        self.hours
    }

    #[must_use]
    pub fn task_description(&self) -> Option<&str> {
        self.task_description.as_deref()
    }

    #[must_use]
    pub const fn is_billable(&self) -> bool {
        self.billable
    }

    #[must_use]
    pub const fn is_approved(&self) -> bool {
        self.approved
    }

    #[must_use]
    pub const fn approved_by(&self) -> Option<EmployeeId> {
        self.approved_by
    }

    #[must_use]
    pub const fn approved_at(&self) -> Option<OffsetDateTime> {
        self.approved_at
    }

    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    /// # Errors
    ///
    /// Returns an error if the entry is approved or `hours` is outside `(0, 24]`.
    pub fn update_hours(&mut self, hours: Decimal) -> Result<(), DomainError> {
        self.ensure_not_approved("update the hours of")?;
        validate_hours(hours)?;
        self.hours = hours;
        self.touch();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DomainError::TimeEntryLocked` if the entry is approved.
    pub fn update_description(&mut self, description: Option<String>) -> Result<(), DomainError> {
        self.ensure_not_approved("update the description of")?;
        self.task_description = normalize_optional(description);
        self.touch();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `DomainError::TimeEntryLocked` if the entry is approved.
    pub fn set_billable(&mut self, billable: bool) -> Result<(), DomainError> {
        self.ensure_not_approved("change the billability of")?;
        self.billable = billable;
        self.touch();
        Ok(())
    }

    /// Approves the entry, stamping approver and time.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is already approved or `approved_by` is nil.
    pub fn approve(&mut self, approved_by: EmployeeId) -> Result<(), DomainError> {
        if self.approved {
            return Err(DomainError::TimeEntryAlreadyApproved);
        }
        require_identifier(approved_by.is_nil(), "approved_by")?;

        self.approved = true;
        self.approved_by = Some(approved_by);
        self.approved_at = Some(OffsetDateTime::now_utc());
        self.touch();
        Ok(())
    }

    /// Withdraws an approval, clearing approver and time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TimeEntryNotApproved` if the entry is not approved.
    pub fn reject(&mut self) -> Result<(), DomainError> {
        if !self.approved {
            return Err(DomainError::TimeEntryNotApproved);
        }

        self.approved = false;
        self.approved_by = None;
        self.approved_at = None;
        self.touch();
        Ok(())
    }

    /// Cost of the logged hours at `hourly_rate`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NegativeValue` if the rate is negative.
    pub fn calculate_cost(&self, hourly_rate: Decimal) -> Result<Decimal, DomainError> {
        require_non_negative(hourly_rate, "hourly_rate")?;
        Ok(self.hours * hourly_rate)
    }

    /// Returns true if the entry is unapproved and `user_id` logged it or
    /// last approved it.
    #[must_use]
    pub fn is_editable_by(&self, user_id: EmployeeId) -> bool {
        !self.approved && (self.employee_id == user_id || self.approved_by == Some(user_id))
    }

    const fn ensure_not_approved(&self, operation: &'static str) -> Result<(), DomainError> {
        if self.approved {
            return Err(DomainError::TimeEntryLocked { operation });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc();
    }
}
