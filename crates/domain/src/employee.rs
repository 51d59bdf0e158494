// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::days_between;
use crate::date_range::DateRange;
use crate::employee_skill::EmployeeSkill;
use crate::error::DomainError;
use crate::project_assignment::ProjectAssignment;
use crate::types::{AssignmentId, DepartmentId, EmployeeId, EmployeeStatus, SkillLevel, TenantId};
use crate::validation::{
    normalize_optional, require_identifier, require_non_empty, require_non_negative,
    validate_email,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Full allocation of one employee, in percent.
pub const FULL_ALLOCATION: u32 = 100;

/// A staff member and their skills and project assignments.
///
/// Assignments held here mirror the ones owned by each [`crate::Project`];
/// the loading layer attaches them with [`Employee::attach_assignment`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    id: EmployeeId,
    tenant_id: TenantId,
    name: String,
    email: String,
    hire_date: Date,
    status: EmployeeStatus,
    department_id: Option<DepartmentId>,
    manager_id: Option<EmployeeId>,
    position: Option<String>,
    salary: Option<Decimal>,
    leave_balance: u32,
    skills: Vec<EmployeeSkill>,
    assignments: Vec<ProjectAssignment>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Employee {
    /// Creates an active employee with no leave balance.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is empty or `email` is malformed.
    pub fn new(
        tenant_id: TenantId,
        name: &str,
        email: &str,
        hire_date: Date,
    ) -> Result<Self, DomainError> {
        require_non_empty(name, "name")?;
        let email: &str = email.trim();
        validate_email(email)?;

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        Ok(Self {
            id: EmployeeId::new(),
            tenant_id,
            name: name.trim().to_string(),
            email: email.to_string(),
            hire_date,
            status: EmployeeStatus::Active,
            department_id: None,
            manager_id: None,
            position: None,
            salary: None,
            leave_balance: 0,
            skills: Vec::new(),
            assignments: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    #[must_use]
    pub const fn id(&self) -> EmployeeId {
        self.id
    }

    #[must_use]
    pub const fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    #[must_use]
    pub const fn hire_date(&self) -> Date {
        self.hire_date
    }

    #[must_use]
    pub const fn status(&self) -> EmployeeStatus {
        self.status
    }

    #[must_use]
    pub const fn department_id(&self) -> Option<DepartmentId> {
        self.department_id
    }

    #[must_use]
    pub const fn manager_id(&self) -> Option<EmployeeId> {
        self.manager_id
    }

    #[must_use]
    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    #[must_use]
    pub const fn salary(&self) -> Option<Decimal> {
        self.salary
    }

    #[must_use]
    pub const fn leave_balance(&self) -> u32 {
        self.leave_balance
    }

    #[must_use]
    pub fn skills(&self) -> &[EmployeeSkill] {
        &self.skills
    }

    #[must_use]
    pub fn assignments(&self) -> &[ProjectAssignment] {
        &self.assignments
    }

    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, EmployeeStatus::Active)
    }

    /// # Errors
    ///
    /// Returns an error if the employee is terminated, `name` is empty, or
    /// `email` is malformed.
    pub fn update_personal_info(&mut self, name: &str, email: &str) -> Result<(), DomainError> {
        self.ensure_not_terminated("update personal information")?;
        require_non_empty(name, "name")?;
        let email: &str = email.trim();
        validate_email(email)?;

        self.name = name.trim().to_string();
        self.email = email.to_string();
        self.touch();
        Ok(())
    }

    /// Replaces the position. The salary changes only when one is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee is terminated or `salary` is negative.
    pub fn update_position(
        &mut self,
        position: Option<String>,
        salary: Option<Decimal>,
    ) -> Result<(), DomainError> {
        self.ensure_not_terminated("update the position")?;
        if let Some(salary) = salary {
            require_non_negative(salary, "salary")?;
            self.salary = Some(salary);
        }
        self.position = normalize_optional(position);
        self.touch();
        Ok(())
    }

    /// Places the employee in a department under an optional manager.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The employee is terminated
    /// - `department_id` is nil
    /// - `manager_id` is the employee's own id
    pub fn assign_to_department(
        &mut self,
        department_id: DepartmentId,
        manager_id: Option<EmployeeId>,
    ) -> Result<(), DomainError> {
        self.ensure_not_terminated("assign a department")?;
        require_identifier(department_id.is_nil(), "department_id")?;
        if manager_id == Some(self.id) {
            return Err(DomainError::SelfManagement);
        }

        self.department_id = Some(department_id);
        self.manager_id = manager_id;
        self.touch();
        Ok(())
    }

    /// Adds a skill, or updates the existing one with the same technology.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee is terminated or `technology` is empty.
    pub fn add_or_update_skill(
        &mut self,
        technology: &str,
        level: SkillLevel,
        years_experience: u32,
        certification: Option<&str>,
        today: Date,
    ) -> Result<(), DomainError> {
        require_non_empty(technology, "technology")?;
        self.ensure_not_terminated("update skills")?;

        let certification: Option<&str> = certification.filter(|c| !c.trim().is_empty());

        if let Some(skill) = self.skills.iter_mut().find(|s| s.matches(technology)) {
            skill.update_skill(level, years_experience, today);
            if let Some(certification) = certification {
                skill.add_certification(certification)?;
            }
        } else {
            let mut skill: EmployeeSkill =
                EmployeeSkill::new(self.id, technology, level, years_experience, today)?;
            if let Some(certification) = certification {
                skill.add_certification(certification)?;
            }
            self.skills.push(skill);
        }

        self.touch();
        Ok(())
    }

    /// Removes the skill for `technology`, if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee is terminated or `technology` is empty.
    pub fn remove_skill(&mut self, technology: &str) -> Result<(), DomainError> {
        require_non_empty(technology, "technology")?;
        self.ensure_not_terminated("update skills")?;

        if let Some(index) = self.skills.iter().position(|s| s.matches(technology)) {
            self.skills.remove(index);
            self.touch();
        }
        Ok(())
    }

    /// Returns true if the employee has `technology` at `min_level` or above.
    #[must_use]
    pub fn has_skill(&self, technology: &str, min_level: Option<SkillLevel>) -> bool {
        self.skills
            .iter()
            .find(|s| s.matches(technology))
            .is_some_and(|s| min_level.is_none_or(|min| s.level() >= min))
    }

    /// Technologies held at Advanced or Expert level.
    #[must_use]
    pub fn primary_skills(&self) -> Vec<&str> {
        self.skills
            .iter()
            .filter(|s| s.level() >= SkillLevel::Advanced)
            .map(EmployeeSkill::technology)
            .collect()
    }

    /// Moves the employee to `new_status` and returns the assignments the
    /// move ended.
    ///
    /// Terminating ends every assignment active on `today`. The owning
    /// projects hold their own copies of those assignments, so callers
    /// persisting the employee must end them there too.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the lifecycle forbids it.
    pub fn change_status(
        &mut self,
        new_status: EmployeeStatus,
        today: Date,
    ) -> Result<Vec<AssignmentId>, DomainError> {
        self.status.validate_transition(new_status)?;

        let ended: Vec<AssignmentId> = match (self.status, new_status) {
            (_, EmployeeStatus::Terminated) => self.on_terminated(today)?,
            (EmployeeStatus::Inactive, EmployeeStatus::Active) => {
                self.on_reactivated();
                Vec::new()
            }
            _ => Vec::new(),
        };

        self.status = new_status;
        self.touch();
        Ok(ended)
    }

    fn on_terminated(&mut self, today: Date) -> Result<Vec<AssignmentId>, DomainError> {
        let mut ended: Vec<AssignmentId> = Vec::new();
        for assignment in self
            .assignments
            .iter_mut()
            .filter(|a| a.is_active_on(today))
        {
            assignment.end_on(today)?;
            ended.push(assignment.id());
        }
        Ok(ended)
    }

    // Reactivation restores nothing yet; assignments and leave carry over.
    #[allow(clippy::unused_self)]
    const fn on_reactivated(&mut self) {}

    /// # Errors
    ///
    /// Returns `DomainError::EmployeeTerminated` if the employee is terminated.
    pub fn update_leave_balance(&mut self, balance: u32) -> Result<(), DomainError> {
        self.ensure_not_terminated("update the leave balance")?;
        self.leave_balance = balance;
        self.touch();
        Ok(())
    }

    /// Deducts `days` from the leave balance.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `days` is zero
    /// - The employee is not active
    /// - The balance is smaller than `days`
    pub fn use_leave(&mut self, days: u32) -> Result<(), DomainError> {
        if days == 0 {
            return Err(DomainError::InvalidLeaveDays);
        }
        if !self.is_active() {
            return Err(DomainError::EmployeeNotActive {
                operation: "use leave",
            });
        }
        if self.leave_balance < days {
            return Err(DomainError::InsufficientLeave {
                requested: days,
                available: self.leave_balance,
            });
        }

        self.leave_balance -= days;
        self.touch();
        Ok(())
    }

    /// Grants `days` of leave.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidLeaveDays` if `days` is zero.
    pub fn add_leave(&mut self, days: u32) -> Result<(), DomainError> {
        if days == 0 {
            return Err(DomainError::InvalidLeaveDays);
        }
        self.leave_balance = self.leave_balance.saturating_add(days);
        self.touch();
        Ok(())
    }

    /// Records an assignment held on some project.
    ///
    /// Replaces a previously attached assignment with the same id.
    pub fn attach_assignment(&mut self, assignment: ProjectAssignment) {
        match self
            .assignments
            .iter_mut()
            .find(|a| a.id() == assignment.id())
        {
            Some(existing) => *existing = assignment,
            None => self.assignments.push(assignment),
        }
    }

    /// Sum of allocations of assignments overlapping `period`.
    #[must_use]
    pub fn allocation_during(&self, period: &DateRange) -> u32 {
        self.assignments
            .iter()
            .filter(|a| a.period().overlaps(period))
            .map(|a| u32::from(a.allocation_percentage()))
            .sum()
    }

    /// Returns true if the employee is active and less than fully allocated
    /// during `period`.
    #[must_use]
    pub fn is_available_for_project(&self, period: &DateRange) -> bool {
        self.is_active() && self.allocation_during(period) < FULL_ALLOCATION
    }

    /// Allocation still free during `period`. Zero unless active.
    #[must_use]
    pub fn available_allocation(&self, period: &DateRange) -> u32 {
        if !self.is_active() {
            return 0;
        }
        FULL_ALLOCATION.saturating_sub(self.allocation_during(period))
    }

    #[must_use]
    pub fn active_assignments(&self, today: Date) -> Vec<&ProjectAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.is_active_on(today))
            .collect()
    }

    /// Sum of allocations of assignments active on `today`.
    #[must_use]
    pub fn current_total_allocation(&self, today: Date) -> u32 {
        self.active_assignments(today)
            .iter()
            .map(|a| u32::from(a.allocation_percentage()))
            .sum()
    }

    #[must_use]
    pub fn is_overallocated(&self, today: Date) -> bool {
        self.current_total_allocation(today) > FULL_ALLOCATION
    }

    #[must_use]
    pub fn is_assignable(&self, today: Date) -> bool {
        self.is_active() && !self.is_overallocated(today)
    }

    /// Completed 365-day years since the hire date.
    ///
    /// Service of a terminated employee is measured to the termination date.
    #[must_use]
    pub fn years_of_service(&self, today: Date) -> i64 {
        let end: Date = if matches!(self.status, EmployeeStatus::Terminated) {
            self.updated_at.date()
        } else {
            today
        };
        (days_between(self.hire_date, end) / 365).max(0)
    }

    const fn ensure_not_terminated(&self, operation: &'static str) -> Result<(), DomainError> {
        if matches!(self.status, EmployeeStatus::Terminated) {
            return Err(DomainError::EmployeeTerminated { operation });
        }
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc();
    }
}
