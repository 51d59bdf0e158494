// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::date_range::DateRange;
use crate::error::DomainError;
use crate::events::{DomainEvent, EmployeeAssignedToProject, EventMetadata, ProjectCreated};
use crate::money::{Money, checked_total};
use crate::project_assignment::ProjectAssignment;
use crate::project_code::ProjectCode;
use crate::project_milestone::ProjectMilestone;
use crate::types::{
    AssignmentId, ClientId, EmployeeId, MilestoneId, ProjectId, ProjectStatus, ProjectType,
    RiskLevel, TenantId,
};
use crate::validation::{
    normalize_optional, require_identifier, require_non_empty, validate_percentage,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// A client engagement: the consistency boundary for its assignments,
/// milestones and technologies.
///
/// The code is unique per tenant; uniqueness is checked through the project
/// repository before construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    tenant_id: TenantId,
    code: ProjectCode,
    name: String,
    description: Option<String>,
    client_id: ClientId,
    manager_id: EmployeeId,
    status: ProjectStatus,
    project_type: ProjectType,
    risk_level: RiskLevel,
    period: DateRange,
    budget: Money,
    profit_margin: Decimal,
    technologies: Vec<String>,
    assignments: Vec<ProjectAssignment>,
    milestones: Vec<ProjectMilestone>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Project {
    /// Creates a project in Planning and returns it with its creation event.
    ///
    /// A missing budget defaults to zero USD.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `name` is empty
    /// - `client_id` or `manager_id` is nil
    pub fn new(
        tenant_id: TenantId,
        code: ProjectCode,
        name: &str,
        client_id: ClientId,
        manager_id: EmployeeId,
        period: DateRange,
        budget: Option<Money>,
    ) -> Result<(Self, DomainEvent), DomainError> {
        require_non_empty(name, "name")?;
        require_identifier(client_id.is_nil(), "client_id")?;
        require_identifier(manager_id.is_nil(), "manager_id")?;

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let project: Self = Self {
            id: ProjectId::new(),
            tenant_id,
            code,
            name: name.trim().to_string(),
            description: None,
            client_id,
            manager_id,
            status: ProjectStatus::Planning,
            project_type: ProjectType::TimeAndMaterial,
            risk_level: RiskLevel::Medium,
            period,
            budget: budget.unwrap_or_default(),
            profit_margin: Decimal::ZERO,
            technologies: Vec::new(),
            assignments: Vec::new(),
            milestones: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        let event: DomainEvent = DomainEvent::ProjectCreated(ProjectCreated {
            metadata: EventMetadata::new(),
            tenant_id: project.tenant_id.clone(),
            project_id: project.id,
            code: project.code.clone(),
            name: project.name.clone(),
            client_id,
        });

        Ok((project, event))
    }

    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    #[must_use]
    pub const fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    #[must_use]
    pub const fn code(&self) -> &ProjectCode {
        &self.code
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub const fn client_id(&self) -> ClientId {
        self.client_id
    }

    #[must_use]
    pub const fn manager_id(&self) -> EmployeeId {
        self.manager_id
    }

    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    #[must_use]
    pub const fn project_type(&self) -> ProjectType {
        self.project_type
    }

    #[must_use]
    pub const fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    #[must_use]
    pub const fn period(&self) -> &DateRange {
        &self.period
    }

    #[must_use]
    pub const fn budget(&self) -> &Money {
        &self.budget
    }

    #[must_use]
    pub const fn profit_margin(&self) -> Decimal {
        self.profit_margin
    }

    #[must_use]
    pub fn technologies(&self) -> &[String] {
        &self.technologies
    }

    #[must_use]
    pub fn assignments(&self) -> &[ProjectAssignment] {
        &self.assignments
    }

    #[must_use]
    pub fn milestones(&self) -> &[ProjectMilestone] {
        &self.milestones
    }

    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    /// Renames the project and replaces its description.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyField` if `name` is empty.
    pub fn update_basic_info(
        &mut self,
        name: &str,
        description: Option<String>,
    ) -> Result<(), DomainError> {
        require_non_empty(name, "name")?;
        self.name = name.trim().to_string();
        self.description = normalize_optional(description);
        self.touch();
        Ok(())
    }

    /// Replaces the budget and the target profit margin.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPercentage` if the margin is outside `[0, 100]`.
    pub fn update_budget(&mut self, budget: Money, profit_margin: Decimal) -> Result<(), DomainError> {
        validate_percentage(profit_margin, "profit_margin")?;
        self.budget = budget;
        self.profit_margin = profit_margin;
        self.touch();
        Ok(())
    }

    pub fn update_classification(&mut self, project_type: ProjectType, risk_level: RiskLevel) {
        self.project_type = project_type;
        self.risk_level = risk_level;
        self.touch();
    }

    /// Moves the project to `new_status`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the lifecycle forbids it.
    pub fn change_status(&mut self, new_status: ProjectStatus) -> Result<(), DomainError> {
        self.status.validate_transition(new_status)?;
        self.status = new_status;
        self.touch();
        Ok(())
    }

    /// Staffs an employee on the project and returns the raised event.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The assignment arguments are invalid
    /// - The employee already has an assignment on this project whose period
    ///   overlaps `period`, whatever its allocation
    pub fn assign_employee(
        &mut self,
        employee_id: EmployeeId,
        role: &str,
        allocation_percentage: u8,
        period: DateRange,
        hourly_rate: Decimal,
    ) -> Result<DomainEvent, DomainError> {
        let assignment: ProjectAssignment = ProjectAssignment::new(
            self.id,
            employee_id,
            role,
            allocation_percentage,
            period,
            hourly_rate,
        )?;

        let overlapping: bool = self
            .assignments
            .iter()
            .any(|a| a.employee_id() == employee_id && a.period().overlaps(&period));
        if overlapping {
            return Err(DomainError::OverlappingAssignment { employee_id });
        }

        let event: DomainEvent = DomainEvent::EmployeeAssignedToProject(EmployeeAssignedToProject {
            metadata: EventMetadata::new(),
            tenant_id: self.tenant_id.clone(),
            project_id: self.id,
            employee_id,
            assignment_id: assignment.id(),
            role: assignment.role().to_string(),
            allocation_percentage,
        });

        self.assignments.push(assignment);
        self.touch();
        Ok(event)
    }

    /// Changes the allocation of one assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment does not exist or the value is invalid.
    pub fn update_assignment_allocation(
        &mut self,
        assignment_id: AssignmentId,
        allocation_percentage: u8,
    ) -> Result<(), DomainError> {
        self.assignment_mut(assignment_id)?
            .update_allocation(allocation_percentage)?;
        self.touch();
        Ok(())
    }

    /// Changes the hourly rate of one assignment.
    ///
    /// # Errors
    ///
    /// Returns an error if the assignment does not exist or the rate is negative.
    pub fn update_assignment_rate(
        &mut self,
        assignment_id: AssignmentId,
        hourly_rate: Decimal,
    ) -> Result<(), DomainError> {
        self.assignment_mut(assignment_id)?.update_rate(hourly_rate)?;
        self.touch();
        Ok(())
    }

    /// Ends one assignment on `date`, or the day after it starts if `date`
    /// is not later than its start.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AssignmentNotFound` if the assignment does not exist.
    pub fn end_assignment(
        &mut self,
        assignment_id: AssignmentId,
        date: Date,
    ) -> Result<(), DomainError> {
        self.assignment_mut(assignment_id)?.end_on(date)?;
        self.touch();
        Ok(())
    }

    /// Adds a milestone due within the project period and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `name` is empty or `payment_percentage` is outside `[0, 100]`
    /// - `due_date` is before the project start
    /// - `due_date` is after the project end
    pub fn add_milestone(
        &mut self,
        name: &str,
        due_date: Date,
        description: Option<String>,
        payment_percentage: Decimal,
    ) -> Result<MilestoneId, DomainError> {
        if due_date < self.period.start_date() {
            return Err(DomainError::MilestoneOutsideProjectPeriod {
                due_date,
                reason: "before project start",
            });
        }
        if self.period.end_date().is_some_and(|end| due_date > end) {
            return Err(DomainError::MilestoneOutsideProjectPeriod {
                due_date,
                reason: "after project end",
            });
        }

        let milestone: ProjectMilestone =
            ProjectMilestone::new(self.id, name, due_date, description, payment_percentage)?;
        let id: MilestoneId = milestone.id();
        self.milestones.push(milestone);
        self.touch();
        Ok(id)
    }

    /// # Errors
    ///
    /// Returns an error if the milestone does not exist, is completed or is already started.
    pub fn start_milestone(&mut self, milestone_id: MilestoneId) -> Result<(), DomainError> {
        self.milestone_mut(milestone_id)?.start_progress()?;
        self.touch();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the milestone does not exist or is already completed.
    pub fn complete_milestone(
        &mut self,
        milestone_id: MilestoneId,
        deliverables: Option<String>,
    ) -> Result<(), DomainError> {
        self.milestone_mut(milestone_id)?
            .mark_as_completed(deliverables)?;
        self.touch();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the milestone does not exist or is completed.
    pub fn delay_milestone(
        &mut self,
        milestone_id: MilestoneId,
        reason: Option<&str>,
    ) -> Result<(), DomainError> {
        self.milestone_mut(milestone_id)?.mark_as_delayed(reason)?;
        self.touch();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the milestone does not exist, is completed, or
    /// `due_date` is not after `today`.
    pub fn reschedule_milestone(
        &mut self,
        milestone_id: MilestoneId,
        due_date: Date,
        today: Date,
    ) -> Result<(), DomainError> {
        self.milestone_mut(milestone_id)?
            .update_due_date(due_date, today)?;
        self.touch();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the milestone does not exist or is completed.
    pub fn update_milestone_description(
        &mut self,
        milestone_id: MilestoneId,
        description: Option<String>,
    ) -> Result<(), DomainError> {
        self.milestone_mut(milestone_id)?
            .update_description(description)?;
        self.touch();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the milestone does not exist, is completed, or the
    /// percentage is outside `[0, 100]`.
    pub fn update_milestone_payment(
        &mut self,
        milestone_id: MilestoneId,
        payment_percentage: Decimal,
    ) -> Result<(), DomainError> {
        self.milestone_mut(milestone_id)?
            .update_payment_percentage(payment_percentage)?;
        self.touch();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the milestone does not exist or is completed.
    pub fn reset_milestone(&mut self, milestone_id: MilestoneId) -> Result<(), DomainError> {
        self.milestone_mut(milestone_id)?.reset()?;
        self.touch();
        Ok(())
    }

    /// Adds a technology unless an entry differing only in case exists.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyField` if `technology` is empty.
    pub fn add_technology(&mut self, technology: &str) -> Result<(), DomainError> {
        require_non_empty(technology, "technology")?;
        let technology: &str = technology.trim();
        if !self
            .technologies
            .iter()
            .any(|t| t.eq_ignore_ascii_case(technology))
        {
            self.technologies.push(technology.to_string());
            self.touch();
        }
        Ok(())
    }

    /// Removes a technology, matching case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyField` if `technology` is empty.
    pub fn remove_technology(&mut self, technology: &str) -> Result<(), DomainError> {
        require_non_empty(technology, "technology")?;
        let technology: &str = technology.trim();
        if let Some(index) = self
            .technologies
            .iter()
            .position(|t| t.eq_ignore_ascii_case(technology))
        {
            self.technologies.remove(index);
            self.touch();
        }
        Ok(())
    }

    /// Sum of assignment cost estimates, in the budget currency.
    ///
    /// Only assignments with a positive hourly rate contribute.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ArithmeticOverflow` if the estimate exceeds the
    /// decimal range.
    pub fn calculate_estimated_cost(&self, today: Date) -> Result<Money, DomainError> {
        let costs: Vec<Decimal> = self
            .assignments
            .iter()
            .filter(|a| a.hourly_rate() > Decimal::ZERO)
            .map(|a| a.estimated_cost(today))
            .collect::<Result<_, _>>()?;
        let total: Decimal = checked_total(costs, "estimating project cost")?;

        Money::new(total, self.budget.currency())
    }

    /// Percentage of milestones completed. Zero without milestones.
    #[must_use]
    pub fn calculate_progress(&self) -> Decimal {
        if self.milestones.is_empty() {
            return Decimal::ZERO;
        }
        let completed: usize = self.milestones.iter().filter(|m| m.is_completed()).count();
        Decimal::from(completed) * Decimal::ONE_HUNDRED / Decimal::from(self.milestones.len())
    }

    /// Returns true if the estimated cost exceeds the budget.
    ///
    /// An estimate too large to represent exceeds every budget.
    #[must_use]
    pub fn is_over_budget(&self, today: Date) -> bool {
        !self
            .calculate_estimated_cost(today)
            .is_ok_and(|cost| cost.amount() <= self.budget.amount())
    }

    #[must_use]
    pub fn completed_milestones(&self) -> Vec<&ProjectMilestone> {
        self.milestones.iter().filter(|m| m.is_completed()).collect()
    }

    #[must_use]
    pub fn overdue_milestones(&self, today: Date) -> Vec<&ProjectMilestone> {
        self.milestones
            .iter()
            .filter(|m| m.is_overdue(today))
            .collect()
    }

    fn assignment_mut(
        &mut self,
        assignment_id: AssignmentId,
    ) -> Result<&mut ProjectAssignment, DomainError> {
        self.assignments
            .iter_mut()
            .find(|a| a.id() == assignment_id)
            .ok_or(DomainError::AssignmentNotFound(assignment_id))
    }

    fn milestone_mut(
        &mut self,
        milestone_id: MilestoneId,
    ) -> Result<&mut ProjectMilestone, DomainError> {
        self.milestones
            .iter_mut()
            .find(|m| m.id() == milestone_id)
            .ok_or(DomainError::MilestoneNotFound(milestone_id))
    }

    fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc();
    }
}
