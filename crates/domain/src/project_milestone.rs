// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::days_between;
use crate::error::DomainError;
use crate::types::{MilestoneId, MilestoneStatus, ProjectId};
use crate::validation::{
    normalize_optional, require_identifier, require_non_empty, require_non_negative,
    validate_percentage,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// A dated deliverable within a project, optionally tied to a payment.
///
/// Status flow:
/// - Pending → `InProgress` → Completed
/// - any non-completed status → Delayed
/// - Delayed → Pending when the due date is moved
///
/// Completed milestones reject every further change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMilestone {
    id: MilestoneId,
    project_id: ProjectId,
    name: String,
    description: Option<String>,
    due_date: Date,
    completion_date: Option<OffsetDateTime>,
    payment_percentage: Decimal,
    status: MilestoneStatus,
    deliverables: Option<String>,
    created_at: OffsetDateTime,
}

impl ProjectMilestone {
    /// Creates a pending milestone.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `project_id` is nil
    /// - `name` is empty
    /// - `payment_percentage` is outside `[0, 100]`
    pub fn new(
        project_id: ProjectId,
        name: &str,
        due_date: Date,
        description: Option<String>,
        payment_percentage: Decimal,
    ) -> Result<Self, DomainError> {
        require_identifier(project_id.is_nil(), "project_id")?;
        require_non_empty(name, "name")?;
        validate_percentage(payment_percentage, "payment_percentage")?;

        Ok(Self {
            id: MilestoneId::new(),
            project_id,
            name: name.trim().to_string(),
            description: normalize_optional(description),
            due_date,
            completion_date: None,
            payment_percentage,
            status: MilestoneStatus::Pending,
            deliverables: None,
            created_at: OffsetDateTime::now_utc(),
        })
    }

    #[must_use]
    pub const fn id(&self) -> MilestoneId {
        self.id
    }

    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
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
    pub const fn due_date(&self) -> Date {
        self.due_date
    }

    #[must_use]
    pub const fn completion_date(&self) -> Option<OffsetDateTime> {
        self.completion_date
    }

    #[must_use]
    pub const fn payment_percentage(&self) -> Decimal {
        self.payment_percentage
    }

    #[must_use]
    pub const fn status(&self) -> MilestoneStatus {
        self.status
    }

    #[must_use]
    pub fn deliverables(&self) -> Option<&str> {
        self.deliverables.as_deref()
    }

    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self.status, MilestoneStatus::Completed)
    }

    #[must_use]
    pub const fn is_in_progress(&self) -> bool {
        matches!(self.status, MilestoneStatus::InProgress)
    }

    /// Returns true if the milestone is not completed and `today` is past its due date.
    #[must_use]
    pub fn is_overdue(&self, today: Date) -> bool {
        !self.is_completed() && today > self.due_date
    }

    /// Returns true if the milestone is pending or in progress.
    #[must_use]
    pub const fn can_be_completed(&self) -> bool {
        matches!(
            self.status,
            MilestoneStatus::Pending | MilestoneStatus::InProgress
        )
    }

    /// Days from `today` until the due date. Zero once completed, negative when overdue.
    #[must_use]
    pub fn days_until_due(&self, today: Date) -> i64 {
        if self.is_completed() {
            return 0;
        }
        days_between(today, self.due_date)
    }

    /// Days past the due date. Zero unless overdue.
    #[must_use]
    pub fn days_overdue(&self, today: Date) -> i64 {
        if !self.is_overdue(today) {
            return 0;
        }
        days_between(self.due_date, today)
    }

    /// Moves the milestone to `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns an error if the milestone is completed or already in progress.
    pub fn start_progress(&mut self) -> Result<(), DomainError> {
        self.ensure_not_completed("start")?;
        if self.is_in_progress() {
            return Err(DomainError::MilestoneAlreadyInProgress);
        }
        self.status = MilestoneStatus::InProgress;
        Ok(())
    }

    /// Completes the milestone, stamping the completion time.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MilestoneCompleted` if it is already completed.
    pub fn mark_as_completed(&mut self, deliverables: Option<String>) -> Result<(), DomainError> {
        self.ensure_not_completed("complete")?;
        self.status = MilestoneStatus::Completed;
        self.completion_date = Some(OffsetDateTime::now_utc());
        self.deliverables = normalize_optional(deliverables);
        Ok(())
    }

    /// Marks the milestone as delayed, appending the reason to the description.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MilestoneCompleted` if it is completed.
    pub fn mark_as_delayed(&mut self, reason: Option<&str>) -> Result<(), DomainError> {
        self.ensure_not_completed("delay")?;
        self.status = MilestoneStatus::Delayed;

        if let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) {
            let note: String = format!("Delay Reason: {reason}");
            self.description = Some(match self.description.take() {
                Some(existing) => format!("{existing}\n{note}"),
                None => note,
            });
        }
        Ok(())
    }

    /// Replaces the description.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MilestoneCompleted` if it is completed.
    pub fn update_description(&mut self, description: Option<String>) -> Result<(), DomainError> {
        self.ensure_not_completed("update the description of")?;
        self.description = normalize_optional(description);
        Ok(())
    }

    /// Moves the due date. A delayed milestone returns to Pending.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The milestone is completed
    /// - `due_date` is not after `today`
    pub fn update_due_date(&mut self, due_date: Date, today: Date) -> Result<(), DomainError> {
        self.ensure_not_completed("reschedule")?;
        if due_date <= today {
            return Err(DomainError::DueDateNotInFuture { due_date });
        }
        self.due_date = due_date;
        if matches!(self.status, MilestoneStatus::Delayed) {
            self.status = MilestoneStatus::Pending;
        }
        Ok(())
    }

    /// Changes the payment percentage.
    ///
    /// # Errors
    ///
    /// Returns an error if the milestone is completed or the value is outside `[0, 100]`.
    pub fn update_payment_percentage(&mut self, percentage: Decimal) -> Result<(), DomainError> {
        self.ensure_not_completed("update the payment percentage of")?;
        validate_percentage(percentage, "payment_percentage")?;
        self.payment_percentage = percentage;
        Ok(())
    }

    /// Returns the milestone to Pending, clearing completion data.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MilestoneCompleted` if it is completed.
    pub fn reset(&mut self) -> Result<(), DomainError> {
        self.ensure_not_completed("reset")?;
        self.status = MilestoneStatus::Pending;
        self.completion_date = None;
        self.deliverables = None;
        Ok(())
    }

    /// Share of `project_budget` released by this milestone.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NegativeValue` if the budget is negative.
    pub fn calculate_payment_amount(&self, project_budget: Decimal) -> Result<Decimal, DomainError> {
        require_non_negative(project_budget, "project_budget")?;
        Ok(project_budget * self.payment_percentage / Decimal::ONE_HUNDRED)
    }

    const fn ensure_not_completed(&self, operation: &'static str) -> Result<(), DomainError> {
        if self.is_completed() {
            return Err(DomainError::MilestoneCompleted { operation });
        }
        Ok(())
    }
}

impl std::fmt::Display for ProjectMilestone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (Due: {}, Status: {})",
            self.name, self.due_date, self.status
        )
    }
}
