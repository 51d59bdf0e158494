// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{AssignmentId, EmployeeId, MilestoneId};
use rust_decimal::Decimal;
use time::Date;

/// Stable error code for malformed arguments (empty names, nil identifiers, negatives).
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
/// Stable error code for a violated domain guard.
pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
/// Stable error code for a violated business rule (state machines).
pub const BUSINESS_RULE_VIOLATION: &str = "BUSINESS_RULE_VIOLATION";

/// Errors raised when an aggregate or value object invariant would be violated.
///
/// These represent caller errors: the input handed to a constructor or mutator
/// was malformed, or the requested transition is not permitted. Expected
/// business outcomes (not found, insufficient allocation) are not modelled here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required text field is empty or whitespace.
    EmptyField {
        /// The name of the field.
        field: &'static str,
    },
    /// An identifier is the nil UUID.
    InvalidIdentifier {
        /// The name of the field.
        field: &'static str,
    },
    /// Tenant identifier is empty.
    InvalidTenant,
    /// A numeric value that must be non-negative was negative.
    NegativeValue {
        /// The name of the field.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },
    /// A percentage fell outside `[0, 100]`.
    InvalidPercentage {
        /// The name of the field.
        field: &'static str,
        /// The rejected value.
        value: Decimal,
    },
    /// Allocation percentage fell outside `[1, 100]`.
    InvalidAllocation {
        /// The rejected value.
        value: u8,
    },
    /// Logged hours fell outside `(0, 24]`.
    InvalidHours {
        /// The rejected value.
        hours: Decimal,
    },
    /// End date is not strictly after the start date.
    InvalidDateRange {
        /// The start of the range.
        start: Date,
        /// The rejected end of the range.
        end: Date,
    },
    /// Currency is not a three-letter code.
    InvalidCurrency(String),
    /// Arithmetic was attempted across two currencies.
    CurrencyMismatch {
        /// Currency of the left operand.
        left: String,
        /// Currency of the right operand.
        right: String,
    },
    /// Subtraction would produce a negative amount.
    InsufficientAmount {
        /// The amount available.
        available: Decimal,
        /// The amount requested.
        requested: Decimal,
    },
    /// Project code does not follow `PREFIX-YYYY-MM`.
    InvalidProjectCode(String),
    /// Project code prefix is not 2-4 letters.
    InvalidCodePrefix(String),
    /// Project code suffix is outside `1..=99`.
    InvalidCodeSuffix(u8),
    /// E-mail address is syntactically invalid.
    InvalidEmail(String),
    /// A status string could not be parsed.
    InvalidStatus {
        /// The kind of status being parsed.
        kind: &'static str,
        /// The rejected value.
        value: String,
    },
    /// The requested status transition is not permitted.
    InvalidStatusTransition {
        /// The business rule identifier.
        rule: &'static str,
        /// The entity whose status was being changed.
        entity: &'static str,
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// The employee already has an overlapping assignment on the project.
    OverlappingAssignment {
        /// The employee that was being assigned.
        employee_id: EmployeeId,
    },
    /// Milestone due date falls outside the project period.
    MilestoneOutsideProjectPeriod {
        /// The rejected due date.
        due_date: Date,
        /// Which boundary was crossed.
        reason: &'static str,
    },
    /// A date in the future was supplied where only past or present is allowed.
    FutureDate {
        /// The rejected date.
        date: Date,
    },
    /// The time entry is approved and can no longer be changed.
    TimeEntryLocked {
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// The time entry is already approved.
    TimeEntryAlreadyApproved,
    /// The time entry is not approved, so there is nothing to reject.
    TimeEntryNotApproved,
    /// The milestone is completed and can no longer be changed.
    MilestoneCompleted {
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// The milestone is already in progress.
    MilestoneAlreadyInProgress,
    /// A rescheduled due date must be after today.
    DueDateNotInFuture {
        /// The rejected date.
        due_date: Date,
    },
    /// The employee is terminated and can no longer be changed.
    EmployeeTerminated {
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// An employee was named as their own manager.
    SelfManagement,
    /// Leave days must be positive.
    InvalidLeaveDays,
    /// Not enough leave remains.
    InsufficientLeave {
        /// Days requested.
        requested: u32,
        /// Days available.
        available: u32,
    },
    /// Only active employees may perform the operation.
    EmployeeNotActive {
        /// The operation that was attempted.
        operation: &'static str,
    },
    /// No assignment with the given identifier exists on the project.
    AssignmentNotFound(AssignmentId),
    /// No milestone with the given identifier exists on the project.
    MilestoneNotFound(MilestoneId),
    /// A decimal amount exceeded the representable range.
    ArithmeticOverflow {
        /// The operation that overflowed.
        operation: &'static str,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl DomainError {
    /// Returns the stable error code a boundary layer maps to a client error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyField { .. }
            | Self::InvalidIdentifier { .. }
            | Self::InvalidTenant
            | Self::NegativeValue { .. } => INVALID_ARGUMENT,
            Self::InvalidStatusTransition { .. } => BUSINESS_RULE_VIOLATION,
            _ => DOMAIN_ERROR,
        }
    }

    /// Returns the business rule identifier, if this error names one.
    #[must_use]
    pub const fn rule(&self) -> Option<&'static str> {
        match self {
            Self::InvalidStatusTransition { rule, .. } => Some(*rule),
            Self::OverlappingAssignment { .. } => Some("EMPLOYEE_ALREADY_ASSIGNED"),
            _ => None,
        }
    }
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "Field '{field}' cannot be empty"),
            Self::InvalidIdentifier { field } => {
                write!(f, "Field '{field}' must be a non-nil identifier")
            }
            Self::InvalidTenant => write!(f, "Tenant identifier cannot be empty"),
            Self::NegativeValue { field, value } => {
                write!(f, "Field '{field}' cannot be negative, got {value}")
            }
            Self::InvalidPercentage { field, value } => {
                write!(f, "Field '{field}' must be between 0 and 100, got {value}")
            }
            Self::InvalidAllocation { value } => {
                write!(
                    f,
                    "Allocation percentage must be between 1 and 100, got {value}"
                )
            }
            Self::InvalidHours { hours } => {
                write!(f, "Hours must be greater than 0 and at most 24, got {hours}")
            }
            Self::InvalidDateRange { start, end } => {
                write!(
                    f,
                    "End date must be after start date (start: {start}, end: {end})"
                )
            }
            Self::InvalidCurrency(currency) => {
                write!(f, "Invalid currency '{currency}': expected a 3-letter code")
            }
            Self::CurrencyMismatch { left, right } => {
                write!(f, "Cannot combine amounts in {left} and {right}")
            }
            Self::InsufficientAmount {
                available,
                requested,
            } => {
                write!(
                    f,
                    "Insufficient amount: cannot subtract {requested} from {available}"
                )
            }
            Self::InvalidProjectCode(code) => {
                write!(
                    f,
                    "Project code '{code}' must follow pattern XX-YYYY-MM (e.g., WEB-2024-01)"
                )
            }
            Self::InvalidCodePrefix(prefix) => {
                write!(f, "Project code prefix '{prefix}' must be 2-4 letters")
            }
            Self::InvalidCodeSuffix(suffix) => {
                write!(
                    f,
                    "Project code suffix must be between 1 and 99, got {suffix}"
                )
            }
            Self::InvalidEmail(email) => write!(f, "Invalid email format: '{email}'"),
            Self::InvalidStatus { kind, value } => write!(f, "Invalid {kind}: '{value}'"),
            Self::InvalidStatusTransition {
                rule,
                entity,
                from,
                to,
            } => {
                write!(
                    f,
                    "Business rule violated: {rule}. Cannot change {entity} status from {from} to {to}"
                )
            }
            Self::OverlappingAssignment { employee_id } => {
                write!(
                    f,
                    "Employee {employee_id} is already assigned to this project during the specified period"
                )
            }
            Self::MilestoneOutsideProjectPeriod { due_date, reason } => {
                write!(f, "Milestone due date {due_date} cannot be {reason}")
            }
            Self::FutureDate { date } => write!(f, "Cannot log time for future date {date}"),
            Self::TimeEntryLocked { operation } => {
                write!(f, "Cannot {operation} an approved time entry")
            }
            Self::TimeEntryAlreadyApproved => write!(f, "Time entry is already approved"),
            Self::TimeEntryNotApproved => {
                write!(f, "Time entry is not approved and cannot be rejected")
            }
            Self::MilestoneCompleted { operation } => {
                write!(f, "Cannot {operation} a completed milestone")
            }
            Self::MilestoneAlreadyInProgress => write!(f, "Milestone is already in progress"),
            Self::DueDateNotInFuture { due_date } => {
                write!(f, "Due date {due_date} must be in the future")
            }
            Self::EmployeeTerminated { operation } => {
                write!(f, "Cannot {operation} for a terminated employee")
            }
            Self::SelfManagement => write!(f, "Employee cannot be their own manager"),
            Self::InvalidLeaveDays => write!(f, "Leave days must be positive"),
            Self::InsufficientLeave {
                requested,
                available,
            } => {
                write!(
                    f,
                    "Insufficient leave balance: requested {requested} days, {available} available"
                )
            }
            Self::EmployeeNotActive { operation } => {
                write!(f, "Only active employees can {operation}")
            }
            Self::AssignmentNotFound(id) => write!(f, "Assignment {id} not found on project"),
            Self::MilestoneNotFound(id) => write!(f, "Milestone {id} not found on project"),
            Self::ArithmeticOverflow { operation } => {
                write!(f, "Arithmetic overflow while {operation}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}

/// Errors reported by repository port implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// The backing store failed.
    #[error("storage failure: {0}")]
    Storage(String),
    /// The call observed a cancelled token before completing.
    #[error("operation cancelled")]
    Cancelled,
    /// A write conflicted with existing data.
    #[error("conflict: {0}")]
    Conflict(String),
    /// A write targeted a record that does not exist.
    #[error("record not found: {0}")]
    NotFound(String),
}
