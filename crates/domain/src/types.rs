// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random identifier.
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an existing UUID.
            #[must_use]
            pub const fn from_uuid(value: Uuid) -> Self {
                Self(value)
            }

            /// Returns the underlying UUID.
            #[must_use]
            pub const fn as_uuid(&self) -> Uuid {
                self.0
            }

            /// Returns true if this is the nil UUID.
            #[must_use]
            pub fn is_nil(&self) -> bool {
                self.0.is_nil()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Identifies a [`crate::Project`].
    ProjectId
);
entity_id!(
    /// Identifies an [`crate::Employee`].
    EmployeeId
);
entity_id!(
    /// Identifies a [`crate::Client`].
    ClientId
);
entity_id!(
    /// Identifies a [`crate::TimeEntry`].
    TimeEntryId
);
entity_id!(
    /// Identifies a [`crate::ProjectAssignment`].
    AssignmentId
);
entity_id!(
    /// Identifies a [`crate::ProjectMilestone`].
    MilestoneId
);
entity_id!(
    /// Identifies an [`crate::EmployeeSkill`].
    SkillId
);
entity_id!(
    /// Identifies a department. Departments are managed outside this crate.
    DepartmentId
);

/// Identifies the tenant that owns an aggregate.
///
/// Assigned at creation and never changed. Every repository call and every
/// domain-service operation receives the tenant explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a new `TenantId`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTenant` if the value is empty or whitespace.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidTenant);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the tenant identifier.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TenantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a project.
///
/// Valid transitions are:
/// - Planning → Active | Cancelled
/// - Active → `OnHold` | Completed | Cancelled
/// - `OnHold` → Active | Cancelled
///
/// Completed and Cancelled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum ProjectStatus {
    /// Being scoped; no work yet.
    #[default]
    Planning,
    /// Work in progress.
    Active,
    /// Temporarily paused.
    OnHold,
    /// Delivered.
    Completed,
    /// Abandoned.
    Cancelled,
}

impl ProjectStatus {
    /// All statuses in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Planning,
        Self::Active,
        Self::OnHold,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planning => "Planning",
            Self::Active => "Active",
            Self::OnHold => "OnHold",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Checks if a transition from this status to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Planning, Self::Active | Self::Cancelled)
                | (Self::Active, Self::OnHold | Self::Completed | Self::Cancelled)
                | (Self::OnHold, Self::Active | Self::Cancelled)
        )
    }

    /// Validates a transition from this status to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is not allowed.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                rule: "INVALID_STATUS_TRANSITION",
                entity: "project",
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
            })
        }
    }
}

impl FromStr for ProjectStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus {
                kind: "project status",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Commercial model of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProjectType {
    /// Fixed scope, fixed price.
    FixedPrice,
    /// Billed by hours worked.
    #[default]
    TimeAndMaterial,
    /// Recurring fee.
    Retainer,
}

/// Delivery risk of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum RiskLevel {
    /// Low risk.
    Low,
    /// Medium risk.
    #[default]
    Medium,
    /// High risk.
    High,
}

impl RiskLevel {
    /// Returns the 1-based ordinal used by completion scoring.
    #[must_use]
    pub const fn ordinal(&self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
        }
    }
}

/// Employment status.
///
/// Valid transitions are:
/// - Active → Inactive | `OnLeave` | Terminated
/// - Inactive → Active | Terminated
/// - `OnLeave` → Active | Terminated
///
/// Terminated is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmployeeStatus {
    /// Working and assignable.
    #[default]
    Active,
    /// Not currently working.
    Inactive,
    /// On extended leave.
    OnLeave,
    /// Employment ended.
    Terminated,
}

impl EmployeeStatus {
    /// All statuses in declaration order.
    pub const ALL: [Self; 4] = [Self::Active, Self::Inactive, Self::OnLeave, Self::Terminated];

    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::OnLeave => "OnLeave",
            Self::Terminated => "Terminated",
        }
    }

    /// Checks if a transition from this status to another is valid.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Active, Self::Inactive | Self::OnLeave | Self::Terminated)
                | (Self::Inactive | Self::OnLeave, Self::Active | Self::Terminated)
        )
    }

    /// Validates a transition from this status to `target`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is not allowed.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                rule: "INVALID_EMPLOYEE_STATUS_TRANSITION",
                entity: "employee",
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
            })
        }
    }
}

impl FromStr for EmployeeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus {
                kind: "employee status",
                value: s.to_string(),
            })
    }
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Proficiency with a technology. Ordered from least to most proficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillLevel {
    /// Beginner.
    Beginner,
    /// Intermediate.
    Intermediate,
    /// Advanced.
    Advanced,
    /// Expert.
    Expert,
}

/// Progress of a project milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MilestoneStatus {
    /// Not started.
    #[default]
    Pending,
    /// Work started.
    InProgress,
    /// Delivered. Terminal.
    Completed,
    /// Behind schedule.
    Delayed,
}

impl MilestoneStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
            Self::Delayed => "Delayed",
        }
    }
}

impl std::fmt::Display for MilestoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relative importance of a client, derived from project count and budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ClientImportance {
    /// Fewer than two projects and under 25,000 total budget.
    Low,
    /// At least two projects or 25,000 total budget.
    Medium,
    /// At least five projects or 100,000 total budget.
    High,
}
