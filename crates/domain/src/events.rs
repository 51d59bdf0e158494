// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain events raised by aggregate operations.
//!
//! Aggregates do not queue events internally. Operations that raise an event
//! return it, and the caller hands it to whatever outbox persists it after a
//! successful save.

use crate::project_code::ProjectCode;
use crate::types::{AssignmentId, ClientId, EmployeeId, ProjectId, TenantId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Identity and timestamp shared by every event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    pub event_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_on: OffsetDateTime,
}

impl EventMetadata {
    #[must_use]
    pub fn new() -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_on: OffsetDateTime::now_utc(),
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// Raised when a project is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectCreated {
    pub metadata: EventMetadata,
    pub tenant_id: TenantId,
    pub project_id: ProjectId,
    pub code: ProjectCode,
    pub name: String,
    pub client_id: ClientId,
}

/// Raised when an employee is assigned to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAssignedToProject {
    pub metadata: EventMetadata,
    pub tenant_id: TenantId,
    pub project_id: ProjectId,
    pub employee_id: EmployeeId,
    pub assignment_id: AssignmentId,
    pub role: String,
    pub allocation_percentage: u8,
}

/// Every event the domain raises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event_type")]
pub enum DomainEvent {
    #[serde(rename = "ProjectCreatedEvent")]
    ProjectCreated(ProjectCreated),
    #[serde(rename = "EmployeeAssignedToProjectEvent")]
    EmployeeAssignedToProject(EmployeeAssignedToProject),
}

impl DomainEvent {
    /// Stable event name used by outbox consumers.
    #[must_use]
    pub const fn event_type(&self) -> &'static str {
        match self {
            Self::ProjectCreated(_) => "ProjectCreatedEvent",
            Self::EmployeeAssignedToProject(_) => "EmployeeAssignedToProjectEvent",
        }
    }

    #[must_use]
    pub const fn metadata(&self) -> &EventMetadata {
        match self {
            Self::ProjectCreated(event) => &event.metadata,
            Self::EmployeeAssignedToProject(event) => &event.metadata,
        }
    }

    #[must_use]
    pub const fn event_id(&self) -> Uuid {
        self.metadata().event_id
    }

    #[must_use]
    pub const fn occurred_on(&self) -> OffsetDateTime {
        self.metadata().occurred_on
    }

    #[must_use]
    pub const fn tenant_id(&self) -> &TenantId {
        match self {
            Self::ProjectCreated(event) => &event.tenant_id,
            Self::EmployeeAssignedToProject(event) => &event.tenant_id,
        }
    }

    /// The project both event kinds concern.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        match self {
            Self::ProjectCreated(event) => event.project_id,
            Self::EmployeeAssignedToProject(event) => event.project_id,
        }
    }
}
