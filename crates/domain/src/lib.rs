// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

pub mod calendar;
mod client;
mod clock;
mod date_range;
mod employee;
mod employee_skill;
mod error;
mod events;
mod money;
mod project;
mod project_assignment;
mod project_code;
mod project_milestone;
mod repositories;
mod time_entry;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use client::{Client, ClientProject, NEW_CLIENT_WINDOW_DAYS};
pub use clock::{Clock, FixedClock, SystemClock};
pub use date_range::DateRange;
pub use employee::{Employee, FULL_ALLOCATION};
pub use employee_skill::EmployeeSkill;
pub use error::{
    BUSINESS_RULE_VIOLATION, DOMAIN_ERROR, DomainError, INVALID_ARGUMENT, RepositoryError,
};
pub use events::{DomainEvent, EmployeeAssignedToProject, EventMetadata, ProjectCreated};
pub use money::{Money, checked_total};
pub use project::Project;
pub use project_assignment::{HOURS_PER_DAY, ProjectAssignment};
pub use project_code::ProjectCode;
pub use project_milestone::ProjectMilestone;
pub use repositories::{
    ClientRepository, EmployeeRepository, ProjectRepository, RepositoryResult,
    TimeEntryRepository,
};
pub use time_entry::TimeEntry;
pub use types::{
    AssignmentId, ClientId, ClientImportance, DepartmentId, EmployeeId, EmployeeStatus,
    MilestoneId, MilestoneStatus, ProjectId, ProjectStatus, ProjectType, RiskLevel, SkillId,
    SkillLevel, TenantId, TimeEntryId,
};
pub use validation::validate_email;
