// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence ports.
//!
//! Adapters live outside this crate. Every call is scoped to one tenant and
//! observes the cancellation token it is given: a call that sees a cancelled
//! token returns [`RepositoryError::Cancelled`].

use crate::client::Client;
use crate::date_range::DateRange;
use crate::employee::Employee;
use crate::error::RepositoryError;
use crate::project::Project;
use crate::project_code::ProjectCode;
use crate::time_entry::TimeEntry;
use crate::types::{
    ClientId, EmployeeId, ProjectId, ProjectStatus, SkillLevel, TenantId, TimeEntryId,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use time::Date;
use tokio_util::sync::CancellationToken;

/// Result type returned by every port call.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Access to [`Project`] aggregates.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn get_by_id(
        &self,
        tenant: &TenantId,
        id: ProjectId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<Project>>;

    async fn get_all(
        &self,
        tenant: &TenantId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Project>>;

    async fn get_by_client_id(
        &self,
        tenant: &TenantId,
        client_id: ClientId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Project>>;

    async fn get_by_manager_id(
        &self,
        tenant: &TenantId,
        manager_id: EmployeeId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Project>>;

    async fn get_by_status(
        &self,
        tenant: &TenantId,
        status: ProjectStatus,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Project>>;

    async fn get_by_code(
        &self,
        tenant: &TenantId,
        code: &ProjectCode,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<Project>>;

    /// Returns true if a project in `tenant` already uses `code`.
    async fn exists_by_code(
        &self,
        tenant: &TenantId,
        code: &ProjectCode,
        cancel: &CancellationToken,
    ) -> RepositoryResult<bool>;

    async fn add(
        &self,
        tenant: &TenantId,
        project: &Project,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()>;

    async fn update(
        &self,
        tenant: &TenantId,
        project: &Project,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()>;

    async fn delete(
        &self,
        tenant: &TenantId,
        id: ProjectId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()>;
}

/// Access to [`Employee`] aggregates.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn get_by_id(
        &self,
        tenant: &TenantId,
        id: EmployeeId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<Employee>>;

    async fn get_all(
        &self,
        tenant: &TenantId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Employee>>;

    /// Employees holding `technology`, at `min_level` or above when given.
    async fn get_by_skill(
        &self,
        tenant: &TenantId,
        technology: &str,
        min_level: Option<SkillLevel>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Employee>>;

    /// Active employees with free allocation during `period`.
    async fn get_available_employees(
        &self,
        tenant: &TenantId,
        period: &DateRange,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Employee>>;

    async fn get_by_email(
        &self,
        tenant: &TenantId,
        email: &str,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<Employee>>;

    async fn exists_by_email(
        &self,
        tenant: &TenantId,
        email: &str,
        cancel: &CancellationToken,
    ) -> RepositoryResult<bool>;

    async fn add(
        &self,
        tenant: &TenantId,
        employee: &Employee,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()>;

    async fn update(
        &self,
        tenant: &TenantId,
        employee: &Employee,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()>;

    async fn delete(
        &self,
        tenant: &TenantId,
        id: EmployeeId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()>;
}

/// Access to [`Client`] aggregates.
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn get_by_id(
        &self,
        tenant: &TenantId,
        id: ClientId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<Client>>;

    async fn get_all(
        &self,
        tenant: &TenantId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Client>>;

    async fn get_by_company_name(
        &self,
        tenant: &TenantId,
        company_name: &str,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<Client>>;

    async fn exists_by_company_name(
        &self,
        tenant: &TenantId,
        company_name: &str,
        cancel: &CancellationToken,
    ) -> RepositoryResult<bool>;

    async fn add(
        &self,
        tenant: &TenantId,
        client: &Client,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()>;

    async fn update(
        &self,
        tenant: &TenantId,
        client: &Client,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()>;

    async fn delete(
        &self,
        tenant: &TenantId,
        id: ClientId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()>;
}

/// Access to [`TimeEntry`] aggregates.
#[async_trait]
pub trait TimeEntryRepository: Send + Sync {
    async fn get_by_id(
        &self,
        tenant: &TenantId,
        id: TimeEntryId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<TimeEntry>>;

    /// Hours logged by `employee_id` with a date in `[start, end]`.
    async fn get_total_hours_by_employee(
        &self,
        tenant: &TenantId,
        employee_id: EmployeeId,
        start: Date,
        end: Date,
        billable_only: bool,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Decimal>;

    /// Entries with a date in `[start, end]`.
    async fn get_by_date_range(
        &self,
        tenant: &TenantId,
        start: Date,
        end: Date,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<TimeEntry>>;

    /// Entries logged by `employee_id`, optionally bounded by date.
    async fn get_by_employee_id(
        &self,
        tenant: &TenantId,
        employee_id: EmployeeId,
        start: Option<Date>,
        end: Option<Date>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<TimeEntry>>;

    /// Entries not yet approved.
    async fn get_pending_approval(
        &self,
        tenant: &TenantId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<TimeEntry>>;

    async fn add(
        &self,
        tenant: &TenantId,
        entry: &TimeEntry,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()>;

    async fn update(
        &self,
        tenant: &TenantId,
        entry: &TimeEntry,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()>;

    async fn delete(
        &self,
        tenant: &TenantId,
        id: TimeEntryId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()>;
}
