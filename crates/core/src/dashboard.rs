// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{Rejection, ServiceResult, fold};
use crate::policy::MetricsPolicy;
use erp_domain::calendar::{first_day_of_month, last_day_of_month};
use erp_domain::{
    Client, ClientId, ClientRepository, Clock, DomainError, Employee, EmployeeRepository,
    EmployeeStatus, Project, ProjectId, ProjectRepository, ProjectStatus, RepositoryError,
    TenantId, TimeEntry, TimeEntryRepository, checked_total,
};
use futures::future::try_join_all;
use futures::try_join;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::Date;
use tokio_util::sync::CancellationToken;
use tracing::info;

const SUMMARY_CONTEXT: &str = "Error generating dashboard";
const STATUS_SUMMARY_CONTEXT: &str = "Error generating status summary";

/// Tenant-wide headline figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub active_projects: usize,
    pub completed_projects: usize,
    pub projects_on_hold: usize,
    pub total_employees: usize,
    pub active_employees: usize,
    /// Sum of the budgets of completed projects.
    pub total_revenue: Decimal,
    pub current_month_hours: Decimal,
    pub current_month_billable_hours: Decimal,
    /// Time entries waiting for approval.
    pub pending_approval_count: usize,
    /// Most recently created projects, newest first.
    pub recent_projects: Vec<RecentProject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentProject {
    pub id: ProjectId,
    pub name: String,
    pub client_id: ClientId,
    /// `None` when the client record could not be found.
    pub client_name: Option<String>,
    pub status: ProjectStatus,
    pub progress: Decimal,
}

/// Project count and budget totals for one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStatusSummary {
    pub status: ProjectStatus,
    pub count: usize,
    pub total_budget: Decimal,
    pub average_budget: Decimal,
}

/// Read-only aggregation over a tenant's projects, employees and time
/// entries.
pub struct DashboardService {
    projects: Arc<dyn ProjectRepository>,
    employees: Arc<dyn EmployeeRepository>,
    clients: Arc<dyn ClientRepository>,
    time_entries: Arc<dyn TimeEntryRepository>,
    clock: Arc<dyn Clock>,
    policy: MetricsPolicy,
}

impl DashboardService {
    #[must_use]
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        employees: Arc<dyn EmployeeRepository>,
        clients: Arc<dyn ClientRepository>,
        time_entries: Arc<dyn TimeEntryRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            projects,
            employees,
            clients,
            time_entries,
            clock,
            policy: MetricsPolicy::default(),
        }
    }

    /// Replaces the metrics policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MetricsPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Builds the headline figures for `tenant`.
    ///
    /// Monthly hours cover the calendar month containing today.
    ///
    /// # Errors
    ///
    /// Returns an `OperationFailure` if a repository call fails.
    pub async fn summary(
        &self,
        tenant: &TenantId,
        cancel: &CancellationToken,
    ) -> ServiceResult<DashboardSummary> {
        let outcome: Result<DashboardSummary, Rejection> =
            self.build_summary(tenant, cancel).await;
        fold(SUMMARY_CONTEXT, outcome)
    }

    async fn build_summary(
        &self,
        tenant: &TenantId,
        cancel: &CancellationToken,
    ) -> Result<DashboardSummary, Rejection> {
        let today: Date = self.clock.today();
        let month_start: Date = first_day_of_month(today)?;
        let month_end: Date = last_day_of_month(today)?;

        let (projects, employees, month_entries, pending): (
            Vec<Project>,
            Vec<Employee>,
            Vec<TimeEntry>,
            Vec<TimeEntry>,
        ) = try_join!(
            self.projects.get_all(tenant, cancel),
            self.employees.get_all(tenant, cancel),
            self.time_entries
                .get_by_date_range(tenant, month_start, month_end, cancel),
            self.time_entries.get_pending_approval(tenant, cancel),
        )?;

        let count_status =
            |status: ProjectStatus| projects.iter().filter(|p| p.status() == status).count();

        let mut newest: Vec<&Project> = projects.iter().collect();
        newest.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        newest.truncate(self.policy.recent_projects_limit);
        let recent_projects: Vec<RecentProject> = try_join_all(
            newest
                .into_iter()
                .map(|project| self.recent_project(tenant, project, cancel)),
        )
        .await?;

        let total_revenue: Decimal = checked_total(
            projects
                .iter()
                .filter(|p| p.status() == ProjectStatus::Completed)
                .map(|p| p.budget().amount()),
            "totalling completed project revenue",
        )?;

        let summary: DashboardSummary = DashboardSummary {
            total_projects: projects.len(),
            active_projects: count_status(ProjectStatus::Active),
            completed_projects: count_status(ProjectStatus::Completed),
            projects_on_hold: count_status(ProjectStatus::OnHold),
            total_employees: employees.len(),
            active_employees: employees
                .iter()
                .filter(|e| e.status() == EmployeeStatus::Active)
                .count(),
            total_revenue,
            current_month_hours: month_entries.iter().map(TimeEntry::hours).sum(),
            current_month_billable_hours: month_entries
                .iter()
                .filter(|e| e.is_billable())
                .map(TimeEntry::hours)
                .sum(),
            pending_approval_count: pending.len(),
            recent_projects,
        };

        info!(
            tenant = %tenant,
            projects = summary.total_projects,
            employees = summary.total_employees,
            "Built dashboard summary"
        );
        Ok(summary)
    }

    async fn recent_project(
        &self,
        tenant: &TenantId,
        project: &Project,
        cancel: &CancellationToken,
    ) -> Result<RecentProject, RepositoryError> {
        let client: Option<Client> = self
            .clients
            .get_by_id(tenant, project.client_id(), cancel)
            .await?;

        Ok(RecentProject {
            id: project.id(),
            name: project.name().to_string(),
            client_id: project.client_id(),
            client_name: client.map(|c| c.company_name().to_string()),
            status: project.status(),
            progress: project.calculate_progress(),
        })
    }

    /// Groups the tenant's projects by status, in lifecycle order. Statuses
    /// without projects are omitted.
    ///
    /// # Errors
    ///
    /// Returns an `OperationFailure` if a repository call fails.
    pub async fn project_status_summary(
        &self,
        tenant: &TenantId,
        cancel: &CancellationToken,
    ) -> ServiceResult<Vec<ProjectStatusSummary>> {
        let outcome: Result<Vec<ProjectStatusSummary>, Rejection> = self
            .projects
            .get_all(tenant, cancel)
            .await
            .map_err(Rejection::from)
            .and_then(|projects| summarize_by_status(&projects).map_err(Rejection::from));
        fold(STATUS_SUMMARY_CONTEXT, outcome)
    }
}

fn summarize_by_status(projects: &[Project]) -> Result<Vec<ProjectStatusSummary>, DomainError> {
    let mut summaries: Vec<ProjectStatusSummary> = Vec::new();
    for status in ProjectStatus::ALL {
        let budgets: Vec<Decimal> = projects
            .iter()
            .filter(|p| p.status() == status)
            .map(|p| p.budget().amount())
            .collect();
        if budgets.is_empty() {
            continue;
        }

        let count: usize = budgets.len();
        let total_budget: Decimal = checked_total(budgets, "totalling budgets by status")?;
        summaries.push(ProjectStatusSummary {
            status,
            count,
            total_budget,
            average_budget: total_budget / Decimal::from(count),
        });
    }
    Ok(summaries)
}
