// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{Rejection, ServiceResult, fold};
use crate::policy::MetricsPolicy;
use crate::results::{
    CompletionAssessment, EmployeeUtilization, ProjectProfitability, ResourceUtilization,
};
use erp_domain::calendar::{days_between, working_days_between};
use erp_domain::{
    Clock, DateRange, DomainError, Employee, EmployeeId, EmployeeRepository, EmployeeStatus,
    Money, Project, ProjectAssignment, ProjectCode, ProjectId, ProjectRepository,
    RepositoryError, RiskLevel, TenantId, TimeEntryRepository, checked_total,
};
use futures::future::try_join_all;
use futures::try_join;
use rust_decimal::Decimal;
use std::sync::Arc;
use time::Date;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const ASSIGNMENT_CONTEXT: &str = "Error checking employee assignment";
const CODE_CONTEXT: &str = "Error generating project code";
const PROFITABILITY_CONTEXT: &str = "Error calculating profitability";
const UTILIZATION_CONTEXT: &str = "Error analyzing resource utilization";

/// Derived-metrics engine over the project, employee and time-entry ports.
///
/// The service holds no mutable state. Every operation takes the tenant and
/// a cancellation token explicitly, and reports business failures and folded
/// repository errors through [`ServiceResult`].
pub struct ProjectDomainService {
    projects: Arc<dyn ProjectRepository>,
    employees: Arc<dyn EmployeeRepository>,
    time_entries: Arc<dyn TimeEntryRepository>,
    clock: Arc<dyn Clock>,
    policy: MetricsPolicy,
}

impl ProjectDomainService {
    /// Creates a service with the default [`MetricsPolicy`].
    #[must_use]
    pub fn new(
        projects: Arc<dyn ProjectRepository>,
        employees: Arc<dyn EmployeeRepository>,
        time_entries: Arc<dyn TimeEntryRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            projects,
            employees,
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

    #[must_use]
    pub const fn policy(&self) -> &MetricsPolicy {
        &self.policy
    }

    /// Checks whether `employee_id` can take `allocation_percentage` on
    /// `project_id` during `period`.
    ///
    /// Conditions are checked in order and the first one that fails is
    /// reported:
    /// 1. The employee exists
    /// 2. The project exists
    /// 3. The employee is Active
    /// 4. The project is neither Completed nor Cancelled
    /// 5. `period` overlaps the project period
    /// 6. The employee has at least `allocation_percentage` free during `period`
    ///
    /// # Errors
    ///
    /// Returns an `OperationFailure` naming the failed condition, or wrapping a
    /// domain or repository error.
    pub async fn can_assign_employee_to_project(
        &self,
        tenant: &TenantId,
        employee_id: EmployeeId,
        project_id: ProjectId,
        period: &DateRange,
        allocation_percentage: u8,
        cancel: &CancellationToken,
    ) -> ServiceResult<()> {
        let outcome: Result<(), Rejection> = self
            .check_assignment(
                tenant,
                employee_id,
                project_id,
                period,
                allocation_percentage,
                cancel,
            )
            .await;
        fold(ASSIGNMENT_CONTEXT, outcome)
    }

    async fn check_assignment(
        &self,
        tenant: &TenantId,
        employee_id: EmployeeId,
        project_id: ProjectId,
        period: &DateRange,
        allocation_percentage: u8,
        cancel: &CancellationToken,
    ) -> Result<(), Rejection> {
        require_id(employee_id.is_nil(), "employee_id")?;
        require_id(project_id.is_nil(), "project_id")?;
        if allocation_percentage == 0 || allocation_percentage > 100 {
            return Err(DomainError::InvalidAllocation {
                value: allocation_percentage,
            }
            .into());
        }

        let employee: Employee = self
            .employees
            .get_by_id(tenant, employee_id, cancel)
            .await?
            .ok_or_else(|| Rejection::business("Employee not found"))?;
        let project: Project = self.load_project(tenant, project_id, cancel).await?;

        if employee.status() != EmployeeStatus::Active {
            return Err(Rejection::business("Employee is not active"));
        }
        if project.status().is_terminal() {
            return Err(Rejection::business(
                "Cannot assign to completed or cancelled project",
            ));
        }
        if !project.period().overlaps(period) {
            return Err(Rejection::business(
                "Assignment period does not overlap with project period",
            ));
        }

        let available: u32 = employee.available_allocation(period);
        if available < u32::from(allocation_percentage) {
            return Err(Rejection::business(format!(
                "Employee only has {available}% allocation available"
            )));
        }

        debug!(
            tenant = %tenant,
            employee_id = %employee_id,
            project_id = %project_id,
            allocation_percentage,
            available,
            "Assignment is possible"
        );
        Ok(())
    }

    /// Builds a project code for `prefix` and the month of `date` (today when
    /// `None`) that no project in `tenant` uses yet.
    ///
    /// Tries `PREFIX-YYYY-MM` first, then `PREFIX-YYYY-MM-01`, `-02`, and so on
    /// up to the policy's `max_code_suffix`.
    ///
    /// # Errors
    ///
    /// Returns an `OperationFailure` if every candidate is taken, the prefix is
    /// invalid, or a repository call fails.
    pub async fn generate_unique_project_code(
        &self,
        tenant: &TenantId,
        prefix: &str,
        date: Option<Date>,
        cancel: &CancellationToken,
    ) -> ServiceResult<ProjectCode> {
        let outcome: Result<ProjectCode, Rejection> =
            self.find_free_code(tenant, prefix, date, cancel).await;
        fold(CODE_CONTEXT, outcome)
    }

    async fn find_free_code(
        &self,
        tenant: &TenantId,
        prefix: &str,
        date: Option<Date>,
        cancel: &CancellationToken,
    ) -> Result<ProjectCode, Rejection> {
        let target: Date = date.unwrap_or_else(|| self.clock.today());
        let base: ProjectCode = ProjectCode::generate(prefix, target)?;

        if !self.projects.exists_by_code(tenant, &base, cancel).await? {
            return Ok(base);
        }

        for suffix in 1..=self.policy.max_code_suffix {
            let candidate: ProjectCode = base.with_suffix(suffix)?;
            if !self.projects.exists_by_code(tenant, &candidate, cancel).await? {
                debug!(tenant = %tenant, code = %candidate, "Generated suffixed project code");
                return Ok(candidate);
            }
        }

        Err(Rejection::business(
            "Cannot generate unique project code. Too many projects for this month.",
        ))
    }

    /// Compares the budget of `project_id` with its estimated and actual
    /// costs.
    ///
    /// Actual costs are the billable hours each assignee logged inside the
    /// assignment window, times the assignment rate. An open-ended assignment
    /// is measured up to today.
    ///
    /// # Errors
    ///
    /// Returns an `OperationFailure` if the project does not exist or a
    /// repository call fails.
    pub async fn calculate_project_profitability(
        &self,
        tenant: &TenantId,
        project_id: ProjectId,
        cancel: &CancellationToken,
    ) -> ServiceResult<ProjectProfitability> {
        let outcome: Result<ProjectProfitability, Rejection> =
            self.profitability(tenant, project_id, cancel).await;
        fold(PROFITABILITY_CONTEXT, outcome)
    }

    async fn profitability(
        &self,
        tenant: &TenantId,
        project_id: ProjectId,
        cancel: &CancellationToken,
    ) -> Result<ProjectProfitability, Rejection> {
        let project: Project = self.load_project(tenant, project_id, cancel).await?;
        let today: Date = self.clock.today();

        let actual_amount: Decimal = self.actual_costs(tenant, &project, today, cancel).await?;
        let budget: Money = project.budget().clone();
        let budget_amount: Decimal = budget.amount();
        let actual_costs: Money = Money::new(actual_amount, budget.currency())?;
        let estimated_costs: Money = project.calculate_estimated_cost(today)?;

        let (profitability_percentage, budget_utilization): (Decimal, Decimal) =
            if budget_amount.is_zero() {
                (Decimal::ZERO, Decimal::ZERO)
            } else {
                (
                    share_of_budget(budget_amount - actual_amount, budget_amount)?,
                    share_of_budget(actual_amount, budget_amount)?,
                )
            };

        let result: ProjectProfitability = ProjectProfitability {
            project_id,
            estimated_profit: budget_amount - estimated_costs.amount(),
            actual_profit: budget_amount - actual_amount,
            profit_margin: project.profit_margin(),
            is_over_budget: actual_amount > budget_amount,
            profitability_percentage,
            budget_utilization,
            budget,
            estimated_costs,
            actual_costs,
        };

        info!(
            tenant = %tenant,
            project_id = %project_id,
            actual_costs = %result.actual_costs,
            profitability = %result.profitability_percentage,
            "Calculated project profitability"
        );
        Ok(result)
    }

    async fn actual_costs(
        &self,
        tenant: &TenantId,
        project: &Project,
        today: Date,
        cancel: &CancellationToken,
    ) -> Result<Decimal, Rejection> {
        let hours: Vec<Decimal> =
            try_join_all(project.assignments().iter().map(|assignment| {
                let period: &DateRange = assignment.period();
                self.time_entries.get_total_hours_by_employee(
                    tenant,
                    assignment.employee_id(),
                    period.start_date(),
                    period.end_date().unwrap_or(today),
                    true,
                    cancel,
                )
            }))
            .await?;

        let costs: Vec<Decimal> = project
            .assignments()
            .iter()
            .zip(hours)
            .map(|(assignment, hours)| {
                hours
                    .checked_mul(assignment.hourly_rate())
                    .ok_or(DomainError::ArithmeticOverflow {
                        operation: "costing billable hours",
                    })
            })
            .collect::<Result<_, _>>()?;

        Ok(checked_total(costs, "totalling actual costs")?)
    }

    /// Compares logged hours with expected hours for every assignment on
    /// `project_id`.
    ///
    /// The window defaults to the project period, ending today for an
    /// open-ended project. Expected hours are working days (Monday to Friday)
    /// in the window, times the policy's hours per day, times the allocation.
    ///
    /// # Errors
    ///
    /// Returns an `OperationFailure` if the project does not exist, the window
    /// ends before it starts, or a repository call fails.
    pub async fn analyze_project_resource_utilization(
        &self,
        tenant: &TenantId,
        project_id: ProjectId,
        start: Option<Date>,
        end: Option<Date>,
        cancel: &CancellationToken,
    ) -> ServiceResult<ResourceUtilization> {
        let outcome: Result<ResourceUtilization, Rejection> =
            self.utilization(tenant, project_id, start, end, cancel).await;
        fold(UTILIZATION_CONTEXT, outcome)
    }

    async fn utilization(
        &self,
        tenant: &TenantId,
        project_id: ProjectId,
        start: Option<Date>,
        end: Option<Date>,
        cancel: &CancellationToken,
    ) -> Result<ResourceUtilization, Rejection> {
        let project: Project = self.load_project(tenant, project_id, cancel).await?;

        let analysis_start: Date = start.unwrap_or_else(|| project.period().start_date());
        let analysis_end: Date = end
            .or_else(|| project.period().end_date())
            .unwrap_or_else(|| self.clock.today());
        if analysis_end < analysis_start {
            return Err(DomainError::InvalidDateRange {
                start: analysis_start,
                end: analysis_end,
            }
            .into());
        }

        let full_time_hours: Decimal = Decimal::from(working_days_between(analysis_start, analysis_end))
            * Decimal::from(self.policy.hours_per_day);

        let employee_utilizations: Vec<EmployeeUtilization> =
            try_join_all(project.assignments().iter().map(|assignment| {
                self.assignment_utilization(
                    tenant,
                    assignment,
                    analysis_start,
                    analysis_end,
                    full_time_hours,
                    cancel,
                )
            }))
            .await?;

        let count: Decimal = Decimal::from(employee_utilizations.len());
        let average = |rate: fn(&EmployeeUtilization) -> Decimal| -> Decimal {
            if count.is_zero() {
                Decimal::ZERO
            } else {
                employee_utilizations.iter().map(rate).sum::<Decimal>() / count
            }
        };
        let average_utilization_rate: Decimal = average(|u| u.utilization_rate);
        let average_billable_rate: Decimal = average(|u| u.billable_rate);

        let result: ResourceUtilization = ResourceUtilization {
            project_id,
            analysis_start,
            analysis_end,
            average_utilization_rate,
            average_billable_rate,
            total_expected_hours: employee_utilizations.iter().map(|u| u.expected_hours).sum(),
            total_actual_hours: employee_utilizations.iter().map(|u| u.actual_hours).sum(),
            total_billable_hours: employee_utilizations.iter().map(|u| u.billable_hours).sum(),
            employee_utilizations,
        };

        info!(
            tenant = %tenant,
            project_id = %project_id,
            assignees = result.employee_utilizations.len(),
            average_utilization = %result.average_utilization_rate,
            "Analyzed resource utilization"
        );
        Ok(result)
    }

    async fn assignment_utilization(
        &self,
        tenant: &TenantId,
        assignment: &ProjectAssignment,
        start: Date,
        end: Date,
        full_time_hours: Decimal,
        cancel: &CancellationToken,
    ) -> Result<EmployeeUtilization, RepositoryError> {
        let employee_id: EmployeeId = assignment.employee_id();
        let (actual_hours, billable_hours, employee): (Decimal, Decimal, Option<Employee>) = try_join!(
            self.time_entries
                .get_total_hours_by_employee(tenant, employee_id, start, end, false, cancel),
            self.time_entries
                .get_total_hours_by_employee(tenant, employee_id, start, end, true, cancel),
            self.employees.get_by_id(tenant, employee_id, cancel),
        )?;

        let expected_hours: Decimal = full_time_hours
            * Decimal::from(assignment.allocation_percentage())
            / Decimal::ONE_HUNDRED;

        Ok(EmployeeUtilization {
            employee_id,
            employee_name: employee.map(|e| e.name().to_string()),
            role: assignment.role().to_string(),
            allocation_percentage: assignment.allocation_percentage(),
            expected_hours,
            actual_hours,
            billable_hours,
            utilization_rate: percentage_of(actual_hours, expected_hours),
            billable_rate: percentage_of(billable_hours, actual_hours),
        })
    }

    /// Scores how likely `project` is to finish well.
    ///
    /// Pure: reads nothing but the aggregate and the clock.
    #[must_use]
    pub fn assess_project_completion(&self, project: &Project) -> CompletionAssessment {
        let today: Date = self.clock.today();
        let progress: Decimal = project.calculate_progress();
        let is_on_schedule: bool = self.is_on_schedule(project, progress, today);
        let is_within_budget: bool = !project.is_over_budget(today);
        let completed_milestones: usize = project.completed_milestones().len();
        let total_milestones: usize = project.milestones().len();
        let overdue_milestones: usize = project.overdue_milestones(today).len();

        let mut recommendations: Vec<String> = Vec::new();
        if !is_within_budget {
            recommendations.push(String::from(
                "Project is over budget. Consider cost optimization measures.",
            ));
        }
        if overdue_milestones > 0 {
            recommendations.push(format!(
                "There are {overdue_milestones} overdue milestones. Review project timeline."
            ));
        }
        if project.risk_level() == RiskLevel::High {
            recommendations.push(String::from(
                "High risk project requires increased monitoring and risk mitigation.",
            ));
        }
        if !is_on_schedule {
            recommendations.push(String::from(
                "Project appears to be behind schedule. Consider resource reallocation.",
            ));
        }

        let mut probability: Decimal =
            Decimal::from(50) + progress * Decimal::new(3, 1);
        probability += if is_on_schedule {
            Decimal::from(20)
        } else {
            Decimal::from(-15)
        };
        probability += if is_within_budget {
            Decimal::from(15)
        } else {
            Decimal::from(-20)
        };
        probability -= Decimal::from(project.risk_level().ordinal()) * Decimal::from(5);
        if total_milestones > 0 {
            probability += Decimal::from(completed_milestones) / Decimal::from(total_milestones)
                * Decimal::from(15);
        }
        probability -= Decimal::from(overdue_milestones) * Decimal::from(5);

        CompletionAssessment {
            project_id: project.id(),
            current_status: project.status(),
            progress,
            is_on_schedule,
            is_within_budget,
            risk_level: project.risk_level(),
            completed_milestones,
            total_milestones,
            overdue_milestones,
            completion_probability: probability.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED),
            recommendations,
        }
    }

    /// Progress may trail elapsed time by the policy tolerance. Projects
    /// without an end date are always on schedule.
    fn is_on_schedule(&self, project: &Project, progress: Decimal, today: Date) -> bool {
        let Some(end) = project.period().end_date() else {
            return true;
        };
        let start: Date = project.period().start_date();
        let total_days: i64 = days_between(start, end);
        if total_days == 0 {
            return true;
        }

        let expected: Decimal = Decimal::from(days_between(start, today))
            / Decimal::from(total_days)
            * Decimal::ONE_HUNDRED;
        progress >= expected - self.policy.schedule_tolerance_percent
    }

    async fn load_project(
        &self,
        tenant: &TenantId,
        project_id: ProjectId,
        cancel: &CancellationToken,
    ) -> Result<Project, Rejection> {
        require_id(project_id.is_nil(), "project_id")?;
        self.projects
            .get_by_id(tenant, project_id, cancel)
            .await?
            .ok_or_else(|| Rejection::business("Project not found"))
    }
}

const fn require_id(is_nil: bool, field: &'static str) -> Result<(), DomainError> {
    if is_nil {
        return Err(DomainError::InvalidIdentifier { field });
    }
    Ok(())
}

/// `part / budget * 100` for a non-zero budget.
fn share_of_budget(part: Decimal, budget: Decimal) -> Result<Decimal, DomainError> {
    part.checked_div(budget)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(DomainError::ArithmeticOverflow {
            operation: "comparing costs with the budget",
        })
}

/// `part / whole * 100`, or zero when `whole` is not positive.
fn percentage_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole > Decimal::ZERO {
        part / whole * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}
