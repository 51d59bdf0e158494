// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use erp_domain::{EmployeeId, Money, ProjectId, ProjectStatus, RiskLevel};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;

/// Budget versus cost for one project.
///
/// Profits are signed: negative when costs exceed the budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectProfitability {
    pub project_id: ProjectId,
    pub budget: Money,
    /// Cost projected from the project's assignments.
    pub estimated_costs: Money,
    /// Billable hours logged within each assignment window, times its rate.
    pub actual_costs: Money,
    pub profit_margin: Decimal,
    pub estimated_profit: Decimal,
    pub actual_profit: Decimal,
    /// `(budget - actual) / budget * 100`, zero for a zero budget.
    pub profitability_percentage: Decimal,
    pub is_over_budget: bool,
    /// `actual / budget * 100`, zero for a zero budget.
    pub budget_utilization: Decimal,
}

/// Logged versus expected hours for one assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUtilization {
    pub employee_id: EmployeeId,
    /// `None` when the employee record could not be found.
    pub employee_name: Option<String>,
    pub role: String,
    pub allocation_percentage: u8,
    pub expected_hours: Decimal,
    pub actual_hours: Decimal,
    pub billable_hours: Decimal,
    pub utilization_rate: Decimal,
    pub billable_rate: Decimal,
}

/// Utilization of everyone assigned to a project over an analysis window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUtilization {
    pub project_id: ProjectId,
    pub analysis_start: Date,
    pub analysis_end: Date,
    pub employee_utilizations: Vec<EmployeeUtilization>,
    pub average_utilization_rate: Decimal,
    pub average_billable_rate: Decimal,
    pub total_expected_hours: Decimal,
    pub total_actual_hours: Decimal,
    pub total_billable_hours: Decimal,
}

/// Heuristic health check of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionAssessment {
    pub project_id: ProjectId,
    pub current_status: ProjectStatus,
    pub progress: Decimal,
    pub is_on_schedule: bool,
    pub is_within_budget: bool,
    pub risk_level: RiskLevel,
    pub completed_milestones: usize,
    pub total_milestones: usize,
    pub overdue_milestones: usize,
    /// Score in `[0, 100]`.
    pub completion_probability: Decimal,
    pub recommendations: Vec<String>,
}
