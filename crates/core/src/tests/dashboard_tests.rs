// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{Fixture, TODAY, create_test_fixture, range, usd};
use crate::{DashboardSummary, MetricsPolicy, OperationFailure, ProjectStatusSummary};
use erp_domain::{
    Client, ClientId, Employee, EmployeeId, EmployeeStatus, Money, Project, ProjectCode, ProjectId,
    ProjectStatus, TimeEntry,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;
use time::macros::date;

fn project_for(
    fixture: &Fixture,
    code: &str,
    client_id: ClientId,
    budget: i64,
    path: &[ProjectStatus],
) -> Project {
    let (mut project, _event) = Project::new(
        fixture.tenant.clone(),
        ProjectCode::new(code).unwrap(),
        "Data Platform",
        client_id,
        EmployeeId::new(),
        range(date!(2024 - 01 - 01), date!(2024 - 12 - 31)),
        Some(usd(budget)),
    )
    .unwrap();
    for status in path {
        project.change_status(*status).unwrap();
    }
    project
}

#[tokio::test]
async fn test_summary_counts_and_recent_projects() {
    let fixture: Fixture = create_test_fixture();
    let client: Client = Client::new(fixture.tenant.clone(), "Initech", None).unwrap();
    fixture.save_client(&client).await;

    // Created oldest first; the sleeps keep creation timestamps distinct
    let specs: [(&str, ClientId, i64, &[ProjectStatus]); 4] = [
        ("WEB-2024-02", ClientId::new(), 4_000, &[ProjectStatus::Active]),
        (
            "WEB-2024-03",
            ClientId::new(),
            6_000,
            &[ProjectStatus::Active, ProjectStatus::OnHold],
        ),
        ("WEB-2024-04", ClientId::new(), 2_000, &[]),
        (
            "WEB-2024-01",
            client.id(),
            10_000,
            &[ProjectStatus::Active, ProjectStatus::Completed],
        ),
    ];
    for (code, client_id, budget, path) in specs {
        let project: Project = project_for(&fixture, code, client_id, budget, path);
        fixture.save_project(&project).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let active: Employee = fixture.create_test_employee("Pia Quinn", "pia@example.com");
    let mut away: Employee = fixture.create_test_employee("Rex Stone", "rex@example.com");
    away.change_status(EmployeeStatus::OnLeave, TODAY).unwrap();
    fixture.save_employee(&active).await;
    fixture.save_employee(&away).await;

    let project_id: ProjectId = ProjectId::new();
    let mut approved: TimeEntry =
        fixture.create_test_entry(active.id(), project_id, date!(2024 - 06 - 05), dec!(2), true);
    approved.approve(away.id()).unwrap();
    for entry in [
        fixture.create_test_entry(active.id(), project_id, date!(2024 - 06 - 03), dec!(8), true),
        fixture.create_test_entry(active.id(), project_id, date!(2024 - 06 - 04), dec!(4), false),
        fixture.create_test_entry(active.id(), project_id, date!(2024 - 05 - 31), dec!(8), true),
        approved,
    ] {
        fixture.save_entry(&entry).await;
    }

    let summary: DashboardSummary = fixture
        .dashboard()
        .with_policy(MetricsPolicy {
            recent_projects_limit: 3,
            ..MetricsPolicy::default()
        })
        .summary(&fixture.tenant, &fixture.cancel)
        .await
        .unwrap();

    assert_eq!(summary.total_projects, 4);
    assert_eq!(summary.active_projects, 1);
    assert_eq!(summary.completed_projects, 1);
    assert_eq!(summary.projects_on_hold, 1);
    assert_eq!(summary.total_employees, 2);
    assert_eq!(summary.active_employees, 1);
    assert_eq!(summary.total_revenue, dec!(10000));
    assert_eq!(summary.current_month_hours, dec!(14));
    assert_eq!(summary.current_month_billable_hours, dec!(10));
    assert_eq!(summary.pending_approval_count, 3);

    assert_eq!(summary.recent_projects.len(), 3);
    assert_eq!(summary.recent_projects[0].client_id, client.id());
    assert_eq!(
        summary.recent_projects[0].client_name.as_deref(),
        Some("Initech")
    );
    assert_eq!(summary.recent_projects[0].status, ProjectStatus::Completed);
    assert_eq!(summary.recent_projects[1].client_name, None);
    assert_eq!(summary.recent_projects[2].status, ProjectStatus::OnHold);
}

#[tokio::test]
async fn test_empty_tenant_has_empty_summary() {
    let fixture: Fixture = create_test_fixture();

    let summary: DashboardSummary = fixture
        .dashboard()
        .summary(&fixture.tenant, &fixture.cancel)
        .await
        .unwrap();

    assert_eq!(summary.total_projects, 0);
    assert_eq!(summary.total_revenue, Decimal::ZERO);
    assert_eq!(summary.current_month_hours, Decimal::ZERO);
    assert!(summary.recent_projects.is_empty());
}

#[tokio::test]
async fn test_status_summary_follows_lifecycle_order() {
    let fixture: Fixture = create_test_fixture();
    let projects: [Project; 4] = [
        project_for(
            &fixture,
            "OPS-2024-01",
            ClientId::new(),
            3_000,
            &[ProjectStatus::Active],
        ),
        project_for(&fixture, "OPS-2024-02", ClientId::new(), 2_500, &[]),
        project_for(
            &fixture,
            "OPS-2024-03",
            ClientId::new(),
            4_000,
            &[ProjectStatus::Active],
        ),
        project_for(
            &fixture,
            "OPS-2024-04",
            ClientId::new(),
            1_000,
            &[ProjectStatus::Cancelled],
        ),
    ];
    for project in &projects {
        fixture.save_project(project).await;
    }

    let summary: Vec<ProjectStatusSummary> = fixture
        .dashboard()
        .project_status_summary(&fixture.tenant, &fixture.cancel)
        .await
        .unwrap();

    let statuses: Vec<ProjectStatus> = summary.iter().map(|s| s.status).collect();
    assert_eq!(
        statuses,
        [
            ProjectStatus::Planning,
            ProjectStatus::Active,
            ProjectStatus::Cancelled
        ]
    );
    assert_eq!(summary[1].count, 2);
    assert_eq!(summary[1].total_budget, dec!(7000));
    assert_eq!(summary[1].average_budget, dec!(3500));
    assert_eq!(summary[0].average_budget, dec!(2500));
}

#[tokio::test]
async fn test_status_summary_reports_budget_overflow() {
    let fixture: Fixture = create_test_fixture();
    for code in ["BIG-2024-01", "BIG-2024-02"] {
        let budget: Money = Money::new(Decimal::MAX, "USD").unwrap();
        let project: Project = fixture.create_project_with(
            code,
            range(date!(2024 - 01 - 01), date!(2024 - 12 - 31)),
            Some(budget),
        );
        fixture.save_project(&project).await;
    }

    let failure: OperationFailure = fixture
        .dashboard()
        .project_status_summary(&fixture.tenant, &fixture.cancel)
        .await
        .unwrap_err();

    let message: &str = &failure.errors()[0];
    assert!(message.starts_with("Error generating status summary: Domain violation: Arithmetic overflow"));
}
