// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{Fixture, create_test_fixture, range, usd};
use crate::{
    EmployeeUtilization, MetricsPolicy, OperationFailure, ProjectDomainService,
    ResourceUtilization,
};
use erp_domain::{DateRange, Employee, EmployeeId, Project, TimeEntry};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use time::macros::date;

/// Two weeks (ten working days) with one known assignee at 50% and one
/// assignee whose employee record is missing, at 100%.
async fn two_week_project(fixture: &Fixture) -> (Project, Employee, EmployeeId) {
    let employee: Employee = fixture.create_test_employee("Ola Reyes", "ola@example.com");
    let ghost: EmployeeId = EmployeeId::new();
    let period: DateRange = range(date!(2024 - 06 - 03), date!(2024 - 06 - 14));
    let mut project: Project =
        fixture.create_project_with("OPS-2024-06", period, Some(usd(20_000)));
    project
        .assign_employee(employee.id(), "Analyst", 50, period, Decimal::from(60))
        .unwrap();
    project
        .assign_employee(ghost, "Contractor", 100, period, Decimal::from(90))
        .unwrap();
    fixture.save_employee(&employee).await;
    fixture.save_project(&project).await;

    // 20 hours in the window, 15 of them billable, plus one entry outside it
    for (day, hours, billable) in [
        (date!(2024 - 06 - 03), dec!(8), true),
        (date!(2024 - 06 - 04), dec!(7), true),
        (date!(2024 - 06 - 05), dec!(5), false),
        (date!(2024 - 05 - 31), dec!(8), true),
    ] {
        let entry: TimeEntry =
            fixture.create_test_entry(employee.id(), project.id(), day, hours, billable);
        fixture.save_entry(&entry).await;
    }

    (project, employee, ghost)
}

#[tokio::test]
async fn test_utilization_over_project_period() {
    let fixture: Fixture = create_test_fixture();
    let (project, employee, ghost): (Project, Employee, EmployeeId) =
        two_week_project(&fixture).await;

    let result: ResourceUtilization = fixture
        .service()
        .analyze_project_resource_utilization(
            &fixture.tenant,
            project.id(),
            None,
            None,
            &fixture.cancel,
        )
        .await
        .unwrap();

    assert_eq!(result.analysis_start, date!(2024 - 06 - 03));
    assert_eq!(result.analysis_end, date!(2024 - 06 - 14));
    assert_eq!(result.employee_utilizations.len(), 2);

    let known: &EmployeeUtilization = &result.employee_utilizations[0];
    assert_eq!(known.employee_id, employee.id());
    assert_eq!(known.employee_name.as_deref(), Some("Ola Reyes"));
    assert_eq!(known.role, "Analyst");
    assert_eq!(known.expected_hours, dec!(40));
    assert_eq!(known.actual_hours, dec!(20));
    assert_eq!(known.billable_hours, dec!(15));
    assert_eq!(known.utilization_rate, dec!(50));
    assert_eq!(known.billable_rate, dec!(75));

    let missing: &EmployeeUtilization = &result.employee_utilizations[1];
    assert_eq!(missing.employee_id, ghost);
    assert_eq!(missing.employee_name, None);
    assert_eq!(missing.expected_hours, dec!(80));
    assert_eq!(missing.utilization_rate, Decimal::ZERO);
    assert_eq!(missing.billable_rate, Decimal::ZERO);

    assert_eq!(result.average_utilization_rate, dec!(25));
    assert_eq!(result.average_billable_rate, dec!(37.5));
    assert_eq!(result.total_expected_hours, dec!(120));
    assert_eq!(result.total_actual_hours, dec!(20));
    assert_eq!(result.total_billable_hours, dec!(15));
}

#[tokio::test]
async fn test_explicit_window_overrides_project_period() {
    let fixture: Fixture = create_test_fixture();
    let (project, _employee, _ghost): (Project, Employee, EmployeeId) =
        two_week_project(&fixture).await;

    // Monday and Tuesday only
    let result: ResourceUtilization = fixture
        .service()
        .analyze_project_resource_utilization(
            &fixture.tenant,
            project.id(),
            Some(date!(2024 - 06 - 03)),
            Some(date!(2024 - 06 - 04)),
            &fixture.cancel,
        )
        .await
        .unwrap();

    let known: &EmployeeUtilization = &result.employee_utilizations[0];
    assert_eq!(known.expected_hours, dec!(8));
    assert_eq!(known.actual_hours, dec!(15));
    assert_eq!(known.billable_rate, dec!(100));
    assert_eq!(known.utilization_rate, dec!(187.5));
}

#[tokio::test]
async fn test_hours_per_day_comes_from_policy() {
    let fixture: Fixture = create_test_fixture();
    let (project, _employee, _ghost): (Project, Employee, EmployeeId) =
        two_week_project(&fixture).await;
    let service: ProjectDomainService = fixture.service().with_policy(MetricsPolicy {
        hours_per_day: 6,
        ..MetricsPolicy::default()
    });

    let result: ResourceUtilization = service
        .analyze_project_resource_utilization(
            &fixture.tenant,
            project.id(),
            None,
            None,
            &fixture.cancel,
        )
        .await
        .unwrap();

    assert_eq!(result.total_expected_hours, dec!(90));
    assert_eq!(result.employee_utilizations[0].expected_hours, dec!(30));
}

#[tokio::test]
async fn test_project_without_assignments_has_zero_averages() {
    let fixture: Fixture = create_test_fixture();
    let project: Project = fixture.create_test_project("WEB-2024-01");
    fixture.save_project(&project).await;

    let result: ResourceUtilization = fixture
        .service()
        .analyze_project_resource_utilization(
            &fixture.tenant,
            project.id(),
            None,
            None,
            &fixture.cancel,
        )
        .await
        .unwrap();

    assert!(result.employee_utilizations.is_empty());
    assert_eq!(result.average_utilization_rate, Decimal::ZERO);
    assert_eq!(result.total_expected_hours, Decimal::ZERO);
}

#[tokio::test]
async fn test_window_ending_before_start_fails() {
    let fixture: Fixture = create_test_fixture();
    let (project, _employee, _ghost): (Project, Employee, EmployeeId) =
        two_week_project(&fixture).await;

    let failure: OperationFailure = fixture
        .service()
        .analyze_project_resource_utilization(
            &fixture.tenant,
            project.id(),
            Some(date!(2024 - 06 - 10)),
            Some(date!(2024 - 06 - 03)),
            &fixture.cancel,
        )
        .await
        .unwrap_err();
    assert!(
        failure
            .message()
            .starts_with("Error analyzing resource utilization: Domain violation: ")
    );
}
