// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{TODAY, create_test_employee, create_test_project, create_test_tenant};
use crate::InMemoryStore;
use erp_domain::{
    AssignmentId, ClientId, DateRange, Employee, EmployeeRepository, EmployeeStatus, Project,
    ProjectAssignment, ProjectId, ProjectRepository, RepositoryError, SkillLevel, TenantId,
};
use rust_decimal::Decimal;
use time::macros::date;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_email_lookup_is_case_insensitive() {
    let store: InMemoryStore = InMemoryStore::new();
    let tenant: TenantId = create_test_tenant();
    let cancel: CancellationToken = CancellationToken::new();
    let employee: Employee = create_test_employee(&tenant, "Ivy Chen", "ivy.chen@example.com");
    EmployeeRepository::add(&store, &tenant, &employee, &cancel).await.unwrap();

    assert!(
        store
            .exists_by_email(&tenant, "IVY.CHEN@example.com", &cancel)
            .await
            .unwrap()
    );
    let found: Option<Employee> = store
        .get_by_email(&tenant, " ivy.chen@EXAMPLE.com ", &cancel)
        .await
        .unwrap();
    assert_eq!(found.map(|e| e.id()), Some(employee.id()));

    let twin: Employee = create_test_employee(&tenant, "Ivy C.", "Ivy.Chen@example.com");
    assert!(matches!(
        EmployeeRepository::add(&store, &tenant, &twin, &cancel).await,
        Err(RepositoryError::Conflict(_))
    ));
}

#[tokio::test]
async fn test_get_by_skill_honours_minimum_level() {
    let store: InMemoryStore = InMemoryStore::new();
    let tenant: TenantId = create_test_tenant();
    let cancel: CancellationToken = CancellationToken::new();

    let mut senior: Employee = create_test_employee(&tenant, "Ari Roth", "ari@example.com");
    senior
        .add_or_update_skill("Rust", SkillLevel::Expert, 8, None, TODAY)
        .unwrap();
    let mut junior: Employee = create_test_employee(&tenant, "Bo Lind", "bo@example.com");
    junior
        .add_or_update_skill("rust", SkillLevel::Beginner, 1, None, TODAY)
        .unwrap();
    let outsider: Employee = create_test_employee(&tenant, "Cy Moss", "cy@example.com");

    for employee in [&senior, &junior, &outsider] {
        EmployeeRepository::add(&store, &tenant, employee, &cancel).await.unwrap();
    }

    let any_level: Vec<Employee> = store
        .get_by_skill(&tenant, "Rust", None, &cancel)
        .await
        .unwrap();
    assert_eq!(any_level.len(), 2);
    assert_eq!(any_level[0].name(), "Ari Roth");

    let advanced: Vec<Employee> = store
        .get_by_skill(&tenant, "Rust", Some(SkillLevel::Advanced), &cancel)
        .await
        .unwrap();
    assert_eq!(advanced.len(), 1);
    assert_eq!(advanced[0].id(), senior.id());
}

#[tokio::test]
async fn test_available_employees_excludes_full_and_inactive() {
    let store: InMemoryStore = InMemoryStore::new();
    let tenant: TenantId = create_test_tenant();
    let cancel: CancellationToken = CancellationToken::new();
    let period: DateRange =
        DateRange::new(date!(2024 - 07 - 01), Some(date!(2024 - 07 - 31))).unwrap();

    let free: Employee = create_test_employee(&tenant, "Dee Park", "dee@example.com");

    let mut busy: Employee = create_test_employee(&tenant, "Eli Ford", "eli@example.com");
    busy.attach_assignment(
        ProjectAssignment::new(
            ProjectId::new(),
            busy.id(),
            "Lead",
            100,
            DateRange::open(date!(2024 - 01 - 01)),
            Decimal::ZERO,
        )
        .unwrap(),
    );

    let mut on_leave: Employee = create_test_employee(&tenant, "Fay Gold", "fay@example.com");
    on_leave
        .change_status(EmployeeStatus::OnLeave, TODAY)
        .unwrap();

    for employee in [&free, &busy, &on_leave] {
        EmployeeRepository::add(&store, &tenant, employee, &cancel).await.unwrap();
    }

    let available: Vec<Employee> = store
        .get_available_employees(&tenant, &period, &cancel)
        .await
        .unwrap();
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id(), free.id());
}

#[tokio::test]
async fn test_update_keeps_email_unique() {
    let store: InMemoryStore = InMemoryStore::new();
    let tenant: TenantId = create_test_tenant();
    let cancel: CancellationToken = CancellationToken::new();

    let first: Employee = create_test_employee(&tenant, "Gus Hale", "gus@example.com");
    let mut second: Employee = create_test_employee(&tenant, "Hal Iver", "hal@example.com");
    EmployeeRepository::add(&store, &tenant, &first, &cancel).await.unwrap();
    EmployeeRepository::add(&store, &tenant, &second, &cancel).await.unwrap();

    second
        .update_personal_info("Hal Iver", "gus@example.com")
        .unwrap();
    assert!(matches!(
        EmployeeRepository::update(&store, &tenant, &second, &cancel).await,
        Err(RepositoryError::Conflict(_))
    ));

    // Re-saving an employee under its own address is fine
    EmployeeRepository::update(&store, &tenant, &first, &cancel).await.unwrap();
    EmployeeRepository::delete(&store, &tenant, first.id(), &cancel).await.unwrap();
    assert_eq!(EmployeeRepository::get_all(&store, &tenant, &cancel).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_employees_carry_project_assignments() {
    let store: InMemoryStore = InMemoryStore::new();
    let tenant: TenantId = create_test_tenant();
    let cancel: CancellationToken = CancellationToken::new();
    let employee: Employee = create_test_employee(&tenant, "Kai Lund", "kai@example.com");
    EmployeeRepository::add(&store, &tenant, &employee, &cancel)
        .await
        .unwrap();

    let mut project: Project = create_test_project(&tenant, "WEB-2024-01", ClientId::new());
    project
        .assign_employee(
            employee.id(),
            "Developer",
            60,
            DateRange::new(date!(2024 - 02 - 01), Some(date!(2024 - 09 - 30))).unwrap(),
            Decimal::from(90),
        )
        .unwrap();
    ProjectRepository::add(&store, &tenant, &project, &cancel)
        .await
        .unwrap();

    let loaded: Employee = EmployeeRepository::get_by_id(&store, &tenant, employee.id(), &cancel)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(loaded.assignments().len(), 1);
    assert_eq!(loaded.current_total_allocation(TODAY), 60);

    let july: DateRange =
        DateRange::new(date!(2024 - 07 - 01), Some(date!(2024 - 07 - 31))).unwrap();
    assert_eq!(loaded.available_allocation(&july), 40);
}

#[tokio::test]
async fn test_termination_ends_assignments_held_by_projects() {
    let store: InMemoryStore = InMemoryStore::new();
    let tenant: TenantId = create_test_tenant();
    let cancel: CancellationToken = CancellationToken::new();
    let employee: Employee = create_test_employee(&tenant, "Lea Voss", "lea@example.com");
    EmployeeRepository::add(&store, &tenant, &employee, &cancel)
        .await
        .unwrap();

    let mut project: Project = create_test_project(&tenant, "WEB-2024-02", ClientId::new());
    project
        .assign_employee(
            employee.id(),
            "Analyst",
            80,
            DateRange::open(date!(2024 - 02 - 01)),
            Decimal::from(75),
        )
        .unwrap();
    ProjectRepository::add(&store, &tenant, &project, &cancel)
        .await
        .unwrap();

    let mut loaded: Employee = EmployeeRepository::get_by_id(&store, &tenant, employee.id(), &cancel)
        .await
        .unwrap()
        .unwrap();
    let ended: Vec<AssignmentId> = loaded
        .change_status(EmployeeStatus::Terminated, TODAY)
        .unwrap();
    assert_eq!(ended, vec![project.assignments()[0].id()]);
    EmployeeRepository::update(&store, &tenant, &loaded, &cancel)
        .await
        .unwrap();

    let reloaded: Employee = EmployeeRepository::get_by_id(&store, &tenant, employee.id(), &cancel)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.status(), EmployeeStatus::Terminated);
    assert_eq!(reloaded.assignments()[0].period().end_date(), Some(TODAY));

    let stored: Project = ProjectRepository::get_by_id(&store, &tenant, project.id(), &cancel)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.assignments()[0].period().end_date(), Some(TODAY));
}
