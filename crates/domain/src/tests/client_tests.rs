// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{TODAY, create_test_project, create_test_tenant, usd};
use crate::{Client, ClientImportance, DomainError, Project, ProjectStatus};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn create_test_client() -> Client {
    Client::new(
        create_test_tenant(),
        "Northwind Traders",
        Some(String::from("Retail")),
    )
    .unwrap()
}

fn project_with(status: ProjectStatus, budget: Decimal) -> Project {
    let mut project: Project = create_test_project();
    project.update_budget(usd(budget), Decimal::ZERO).unwrap();
    let path: &[ProjectStatus] = match status {
        ProjectStatus::Planning => &[],
        ProjectStatus::Active => &[ProjectStatus::Active],
        ProjectStatus::OnHold => &[ProjectStatus::Active, ProjectStatus::OnHold],
        ProjectStatus::Completed => &[ProjectStatus::Active, ProjectStatus::Completed],
        ProjectStatus::Cancelled => &[ProjectStatus::Cancelled],
    };
    for step in path {
        project.change_status(*step).unwrap();
    }
    project
}

#[test]
fn test_new_client_requires_company_name() {
    let result: Result<Client, DomainError> = Client::new(create_test_tenant(), "", None);
    assert!(matches!(
        result,
        Err(DomainError::EmptyField {
            field: "company_name"
        })
    ));
}

#[test]
fn test_contact_info_validates_email() {
    let mut client: Client = create_test_client();

    let result: Result<(), DomainError> = client.update_contact_info(
        Some(String::from("Ann")),
        Some(String::from("ann@@example")),
        None,
    );
    assert!(matches!(result, Err(DomainError::InvalidEmail(_))));
    assert_eq!(client.contact_person(), None);

    client
        .update_contact_info(
            Some(String::from("Ann")),
            Some(String::from("ann@northwind.com")),
            Some(String::from("555-0100")),
        )
        .unwrap();
    assert_eq!(client.contact_email(), Some("ann@northwind.com"));

    // Blank e-mail clears the field rather than failing
    client
        .update_contact_info(Some(String::from("Ann")), Some(String::new()), None)
        .unwrap();
    assert_eq!(client.contact_email(), None);
}

#[test]
fn test_contract_value_rejects_negative() {
    let mut client: Client = create_test_client();
    assert!(client.set_contract_value(Some(dec!(-5))).is_err());
    client.set_contract_value(Some(dec!(60000))).unwrap();
    assert!(client.is_vip_client());
    client.set_contract_value(None).unwrap();
    assert!(!client.is_vip_client());
}

#[test]
fn test_update_basic_info() {
    let mut client: Client = create_test_client();
    client
        .update_basic_info("Northwind", None, Some(String::from("Large")))
        .unwrap();
    assert_eq!(client.company_name(), "Northwind");
    assert_eq!(client.industry(), None);
    assert_eq!(client.client_size(), Some("Large"));
    assert!(client.update_basic_info(" ", None, None).is_err());

    client.update_address(Some(String::from("1 Harbour Way")));
    assert_eq!(client.address(), Some("1 Harbour Way"));
}

#[test]
fn test_project_derived_metrics() {
    let mut client: Client = create_test_client();
    let projects: Vec<Project> = vec![
        project_with(ProjectStatus::Planning, dec!(1000)),
        project_with(ProjectStatus::Active, dec!(2000)),
        project_with(ProjectStatus::Completed, dec!(3000)),
        project_with(ProjectStatus::Cancelled, dec!(4000)),
    ];
    client.attach_projects(&projects);

    assert_eq!(client.total_projects_count(), 4);
    assert_eq!(client.active_projects_count(), 1);
    assert_eq!(client.get_active_projects().len(), 2);
    assert!(client.has_active_projects());
    assert!(!client.can_be_deleted());
    assert_eq!(client.get_completed_projects_count(), 1);
    assert_eq!(client.get_total_project_budget(), dec!(6000));
    assert_eq!(client.average_project_budget(), dec!(2000));
    // One completed out of three past planning
    assert_eq!(
        client.success_rate().round_dp(2),
        dec!(33.33)
    );
    assert_eq!(client.get_client_importance(), ClientImportance::Medium);
}

#[test]
fn test_success_rate_without_started_projects_is_zero() {
    let mut client: Client = create_test_client();
    let projects: Vec<Project> = vec![project_with(ProjectStatus::Planning, dec!(1000))];
    client.attach_projects(&projects);

    assert_eq!(client.success_rate(), Decimal::ZERO);
    assert_eq!(client.get_client_importance(), ClientImportance::Low);
}

#[test]
fn test_importance_thresholds() {
    let mut client: Client = create_test_client();
    assert_eq!(client.get_client_importance(), ClientImportance::Low);

    let big: Vec<Project> = vec![project_with(ProjectStatus::Active, dec!(100000))];
    client.attach_projects(&big);
    assert_eq!(client.get_client_importance(), ClientImportance::High);
    assert!(client.is_vip_client());

    let many: Vec<Project> = (0..5)
        .map(|_| project_with(ProjectStatus::Planning, dec!(10)))
        .collect();
    client.attach_projects(&many);
    assert_eq!(client.get_client_importance(), ClientImportance::High);

    let medium: Vec<Project> = vec![project_with(ProjectStatus::Active, dec!(25000))];
    client.attach_projects(&medium);
    assert_eq!(client.get_client_importance(), ClientImportance::Medium);
}

#[test]
fn test_closed_client_can_be_deleted() {
    let mut client: Client = create_test_client();
    let projects: Vec<Project> = vec![
        project_with(ProjectStatus::Completed, dec!(500)),
        project_with(ProjectStatus::OnHold, dec!(500)),
    ];
    client.attach_projects(&projects);

    assert!(!client.has_active_projects());
    assert!(client.can_be_deleted());
}

#[test]
fn test_annual_revenue_and_relationship() {
    let mut client: Client = create_test_client();
    assert_eq!(client.get_relationship_duration_in_days(TODAY), 0);
    assert!(client.is_new_client(TODAY));
    assert!(client.get_latest_project().is_none());

    let projects: Vec<Project> = vec![
        project_with(ProjectStatus::Completed, dec!(1500)),
        project_with(ProjectStatus::Completed, dec!(2500)),
        project_with(ProjectStatus::Active, dec!(9000)),
    ];
    client.attach_projects(&projects);

    let year: i32 = projects[0].created_at().year();
    assert_eq!(client.get_annual_revenue(year), dec!(4000));
    assert_eq!(client.get_annual_revenue(year - 1), Decimal::ZERO);
    assert!(client.get_latest_project().is_some());
}

#[test]
fn test_budget_totals_saturate_instead_of_overflowing() {
    let mut client: Client = create_test_client();
    let projects: Vec<Project> = vec![
        project_with(ProjectStatus::Completed, Decimal::MAX),
        project_with(ProjectStatus::Completed, Decimal::MAX),
    ];
    client.attach_projects(&projects);

    let year: i32 = projects[0].created_at().year();
    assert_eq!(client.get_total_project_budget(), Decimal::MAX);
    assert_eq!(client.get_annual_revenue(year), Decimal::MAX);
    assert_eq!(client.get_client_importance(), ClientImportance::High);
}

#[test]
fn test_client_display() {
    let client: Client = create_test_client();
    assert_eq!(
        client.to_string(),
        "Northwind Traders (Retail) - 0 active projects"
    );
}
