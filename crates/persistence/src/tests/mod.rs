// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod employee_tests;

use erp_domain::{
    Client, ClientId, DateRange, Employee, EmployeeId, Money, Project, ProjectCode, TenantId,
    TimeEntry,
};
use rust_decimal::Decimal;
use time::Date;
use time::macros::date;

pub const TODAY: Date = date!(2024 - 06 - 15);

pub fn create_test_tenant() -> TenantId {
    TenantId::new("acme").unwrap()
}

pub fn create_other_tenant() -> TenantId {
    TenantId::new("globex").unwrap()
}

pub fn create_test_project(tenant: &TenantId, code: &str, client_id: ClientId) -> Project {
    let (project, _event) = Project::new(
        tenant.clone(),
        ProjectCode::new(code).unwrap(),
        "Platform Rebuild",
        client_id,
        EmployeeId::new(),
        DateRange::new(date!(2024 - 01 - 01), Some(date!(2024 - 12 - 31))).unwrap(),
        Some(Money::usd(Decimal::from(20_000)).unwrap()),
    )
    .unwrap();
    project
}

pub fn create_test_employee(tenant: &TenantId, name: &str, email: &str) -> Employee {
    Employee::new(tenant.clone(), name, email, date!(2021 - 03 - 01)).unwrap()
}

pub fn create_test_client(tenant: &TenantId, company_name: &str) -> Client {
    Client::new(tenant.clone(), company_name, None).unwrap()
}

pub fn create_test_entry(
    tenant: &TenantId,
    employee_id: EmployeeId,
    date: Date,
    hours: Decimal,
    billable: bool,
) -> TimeEntry {
    TimeEntry::new(
        tenant.clone(),
        employee_id,
        erp_domain::ProjectId::new(),
        date,
        hours,
        None,
        billable,
        TODAY,
    )
    .unwrap()
}
