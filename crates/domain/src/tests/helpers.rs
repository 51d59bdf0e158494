// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ClientId, DateRange, Employee, EmployeeId, Money, Project, ProjectCode, TenantId,
};
use rust_decimal::Decimal;
use time::Date;
use time::macros::date;

pub const TODAY: Date = date!(2024 - 06 - 15);

pub fn create_test_tenant() -> TenantId {
    TenantId::new("acme").unwrap()
}

pub fn range(start: Date, end: Date) -> DateRange {
    DateRange::new(start, Some(end)).unwrap()
}

pub fn usd(amount: Decimal) -> Money {
    Money::usd(amount).unwrap()
}

/// A Planning project running through 2024 with a 10,000 USD budget.
pub fn create_test_project() -> Project {
    let (project, _event) = Project::new(
        create_test_tenant(),
        ProjectCode::new("WEB-2024-01").unwrap(),
        "Website Relaunch",
        ClientId::new(),
        EmployeeId::new(),
        range(date!(2024 - 01 - 01), date!(2024 - 12 - 31)),
        Some(usd(Decimal::from(10_000))),
    )
    .unwrap();
    project
}

pub fn create_test_employee() -> Employee {
    Employee::new(
        create_test_tenant(),
        "Dana Kim",
        "dana.kim@example.com",
        date!(2020 - 01 - 01),
    )
    .unwrap()
}
