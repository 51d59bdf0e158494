// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DashboardService, ProjectDomainService};
use erp_domain::{
    Client, ClientId, ClientRepository, DateRange, Employee, EmployeeId, EmployeeRepository,
    FixedClock, Money, Project, ProjectCode, ProjectId, ProjectRepository, TenantId, TimeEntry,
    TimeEntryRepository,
};
use erp_persistence::InMemoryStore;
use rust_decimal::Decimal;
use std::sync::Arc;
use time::Date;
use time::macros::date;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// A Saturday.
pub const TODAY: Date = date!(2024 - 06 - 15);

/// Routes service logs to the test harness. `RUST_LOG` overrides the level.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .with_test_writer()
        .try_init();
}

pub fn range(start: Date, end: Date) -> DateRange {
    DateRange::new(start, Some(end)).unwrap()
}

pub fn usd(amount: i64) -> Money {
    Money::usd(Decimal::from(amount)).unwrap()
}

/// One tenant's view of a fresh in-memory store.
pub struct Fixture {
    pub store: Arc<InMemoryStore>,
    pub tenant: TenantId,
    pub cancel: CancellationToken,
}

pub fn create_test_fixture() -> Fixture {
    init_test_tracing();
    Fixture {
        store: Arc::new(InMemoryStore::new()),
        tenant: TenantId::new("acme").unwrap(),
        cancel: CancellationToken::new(),
    }
}

impl Fixture {
    pub fn service(&self) -> ProjectDomainService {
        ProjectDomainService::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            Arc::new(FixedClock::on(TODAY)),
        )
    }

    pub fn dashboard(&self) -> DashboardService {
        DashboardService::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            Arc::new(FixedClock::on(TODAY)),
        )
    }

    /// A Planning project with the given code, running through 2024 with a
    /// 10,000 USD budget.
    pub fn create_test_project(&self, code: &str) -> Project {
        self.create_project_with(code, range(date!(2024 - 01 - 01), date!(2024 - 12 - 31)), Some(usd(10_000)))
    }

    pub fn create_project_with(
        &self,
        code: &str,
        period: DateRange,
        budget: Option<Money>,
    ) -> Project {
        let (project, _event) = Project::new(
            self.tenant.clone(),
            ProjectCode::new(code).unwrap(),
            "Claims Portal",
            ClientId::new(),
            EmployeeId::new(),
            period,
            budget,
        )
        .unwrap();
        project
    }

    pub fn create_test_employee(&self, name: &str, email: &str) -> Employee {
        Employee::new(self.tenant.clone(), name, email, date!(2020 - 01 - 01)).unwrap()
    }

    pub fn create_test_entry(
        &self,
        employee_id: EmployeeId,
        project_id: ProjectId,
        date: Date,
        hours: Decimal,
        billable: bool,
    ) -> TimeEntry {
        TimeEntry::new(
            self.tenant.clone(),
            employee_id,
            project_id,
            date,
            hours,
            None,
            billable,
            TODAY,
        )
        .unwrap()
    }

    pub async fn save_project(&self, project: &Project) {
        ProjectRepository::add(self.store.as_ref(), &self.tenant, project, &self.cancel)
            .await
            .unwrap();
    }

    pub async fn save_employee(&self, employee: &Employee) {
        EmployeeRepository::add(self.store.as_ref(), &self.tenant, employee, &self.cancel)
            .await
            .unwrap();
    }

    pub async fn save_client(&self, client: &Client) {
        ClientRepository::add(self.store.as_ref(), &self.tenant, client, &self.cancel)
            .await
            .unwrap();
    }

    pub async fn save_entry(&self, entry: &TimeEntry) {
        TimeEntryRepository::add(self.store.as_ref(), &self.tenant, entry, &self.cancel)
            .await
            .unwrap();
    }
}
