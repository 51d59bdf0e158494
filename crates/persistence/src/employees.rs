// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::{InMemoryStore, TenantData, ensure_same_tenant, same_text};
use async_trait::async_trait;
use erp_domain::{
    DateRange, Employee, EmployeeId, EmployeeRepository, Project, ProjectId, RepositoryError,
    RepositoryResult, SkillLevel, TenantId,
};
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Returns a copy of `employee` carrying every assignment its tenant's
/// projects hold for it.
fn hydrate(data: &TenantData, employee: &Employee) -> Employee {
    let id: EmployeeId = employee.id();
    let mut hydrated: Employee = employee.clone();
    for assignment in data
        .projects
        .values()
        .flat_map(Project::assignments)
        .filter(|assignment| assignment.employee_id() == id)
    {
        hydrated.attach_assignment(assignment.clone());
    }
    hydrated
}

/// Carries assignment end dates recorded on `employee` over to the owning
/// projects. Only ever shortens a stored period.
fn end_project_assignments(data: &mut TenantData, employee: &Employee) -> RepositoryResult<()> {
    let mut staged: HashMap<ProjectId, Project> = HashMap::new();
    for assignment in employee.assignments() {
        let Some(end) = assignment.period().end_date() else {
            continue;
        };
        let project_id: ProjectId = assignment.project_id();
        let Some(stored) = staged
            .get(&project_id)
            .or_else(|| data.projects.get(&project_id))
        else {
            continue;
        };
        let needs_end: bool = stored
            .assignments()
            .iter()
            .find(|a| a.id() == assignment.id())
            .is_some_and(|a| a.period().end_date().is_none_or(|stored_end| stored_end > end));
        if !needs_end {
            continue;
        }

        let mut project: Project = stored.clone();
        project
            .end_assignment(assignment.id(), end)
            .map_err(|err| RepositoryError::Conflict(err.to_string()))?;
        staged.insert(project_id, project);
    }

    data.projects.extend(staged);
    Ok(())
}

fn select<P>(data: &TenantData, predicate: P) -> Vec<Employee>
where
    P: Fn(&Employee) -> bool,
{
    let mut employees: Vec<Employee> = data
        .employees
        .values()
        .map(|employee| hydrate(data, employee))
        .filter(|employee| predicate(employee))
        .collect();
    employees.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(&b.id())));
    employees
}

fn email_taken(data: &TenantData, email: &str, except: Option<EmployeeId>) -> bool {
    data.employees
        .values()
        .any(|employee| same_text(employee.email(), email) && Some(employee.id()) != except)
}

#[async_trait]
impl EmployeeRepository for InMemoryStore {
    async fn get_by_id(
        &self,
        tenant: &TenantId,
        id: EmployeeId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<Employee>> {
        self.read(tenant, cancel, |data| {
            data.employees.get(&id).map(|employee| hydrate(data, employee))
        })
        .await
    }

    async fn get_all(
        &self,
        tenant: &TenantId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Employee>> {
        self.read(tenant, cancel, |data| select(data, |_| true)).await
    }

    async fn get_by_skill(
        &self,
        tenant: &TenantId,
        technology: &str,
        min_level: Option<SkillLevel>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Employee>> {
        self.read(tenant, cancel, |data| {
            select(data, |employee| employee.has_skill(technology, min_level))
        })
        .await
    }

    async fn get_available_employees(
        &self,
        tenant: &TenantId,
        period: &DateRange,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Employee>> {
        self.read(tenant, cancel, |data| {
            select(data, |employee| employee.is_available_for_project(period))
        })
        .await
    }

    async fn get_by_email(
        &self,
        tenant: &TenantId,
        email: &str,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<Employee>> {
        self.read(tenant, cancel, |data| {
            data.employees
                .values()
                .find(|employee| same_text(employee.email(), email))
                .map(|employee| hydrate(data, employee))
        })
        .await
    }

    async fn exists_by_email(
        &self,
        tenant: &TenantId,
        email: &str,
        cancel: &CancellationToken,
    ) -> RepositoryResult<bool> {
        self.read(tenant, cancel, |data| email_taken(data, email, None))
            .await
    }

    async fn add(
        &self,
        tenant: &TenantId,
        employee: &Employee,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        ensure_same_tenant(tenant, employee.tenant_id(), "employee")?;
        let id: EmployeeId = employee.id();

        self.write(tenant, cancel, |data| {
            if data.employees.contains_key(&id) {
                return Err(RepositoryError::Conflict(format!(
                    "employee {id} already exists"
                )));
            }
            if email_taken(data, employee.email(), None) {
                return Err(RepositoryError::Conflict(format!(
                    "email {} is already registered",
                    employee.email()
                )));
            }
            data.employees.insert(id, employee.clone());
            Ok(())
        })
        .await?;

        debug!(tenant = %tenant, employee_id = %id, "Employee added");
        Ok(())
    }

    async fn update(
        &self,
        tenant: &TenantId,
        employee: &Employee,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        ensure_same_tenant(tenant, employee.tenant_id(), "employee")?;
        let id: EmployeeId = employee.id();

        self.write(tenant, cancel, |data| {
            if !data.employees.contains_key(&id) {
                return Err(RepositoryError::NotFound(format!("employee {id}")));
            }
            if email_taken(data, employee.email(), Some(id)) {
                return Err(RepositoryError::Conflict(format!(
                    "email {} is already registered",
                    employee.email()
                )));
            }
            end_project_assignments(data, employee)?;
            data.employees.insert(id, employee.clone());
            Ok(())
        })
        .await?;

        debug!(tenant = %tenant, employee_id = %id, status = ?employee.status(), "Employee updated");
        Ok(())
    }

    async fn delete(
        &self,
        tenant: &TenantId,
        id: EmployeeId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        self.write(tenant, cancel, |data| {
            data.employees
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| RepositoryError::NotFound(format!("employee {id}")))
        })
        .await?;

        debug!(tenant = %tenant, employee_id = %id, "Employee deleted");
        Ok(())
    }
}
