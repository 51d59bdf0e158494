// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::{InMemoryStore, TenantData, ensure_same_tenant};
use async_trait::async_trait;
use erp_domain::{
    ClientId, EmployeeId, Project, ProjectCode, ProjectId, ProjectRepository, ProjectStatus,
    RepositoryError, RepositoryResult, TenantId,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

fn select<P>(data: &TenantData, predicate: P) -> Vec<Project>
where
    P: Fn(&Project) -> bool,
{
    let mut projects: Vec<Project> = data
        .projects
        .values()
        .filter(|project| predicate(project))
        .cloned()
        .collect();
    projects.sort_by(|a, b| a.code().value().cmp(b.code().value()));
    projects
}

fn code_taken(data: &TenantData, code: &ProjectCode, except: Option<ProjectId>) -> bool {
    data.projects
        .values()
        .any(|project| project.code() == code && Some(project.id()) != except)
}

#[async_trait]
impl ProjectRepository for InMemoryStore {
    async fn get_by_id(
        &self,
        tenant: &TenantId,
        id: ProjectId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<Project>> {
        self.read(tenant, cancel, |data| data.projects.get(&id).cloned())
            .await
    }

    async fn get_all(
        &self,
        tenant: &TenantId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Project>> {
        self.read(tenant, cancel, |data| select(data, |_| true)).await
    }

    async fn get_by_client_id(
        &self,
        tenant: &TenantId,
        client_id: ClientId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Project>> {
        self.read(tenant, cancel, |data| {
            select(data, |project| project.client_id() == client_id)
        })
        .await
    }

    async fn get_by_manager_id(
        &self,
        tenant: &TenantId,
        manager_id: EmployeeId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Project>> {
        self.read(tenant, cancel, |data| {
            select(data, |project| project.manager_id() == manager_id)
        })
        .await
    }

    async fn get_by_status(
        &self,
        tenant: &TenantId,
        status: ProjectStatus,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Project>> {
        self.read(tenant, cancel, |data| {
            select(data, |project| project.status() == status)
        })
        .await
    }

    async fn get_by_code(
        &self,
        tenant: &TenantId,
        code: &ProjectCode,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<Project>> {
        self.read(tenant, cancel, |data| {
            data.projects
                .values()
                .find(|project| project.code() == code)
                .cloned()
        })
        .await
    }

    async fn exists_by_code(
        &self,
        tenant: &TenantId,
        code: &ProjectCode,
        cancel: &CancellationToken,
    ) -> RepositoryResult<bool> {
        self.read(tenant, cancel, |data| code_taken(data, code, None))
            .await
    }

    async fn add(
        &self,
        tenant: &TenantId,
        project: &Project,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        ensure_same_tenant(tenant, project.tenant_id(), "project")?;
        let id: ProjectId = project.id();

        self.write(tenant, cancel, |data| {
            if data.projects.contains_key(&id) {
                return Err(RepositoryError::Conflict(format!(
                    "project {id} already exists"
                )));
            }
            if code_taken(data, project.code(), None) {
                return Err(RepositoryError::Conflict(format!(
                    "project code {} is already in use",
                    project.code()
                )));
            }
            data.projects.insert(id, project.clone());
            Ok(())
        })
        .await?;

        debug!(
            tenant = %tenant,
            project_id = %id,
            code = %project.code(),
            "Project added"
        );
        Ok(())
    }

    async fn update(
        &self,
        tenant: &TenantId,
        project: &Project,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        ensure_same_tenant(tenant, project.tenant_id(), "project")?;
        let id: ProjectId = project.id();

        self.write(tenant, cancel, |data| {
            if !data.projects.contains_key(&id) {
                return Err(RepositoryError::NotFound(format!("project {id}")));
            }
            if code_taken(data, project.code(), Some(id)) {
                return Err(RepositoryError::Conflict(format!(
                    "project code {} is already in use",
                    project.code()
                )));
            }
            data.projects.insert(id, project.clone());
            Ok(())
        })
        .await?;

        debug!(tenant = %tenant, project_id = %id, status = ?project.status(), "Project updated");
        Ok(())
    }

    async fn delete(
        &self,
        tenant: &TenantId,
        id: ProjectId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        self.write(tenant, cancel, |data| {
            data.projects
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| RepositoryError::NotFound(format!("project {id}")))
        })
        .await?;

        debug!(tenant = %tenant, project_id = %id, "Project deleted");
        Ok(())
    }
}
