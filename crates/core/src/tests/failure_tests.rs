// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{Fixture, TODAY, create_test_fixture};
use crate::{OperationFailure, ProjectDomainService};
use async_trait::async_trait;
use erp_domain::{
    ClientId, EmployeeId, FixedClock, Project, ProjectCode, ProjectId, ProjectRepository,
    ProjectStatus, RepositoryError, RepositoryResult, TenantId,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A project store whose backing storage is gone.
struct FailingProjects;

fn unavailable<T>() -> RepositoryResult<T> {
    Err(RepositoryError::Storage(String::from("disk unavailable")))
}

#[async_trait]
impl ProjectRepository for FailingProjects {
    async fn get_by_id(
        &self,
        _tenant: &TenantId,
        _id: ProjectId,
        _cancel: &CancellationToken,
    ) -> RepositoryResult<Option<Project>> {
        unavailable()
    }

    async fn get_all(
        &self,
        _tenant: &TenantId,
        _cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Project>> {
        unavailable()
    }

    async fn get_by_client_id(
        &self,
        _tenant: &TenantId,
        _client_id: ClientId,
        _cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Project>> {
        unavailable()
    }

    async fn get_by_manager_id(
        &self,
        _tenant: &TenantId,
        _manager_id: EmployeeId,
        _cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Project>> {
        unavailable()
    }

    async fn get_by_status(
        &self,
        _tenant: &TenantId,
        _status: ProjectStatus,
        _cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Project>> {
        unavailable()
    }

    async fn get_by_code(
        &self,
        _tenant: &TenantId,
        _code: &ProjectCode,
        _cancel: &CancellationToken,
    ) -> RepositoryResult<Option<Project>> {
        unavailable()
    }

    async fn exists_by_code(
        &self,
        _tenant: &TenantId,
        _code: &ProjectCode,
        _cancel: &CancellationToken,
    ) -> RepositoryResult<bool> {
        unavailable()
    }

    async fn add(
        &self,
        _tenant: &TenantId,
        _project: &Project,
        _cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        unavailable()
    }

    async fn update(
        &self,
        _tenant: &TenantId,
        _project: &Project,
        _cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        unavailable()
    }

    async fn delete(
        &self,
        _tenant: &TenantId,
        _id: ProjectId,
        _cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        unavailable()
    }
}

fn service_without_projects(fixture: &Fixture) -> ProjectDomainService {
    ProjectDomainService::new(
        Arc::new(FailingProjects),
        fixture.store.clone(),
        fixture.store.clone(),
        Arc::new(FixedClock::on(TODAY)),
    )
}

#[tokio::test]
async fn test_storage_failures_are_folded_with_context() {
    let fixture: Fixture = create_test_fixture();
    let service: ProjectDomainService = service_without_projects(&fixture);

    let failure: OperationFailure = service
        .calculate_project_profitability(&fixture.tenant, ProjectId::new(), &fixture.cancel)
        .await
        .unwrap_err();
    assert_eq!(
        failure.errors(),
        ["Error calculating profitability: Repository failure: storage failure: disk unavailable"]
    );

    let failure: OperationFailure = service
        .generate_unique_project_code(&fixture.tenant, "WEB", None, &fixture.cancel)
        .await
        .unwrap_err();
    assert_eq!(
        failure.message(),
        "Error generating project code: Repository failure: storage failure: disk unavailable"
    );
    assert_eq!(failure.to_string(), failure.message());
}

#[tokio::test]
async fn test_cancelled_operations_fail_without_side_effects() {
    let fixture: Fixture = create_test_fixture();
    let project: Project = fixture.create_test_project("WEB-2024-01");
    fixture.save_project(&project).await;
    fixture.cancel.cancel();

    let failure: OperationFailure = fixture
        .service()
        .calculate_project_profitability(&fixture.tenant, project.id(), &fixture.cancel)
        .await
        .unwrap_err();
    assert_eq!(
        failure.message(),
        "Error calculating profitability: Repository failure: operation cancelled"
    );

    let failure: OperationFailure = fixture
        .dashboard()
        .summary(&fixture.tenant, &fixture.cancel)
        .await
        .unwrap_err();
    assert_eq!(
        failure.message(),
        "Error generating dashboard: Repository failure: operation cancelled"
    );

    let fresh: CancellationToken = CancellationToken::new();
    let stored: Vec<Project> =
        ProjectRepository::get_all(fixture.store.as_ref(), &fixture.tenant, &fresh)
            .await
            .unwrap();
    assert_eq!(stored.len(), 1);
}
