// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use erp_domain::{
    Client, ClientId, Employee, EmployeeId, Project, ProjectId, RepositoryError,
    RepositoryResult, TenantId, TimeEntry, TimeEntryId,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Aggregates owned by one tenant.
#[derive(Debug, Default)]
pub(crate) struct TenantData {
    pub(crate) projects: HashMap<ProjectId, Project>,
    pub(crate) employees: HashMap<EmployeeId, Employee>,
    pub(crate) clients: HashMap<ClientId, Client>,
    pub(crate) time_entries: HashMap<TimeEntryId, TimeEntry>,
}

/// In-memory repository adapter partitioned by tenant.
///
/// One store implements all four repository ports, so a single
/// `Arc<InMemoryStore>` can be handed to the domain services for each of
/// them.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tenants: RwLock<HashMap<TenantId, TenantData>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tenants that have written at least once.
    pub async fn tenant_count(&self) -> usize {
        self.tenants.read().await.len()
    }

    /// Runs `f` against the partition of `tenant` under a shared lock.
    ///
    /// A tenant that has never written reads as empty.
    pub(crate) async fn read<T, F>(
        &self,
        tenant: &TenantId,
        cancel: &CancellationToken,
        f: F,
    ) -> RepositoryResult<T>
    where
        F: FnOnce(&TenantData) -> T,
    {
        ensure_active(cancel)?;
        let guard = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(RepositoryError::Cancelled),
            guard = self.tenants.read() => guard,
        };

        let empty: TenantData = TenantData::default();
        let result: T = f(guard.get(tenant).unwrap_or(&empty));
        drop(guard);
        Ok(result)
    }

    /// Runs `f` against the partition of `tenant` under an exclusive lock.
    ///
    /// `f` must validate before it mutates: an error it returns is passed
    /// through without rolling anything back.
    pub(crate) async fn write<T, F>(
        &self,
        tenant: &TenantId,
        cancel: &CancellationToken,
        f: F,
    ) -> RepositoryResult<T>
    where
        F: FnOnce(&mut TenantData) -> RepositoryResult<T>,
    {
        ensure_active(cancel)?;
        let mut guard = tokio::select! {
            biased;
            () = cancel.cancelled() => return Err(RepositoryError::Cancelled),
            guard = self.tenants.write() => guard,
        };

        // Last chance to observe cancellation before committing
        ensure_active(cancel)?;
        let result: RepositoryResult<T> = f(guard.entry(tenant.clone()).or_default());
        drop(guard);
        result
    }
}

pub(crate) fn ensure_active(cancel: &CancellationToken) -> RepositoryResult<()> {
    if cancel.is_cancelled() {
        return Err(RepositoryError::Cancelled);
    }
    Ok(())
}

/// Rejects a write whose aggregate belongs to a different tenant.
pub(crate) fn ensure_same_tenant(
    tenant: &TenantId,
    owner: &TenantId,
    kind: &str,
) -> RepositoryResult<()> {
    if tenant != owner {
        return Err(RepositoryError::Conflict(format!(
            "{kind} belongs to tenant '{owner}', not '{tenant}'"
        )));
    }
    Ok(())
}

/// Case-insensitive comparison of user-entered text, ignoring surrounding
/// whitespace.
pub(crate) fn same_text(left: &str, right: &str) -> bool {
    left.trim().to_lowercase() == right.trim().to_lowercase()
}
