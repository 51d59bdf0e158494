// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::{InMemoryStore, TenantData, ensure_same_tenant, same_text};
use async_trait::async_trait;
use erp_domain::{
    Client, ClientId, ClientRepository, RepositoryError, RepositoryResult, TenantId,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Returns a copy of `client` with its tenant's projects attached.
fn hydrate(data: &TenantData, client: &Client) -> Client {
    let id: ClientId = client.id();
    let mut hydrated: Client = client.clone();
    hydrated.attach_projects(
        data.projects
            .values()
            .filter(|project| project.client_id() == id),
    );
    hydrated
}

fn name_taken(data: &TenantData, company_name: &str, except: Option<ClientId>) -> bool {
    data.clients.values().any(|client| {
        same_text(client.company_name(), company_name) && Some(client.id()) != except
    })
}

#[async_trait]
impl ClientRepository for InMemoryStore {
    async fn get_by_id(
        &self,
        tenant: &TenantId,
        id: ClientId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<Client>> {
        self.read(tenant, cancel, |data| {
            data.clients.get(&id).map(|client| hydrate(data, client))
        })
        .await
    }

    async fn get_all(
        &self,
        tenant: &TenantId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Client>> {
        self.read(tenant, cancel, |data| {
            let mut clients: Vec<Client> = data
                .clients
                .values()
                .map(|client| hydrate(data, client))
                .collect();
            clients.sort_by(|a, b| {
                a.company_name()
                    .cmp(b.company_name())
                    .then_with(|| a.id().cmp(&b.id()))
            });
            clients
        })
        .await
    }

    async fn get_by_company_name(
        &self,
        tenant: &TenantId,
        company_name: &str,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<Client>> {
        self.read(tenant, cancel, |data| {
            data.clients
                .values()
                .find(|client| same_text(client.company_name(), company_name))
                .map(|client| hydrate(data, client))
        })
        .await
    }

    async fn exists_by_company_name(
        &self,
        tenant: &TenantId,
        company_name: &str,
        cancel: &CancellationToken,
    ) -> RepositoryResult<bool> {
        self.read(tenant, cancel, |data| name_taken(data, company_name, None))
            .await
    }

    async fn add(
        &self,
        tenant: &TenantId,
        client: &Client,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        ensure_same_tenant(tenant, client.tenant_id(), "client")?;
        let id: ClientId = client.id();

        self.write(tenant, cancel, |data| {
            if data.clients.contains_key(&id) {
                return Err(RepositoryError::Conflict(format!(
                    "client {id} already exists"
                )));
            }
            if name_taken(data, client.company_name(), None) {
                return Err(RepositoryError::Conflict(format!(
                    "company name '{}' is already registered",
                    client.company_name()
                )));
            }
            data.clients.insert(id, client.clone());
            Ok(())
        })
        .await?;

        debug!(tenant = %tenant, client_id = %id, "Client added");
        Ok(())
    }

    async fn update(
        &self,
        tenant: &TenantId,
        client: &Client,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        ensure_same_tenant(tenant, client.tenant_id(), "client")?;
        let id: ClientId = client.id();

        self.write(tenant, cancel, |data| {
            if !data.clients.contains_key(&id) {
                return Err(RepositoryError::NotFound(format!("client {id}")));
            }
            if name_taken(data, client.company_name(), Some(id)) {
                return Err(RepositoryError::Conflict(format!(
                    "company name '{}' is already registered",
                    client.company_name()
                )));
            }
            data.clients.insert(id, client.clone());
            Ok(())
        })
        .await?;

        debug!(tenant = %tenant, client_id = %id, "Client updated");
        Ok(())
    }

    async fn delete(
        &self,
        tenant: &TenantId,
        id: ClientId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        self.write(tenant, cancel, |data| {
            data.clients
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| RepositoryError::NotFound(format!("client {id}")))
        })
        .await?;

        debug!(tenant = %tenant, client_id = %id, "Client deleted");
        Ok(())
    }
}
