// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::store::{InMemoryStore, TenantData, ensure_same_tenant};
use async_trait::async_trait;
use erp_domain::{
    EmployeeId, RepositoryError, RepositoryResult, TenantId, TimeEntry, TimeEntryId,
    TimeEntryRepository,
};
use rust_decimal::Decimal;
use time::Date;
use tokio_util::sync::CancellationToken;
use tracing::debug;

fn select<P>(data: &TenantData, predicate: P) -> Vec<TimeEntry>
where
    P: Fn(&TimeEntry) -> bool,
{
    let mut entries: Vec<TimeEntry> = data
        .time_entries
        .values()
        .filter(|entry| predicate(entry))
        .cloned()
        .collect();
    entries.sort_by(|a, b| {
        a.date()
            .cmp(&b.date())
            .then_with(|| a.created_at().cmp(&b.created_at()))
            .then_with(|| a.id().cmp(&b.id()))
    });
    entries
}

#[async_trait]
impl TimeEntryRepository for InMemoryStore {
    async fn get_by_id(
        &self,
        tenant: &TenantId,
        id: TimeEntryId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Option<TimeEntry>> {
        self.read(tenant, cancel, |data| data.time_entries.get(&id).cloned())
            .await
    }

    async fn get_total_hours_by_employee(
        &self,
        tenant: &TenantId,
        employee_id: EmployeeId,
        start: Date,
        end: Date,
        billable_only: bool,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Decimal> {
        self.read(tenant, cancel, |data| {
            data.time_entries
                .values()
                .filter(|entry| entry.employee_id() == employee_id)
                .filter(|entry| entry.date() >= start && entry.date() <= end)
                .filter(|entry| !billable_only || entry.is_billable())
                .map(TimeEntry::hours)
                .sum()
        })
        .await
    }

    async fn get_by_date_range(
        &self,
        tenant: &TenantId,
        start: Date,
        end: Date,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<TimeEntry>> {
        self.read(tenant, cancel, |data| {
            select(data, |entry| entry.date() >= start && entry.date() <= end)
        })
        .await
    }

    async fn get_by_employee_id(
        &self,
        tenant: &TenantId,
        employee_id: EmployeeId,
        start: Option<Date>,
        end: Option<Date>,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<TimeEntry>> {
        self.read(tenant, cancel, |data| {
            select(data, |entry| {
                entry.employee_id() == employee_id
                    && start.is_none_or(|start| entry.date() >= start)
                    && end.is_none_or(|end| entry.date() <= end)
            })
        })
        .await
    }

    async fn get_pending_approval(
        &self,
        tenant: &TenantId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<TimeEntry>> {
        self.read(tenant, cancel, |data| {
            select(data, |entry| !entry.is_approved())
        })
        .await
    }

    async fn add(
        &self,
        tenant: &TenantId,
        entry: &TimeEntry,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        ensure_same_tenant(tenant, entry.tenant_id(), "time entry")?;
        let id: TimeEntryId = entry.id();

        self.write(tenant, cancel, |data| {
            if data.time_entries.contains_key(&id) {
                return Err(RepositoryError::Conflict(format!(
                    "time entry {id} already exists"
                )));
            }
            data.time_entries.insert(id, entry.clone());
            Ok(())
        })
        .await?;

        debug!(
            tenant = %tenant,
            time_entry_id = %id,
            employee_id = %entry.employee_id(),
            hours = %entry.hours(),
            "Time entry added"
        );
        Ok(())
    }

    async fn update(
        &self,
        tenant: &TenantId,
        entry: &TimeEntry,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        ensure_same_tenant(tenant, entry.tenant_id(), "time entry")?;
        let id: TimeEntryId = entry.id();

        self.write(tenant, cancel, |data| {
            let slot: &mut TimeEntry = data
                .time_entries
                .get_mut(&id)
                .ok_or_else(|| RepositoryError::NotFound(format!("time entry {id}")))?;
            *slot = entry.clone();
            Ok(())
        })
        .await?;

        debug!(
            tenant = %tenant,
            time_entry_id = %id,
            approved = entry.is_approved(),
            "Time entry updated"
        );
        Ok(())
    }

    async fn delete(
        &self,
        tenant: &TenantId,
        id: TimeEntryId,
        cancel: &CancellationToken,
    ) -> RepositoryResult<()> {
        self.write(tenant, cancel, |data| {
            data.time_entries
                .remove(&id)
                .map(|_| ())
                .ok_or_else(|| RepositoryError::NotFound(format!("time entry {id}")))
        })
        .await?;

        debug!(tenant = %tenant, time_entry_id = %id, "Time entry deleted");
        Ok(())
    }
}
