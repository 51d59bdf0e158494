// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Repository adapters for the professional-services ERP.
//!
//! This crate implements the persistence ports declared in `erp-domain`
//! (`ProjectRepository`, `EmployeeRepository`, `ClientRepository` and
//! `TimeEntryRepository`) on top of a single in-memory store.
//!
//! ## Tenant Partitioning
//!
//! Every aggregate lives inside the partition of the tenant it was created
//! for. Reads never cross partitions, and a write whose aggregate carries a
//! different tenant than the one the caller passed is rejected with
//! `RepositoryError::Conflict`.
//!
//! ## Cancellation
//!
//! Each call checks its `CancellationToken` before touching the store and
//! again before committing a write. A cancelled call returns
//! `RepositoryError::Cancelled` and leaves the store unchanged.
//!
//! ## Uniqueness
//!
//! The store enforces the uniqueness rules the domain relies on:
//!
//! - project codes are unique per tenant
//! - employee e-mail addresses are unique per tenant (case-insensitive)
//! - client company names are unique per tenant (case-insensitive)
//!
//! ## Read Ordering
//!
//! Multi-row reads return a stable order so callers and tests are
//! deterministic: projects by code, employees and clients by name, and
//! time entries by date.
//!
//! ## Hydration
//!
//! Clients are returned with snapshots of their projects attached, and
//! employees with every assignment the tenant's projects hold for them, so
//! derived metrics such as availability work on aggregates read back from
//! the store.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod clients;
mod employees;
mod projects;
mod store;
mod time_entries;

#[cfg(test)]
mod tests;

pub use store::InMemoryStore;
