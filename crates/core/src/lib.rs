// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Derived-metrics engine for the professional-services ERP.
//!
//! The services here sit on top of the repository ports declared in
//! `erp-domain` and never touch storage directly:
//!
//! - [`ProjectDomainService`] answers staffing, code allocation,
//!   profitability, utilization and completion questions about projects
//! - [`DashboardService`] aggregates tenant-wide headline figures
//!
//! ## Result Channel
//!
//! Domain rule violations raised by aggregates are `DomainError`s. The
//! services never return those, or repository errors, directly: every
//! operation yields a [`ServiceResult`], whose [`OperationFailure`] carries
//! either a business outcome ("Project not found") or a folded error
//! prefixed with the operation that failed.
//!
//! ## Configuration
//!
//! Numeric knobs live in [`MetricsPolicy`], which deserializes from JSON
//! and falls back to defaults for anything it does not name.

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

mod dashboard;
mod error;
mod policy;
mod project_service;
mod results;

#[cfg(test)]
mod tests;

pub use dashboard::{DashboardService, DashboardSummary, ProjectStatusSummary, RecentProject};
pub use error::{CoreError, OperationFailure, ServiceResult};
pub use policy::MetricsPolicy;
pub use project_service::ProjectDomainService;
pub use results::{
    CompletionAssessment, EmployeeUtilization, ProjectProfitability, ResourceUtilization,
};
