// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::days_between;
use crate::error::DomainError;
use crate::money::Money;
use crate::project::Project;
use crate::types::{ClientId, ClientImportance, ProjectId, ProjectStatus, TenantId};
use crate::validation::{
    normalize_optional, require_non_empty, require_non_negative, validate_email,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Clients whose first project is at most this many days old count as new.
pub const NEW_CLIENT_WINDOW_DAYS: i64 = 180;

/// Contract value at or above which a client is VIP regardless of importance.
const VIP_CONTRACT_VALUE: Decimal = Decimal::from_parts(50_000, 0, 0, false, 0);
const HIGH_IMPORTANCE_BUDGET: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);
const MEDIUM_IMPORTANCE_BUDGET: Decimal = Decimal::from_parts(25_000, 0, 0, false, 0);

/// Read-only view of a client's project.
///
/// Projects are owned by their own repository; the loading layer attaches
/// snapshots to the client for the derived metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientProject {
    pub id: ProjectId,
    pub name: String,
    pub status: ProjectStatus,
    pub budget: Money,
    pub created_at: OffsetDateTime,
}

impl From<&Project> for ClientProject {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id(),
            name: project.name().to_string(),
            status: project.status(),
            budget: project.budget().clone(),
            created_at: project.created_at(),
        }
    }
}

/// A customer organisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    id: ClientId,
    tenant_id: TenantId,
    company_name: String,
    industry: Option<String>,
    contact_person: Option<String>,
    contact_email: Option<String>,
    contact_phone: Option<String>,
    address: Option<String>,
    contract_value: Option<Decimal>,
    client_size: Option<String>,
    #[serde(skip)]
    projects: Vec<ClientProject>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Client {
    /// # Errors
    ///
    /// Returns `DomainError::EmptyField` if `company_name` is empty.
    pub fn new(
        tenant_id: TenantId,
        company_name: &str,
        industry: Option<String>,
    ) -> Result<Self, DomainError> {
        require_non_empty(company_name, "company_name")?;

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        Ok(Self {
            id: ClientId::new(),
            tenant_id,
            company_name: company_name.trim().to_string(),
            industry: normalize_optional(industry),
            contact_person: None,
            contact_email: None,
            contact_phone: None,
            address: None,
            contract_value: None,
            client_size: None,
            projects: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    #[must_use]
    pub const fn id(&self) -> ClientId {
        self.id
    }

    #[must_use]
    pub const fn tenant_id(&self) -> &TenantId {
        &self.tenant_id
    }

    #[must_use]
    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    #[must_use]
    pub fn industry(&self) -> Option<&str> {
        self.industry.as_deref()
    }

    #[must_use]
    pub fn contact_person(&self) -> Option<&str> {
        self.contact_person.as_deref()
    }

    #[must_use]
    pub fn contact_email(&self) -> Option<&str> {
        self.contact_email.as_deref()
    }

    #[must_use]
    pub fn contact_phone(&self) -> Option<&str> {
        self.contact_phone.as_deref()
    }

    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    #[must_use]
    pub const fn contract_value(&self) -> Option<Decimal> {
        self.contract_value
    }

    #[must_use]
    pub fn client_size(&self) -> Option<&str> {
        self.client_size.as_deref()
    }

    #[must_use]
    pub fn projects(&self) -> &[ClientProject] {
        &self.projects
    }

    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    #[must_use]
    pub const fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    /// # Errors
    ///
    /// Returns `DomainError::EmptyField` if `company_name` is empty.
    pub fn update_basic_info(
        &mut self,
        company_name: &str,
        industry: Option<String>,
        client_size: Option<String>,
    ) -> Result<(), DomainError> {
        require_non_empty(company_name, "company_name")?;
        self.company_name = company_name.trim().to_string();
        self.industry = normalize_optional(industry);
        self.client_size = normalize_optional(client_size);
        self.touch();
        Ok(())
    }

    /// Replaces the contact details. A blank e-mail clears it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmail` if a non-blank e-mail is malformed.
    pub fn update_contact_info(
        &mut self,
        contact_person: Option<String>,
        contact_email: Option<String>,
        contact_phone: Option<String>,
    ) -> Result<(), DomainError> {
        let contact_email: Option<String> =
            normalize_optional(contact_email).map(|email| email.trim().to_string());
        if let Some(email) = &contact_email {
            validate_email(email)?;
        }

        self.contact_person = normalize_optional(contact_person);
        self.contact_email = contact_email;
        self.contact_phone = normalize_optional(contact_phone);
        self.touch();
        Ok(())
    }

    pub fn update_address(&mut self, address: Option<String>) {
        self.address = normalize_optional(address);
        self.touch();
    }

    /// # Errors
    ///
    /// Returns `DomainError::NegativeValue` if the value is negative.
    pub fn set_contract_value(&mut self, contract_value: Option<Decimal>) -> Result<(), DomainError> {
        if let Some(value) = contract_value {
            require_non_negative(value, "contract_value")?;
        }
        self.contract_value = contract_value;
        self.touch();
        Ok(())
    }

    /// Replaces the attached project snapshots. Does not bump `updated_at`.
    pub fn attach_projects<'a, I>(&mut self, projects: I)
    where
        I: IntoIterator<Item = &'a Project>,
    {
        self.projects = projects.into_iter().map(ClientProject::from).collect();
    }

    #[must_use]
    pub fn total_projects_count(&self) -> usize {
        self.projects.len()
    }

    /// Projects in Active status only.
    #[must_use]
    pub fn active_projects_count(&self) -> usize {
        self.get_project_count_by_status(ProjectStatus::Active)
    }

    /// Returns true if any project is active or still in planning.
    #[must_use]
    pub fn has_active_projects(&self) -> bool {
        self.projects.iter().any(is_open)
    }

    #[must_use]
    pub fn get_project_count_by_status(&self, status: ProjectStatus) -> usize {
        self.projects.iter().filter(|p| p.status == status).count()
    }

    /// Sum of budgets of projects that were not cancelled. Saturates at
    /// `Decimal::MAX`.
    #[must_use]
    pub fn get_total_project_budget(&self) -> Decimal {
        self.non_cancelled()
            .map(|p| p.budget.amount())
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    #[must_use]
    pub fn get_completed_projects_count(&self) -> usize {
        self.get_project_count_by_status(ProjectStatus::Completed)
    }

    /// Projects that are active or still in planning.
    #[must_use]
    pub fn get_active_projects(&self) -> Vec<&ClientProject> {
        self.projects.iter().filter(|p| is_open(p)).collect()
    }

    #[must_use]
    pub fn get_latest_project(&self) -> Option<&ClientProject> {
        self.projects.iter().max_by_key(|p| p.created_at)
    }

    /// Days since the first project was created. Zero without projects.
    #[must_use]
    pub fn get_relationship_duration_in_days(&self, today: Date) -> i64 {
        self.projects
            .iter()
            .map(|p| p.created_at)
            .min()
            .map_or(0, |first| days_between(first.date(), today))
    }

    /// Returns true if no project is active or in planning.
    #[must_use]
    pub fn can_be_deleted(&self) -> bool {
        !self.has_active_projects()
    }

    /// Completed projects as a percentage of projects past planning.
    #[must_use]
    pub fn success_rate(&self) -> Decimal {
        let started: usize = self
            .projects
            .iter()
            .filter(|p| p.status != ProjectStatus::Planning)
            .count();
        if started == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.get_completed_projects_count()) * Decimal::ONE_HUNDRED
            / Decimal::from(started)
    }

    /// Mean budget of projects that were not cancelled.
    #[must_use]
    pub fn average_project_budget(&self) -> Decimal {
        let count: usize = self.non_cancelled().count();
        if count == 0 {
            return Decimal::ZERO;
        }
        self.get_total_project_budget() / Decimal::from(count)
    }

    /// Importance by project count and total budget.
    #[must_use]
    pub fn get_client_importance(&self) -> ClientImportance {
        let count: usize = self.projects.len();
        let budget: Decimal = self.get_total_project_budget();

        if count >= 5 || budget >= HIGH_IMPORTANCE_BUDGET {
            ClientImportance::High
        } else if count >= 2 || budget >= MEDIUM_IMPORTANCE_BUDGET {
            ClientImportance::Medium
        } else {
            ClientImportance::Low
        }
    }

    /// Sum of budgets of completed projects created in `year`. Saturates at
    /// `Decimal::MAX`.
    #[must_use]
    pub fn get_annual_revenue(&self, year: i32) -> Decimal {
        self.projects
            .iter()
            .filter(|p| p.created_at.year() == year && p.status == ProjectStatus::Completed)
            .map(|p| p.budget.amount())
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    #[must_use]
    pub fn is_vip_client(&self) -> bool {
        self.get_client_importance() == ClientImportance::High
            || self
                .contract_value
                .is_some_and(|value| value >= VIP_CONTRACT_VALUE)
    }

    #[must_use]
    pub fn is_new_client(&self, today: Date) -> bool {
        self.get_relationship_duration_in_days(today) <= NEW_CLIENT_WINDOW_DAYS
    }

    fn non_cancelled(&self) -> impl Iterator<Item = &ClientProject> {
        self.projects
            .iter()
            .filter(|p| p.status != ProjectStatus::Cancelled)
    }

    fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc();
    }
}

fn is_open(project: &ClientProject) -> bool {
    matches!(
        project.status,
        ProjectStatus::Active | ProjectStatus::Planning
    )
}

impl std::fmt::Display for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}) - {} active projects",
            self.company_name,
            self.industry.as_deref().unwrap_or("Unknown Industry"),
            self.active_projects_count()
        )
    }
}
