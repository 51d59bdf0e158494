// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{EmployeeId, SkillId, SkillLevel};
use crate::validation::{require_identifier, require_non_empty};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

/// Proficiency of one employee with one technology.
///
/// Unique per (employee, technology), compared case-insensitively. The owning
/// [`crate::Employee`] updates an existing entry rather than adding a second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSkill {
    id: SkillId,
    employee_id: EmployeeId,
    technology: String,
    level: SkillLevel,
    years_experience: u32,
    last_used_date: Option<Date>,
    certification: Option<String>,
    created_at: OffsetDateTime,
}

impl EmployeeSkill {
    /// Creates a skill last used on `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if `employee_id` is nil or `technology` is empty.
    pub fn new(
        employee_id: EmployeeId,
        technology: &str,
        level: SkillLevel,
        years_experience: u32,
        today: Date,
    ) -> Result<Self, DomainError> {
        require_identifier(employee_id.is_nil(), "employee_id")?;
        require_non_empty(technology, "technology")?;

        Ok(Self {
            id: SkillId::new(),
            employee_id,
            technology: technology.trim().to_string(),
            level,
            years_experience,
            last_used_date: Some(today),
            certification: None,
            created_at: OffsetDateTime::now_utc(),
        })
    }

    #[must_use]
    pub const fn id(&self) -> SkillId {
        self.id
    }

    #[must_use]
    pub const fn employee_id(&self) -> EmployeeId {
        self.employee_id
    }

    #[must_use]
    pub fn technology(&self) -> &str {
        &self.technology
    }

    #[must_use]
    pub const fn level(&self) -> SkillLevel {
        self.level
    }

    #[must_use]
    pub const fn years_experience(&self) -> u32 {
        self.years_experience
    }

    #[must_use]
    pub const fn last_used_date(&self) -> Option<Date> {
        self.last_used_date
    }

    #[must_use]
    pub fn certification(&self) -> Option<&str> {
        self.certification.as_deref()
    }

    #[must_use]
    pub const fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    /// Returns true if the technology matches, ignoring case.
    #[must_use]
    pub fn matches(&self, technology: &str) -> bool {
        self.technology.eq_ignore_ascii_case(technology.trim())
    }

    /// Replaces level and experience; the skill counts as used on `today`.
    pub const fn update_skill(&mut self, level: SkillLevel, years_experience: u32, today: Date) {
        self.level = level;
        self.years_experience = years_experience;
        self.last_used_date = Some(today);
    }

    /// # Errors
    ///
    /// Returns `DomainError::EmptyField` if `certification` is empty.
    pub fn add_certification(&mut self, certification: &str) -> Result<(), DomainError> {
        require_non_empty(certification, "certification")?;
        self.certification = Some(certification.trim().to_string());
        Ok(())
    }

    pub const fn mark_as_used(&mut self, today: Date) {
        self.last_used_date = Some(today);
    }
}
