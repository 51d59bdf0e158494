// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use time::Date;

static CODE_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,4}-\d{4}-\d{2}(-\d{2})?$").ok());

/// Human-readable project code of the form `PREFIX-YYYY-MM`.
///
/// Codes that collided with an existing project in the same month carry a
/// two-digit suffix: `PREFIX-YYYY-MM-NN`. The prefix must already be
/// upper-case; surrounding whitespace is trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectCode(String);

impl ProjectCode {
    /// Parses a project code.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidProjectCode` if the value does not match
    /// the code pattern.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        let valid: bool = CODE_PATTERN
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(trimmed));
        if !valid {
            return Err(DomainError::InvalidProjectCode(value.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Builds the base code for `prefix` in the month of `date`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCodePrefix` if the prefix is not 2-4 letters.
    pub fn generate(prefix: &str, date: Date) -> Result<Self, DomainError> {
        let prefix: String = prefix.trim().to_ascii_uppercase();
        if !(2..=4).contains(&prefix.len()) || !prefix.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::InvalidCodePrefix(prefix));
        }
        Self::new(&format!(
            "{prefix}-{:04}-{:02}",
            date.year(),
            u8::from(date.month())
        ))
    }

    /// Returns the base code with a two-digit collision suffix appended.
    ///
    /// Any suffix already present is replaced.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCodeSuffix` if `suffix` is outside `1..=99`.
    pub fn with_suffix(&self, suffix: u8) -> Result<Self, DomainError> {
        if !(1..=99).contains(&suffix) {
            return Err(DomainError::InvalidCodeSuffix(suffix));
        }
        Ok(Self(format!("{}-{suffix:02}", self.base())))
    }

    /// Returns the code without any collision suffix.
    #[must_use]
    pub fn base(&self) -> &str {
        // PREFIX-YYYY-MM has exactly two dashes
        match self.0.match_indices('-').nth(2) {
            Some((index, _)) => &self.0[..index],
            None => &self.0,
        }
    }

    /// Returns true if the code carries a collision suffix.
    #[must_use]
    pub fn has_suffix(&self) -> bool {
        self.base().len() != self.0.len()
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ProjectCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<ProjectCode> for String {
    fn from(code: ProjectCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for ProjectCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
