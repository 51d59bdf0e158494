// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use erp_domain::HOURS_PER_DAY;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Tunable constants of the derived-metrics engine.
///
/// Every field has a default, so a JSON document only needs the fields it
/// overrides:
///
/// ```json
/// { "hours_per_day": 7, "schedule_tolerance_percent": "5" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsPolicy {
    /// Working hours in a full-time day, used for expected hours.
    pub hours_per_day: u32,
    /// How far progress may trail elapsed time, in percentage points,
    /// before a project counts as behind schedule.
    pub schedule_tolerance_percent: Decimal,
    /// Highest numeric suffix tried when a project code is taken.
    pub max_code_suffix: u8,
    /// Number of projects listed in the dashboard's recent projects.
    pub recent_projects_limit: usize,
}

impl Default for MetricsPolicy {
    fn default() -> Self {
        Self {
            hours_per_day: u32::try_from(HOURS_PER_DAY).unwrap_or(8),
            schedule_tolerance_percent: Decimal::TEN,
            max_code_suffix: 99,
            recent_projects_limit: 5,
        }
    }
}

impl MetricsPolicy {
    /// Parses a policy from JSON and validates it.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPolicy` if the document does not parse or a
    /// value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self, CoreError> {
        let policy: Self =
            serde_json::from_str(json).map_err(|e| CoreError::InvalidPolicy(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidPolicy` naming the first bad field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !(1..=24).contains(&self.hours_per_day) {
            return Err(CoreError::InvalidPolicy(format!(
                "hours_per_day must be between 1 and 24, got {}",
                self.hours_per_day
            )));
        }
        if self.schedule_tolerance_percent < Decimal::ZERO
            || self.schedule_tolerance_percent > Decimal::ONE_HUNDRED
        {
            return Err(CoreError::InvalidPolicy(format!(
                "schedule_tolerance_percent must be between 0 and 100, got {}",
                self.schedule_tolerance_percent
            )));
        }
        if !(1..=99).contains(&self.max_code_suffix) {
            return Err(CoreError::InvalidPolicy(format!(
                "max_code_suffix must be between 1 and 99, got {}",
                self.max_code_suffix
            )));
        }
        Ok(())
    }
}
