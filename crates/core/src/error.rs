// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use erp_domain::{DomainError, RepositoryError};
use tracing::{debug, warn};

/// Errors raised inside the services before they are folded into an
/// [`OperationFailure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A repository call failed.
    Repository(RepositoryError),
    /// A metrics policy could not be loaded or is out of range.
    InvalidPolicy(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Repository(err) => write!(f, "Repository failure: {err}"),
            Self::InvalidPolicy(msg) => write!(f, "Invalid metrics policy: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        Self::Repository(err)
    }
}

/// A business-outcome failure returned by a service operation.
///
/// Carries one or more human-readable messages. Not-found lookups,
/// insufficient allocation and folded repository errors all arrive here;
/// callers branch on it instead of matching on error types.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct OperationFailure {
    errors: Vec<String>,
}

impl OperationFailure {
    /// Creates a failure carrying a single message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            errors: vec![message.into()],
        }
    }

    /// Creates a failure carrying several messages.
    #[must_use]
    pub const fn with_errors(errors: Vec<String>) -> Self {
        Self { errors }
    }

    /// Folds an internal error into a failure whose message starts with
    /// `context`, e.g. `"Error calculating profitability: ..."`.
    #[must_use]
    pub fn from_error(context: &str, err: &CoreError) -> Self {
        Self::new(format!("{context}: {err}"))
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The first message, or an empty string for an empty failure.
    #[must_use]
    pub fn message(&self) -> &str {
        self.errors.first().map_or("", String::as_str)
    }
}

impl std::fmt::Display for OperationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.errors.join("; "))
    }
}

impl std::error::Error for OperationFailure {}

/// Result type of every service operation.
pub type ServiceResult<T> = Result<T, OperationFailure>;

/// Why a service step stopped early.
#[derive(Debug)]
pub(crate) enum Rejection {
    /// An expected business outcome, reported verbatim.
    Business(String),
    /// A domain or repository error, reported with the operation's context.
    Fault(CoreError),
}

impl Rejection {
    pub(crate) fn business(message: impl Into<String>) -> Self {
        Self::Business(message.into())
    }
}

impl From<CoreError> for Rejection {
    fn from(err: CoreError) -> Self {
        Self::Fault(err)
    }
}

impl From<DomainError> for Rejection {
    fn from(err: DomainError) -> Self {
        Self::Fault(CoreError::DomainViolation(err))
    }
}

impl From<RepositoryError> for Rejection {
    fn from(err: RepositoryError) -> Self {
        Self::Fault(CoreError::Repository(err))
    }
}

/// Converts the outcome of a service step into the public result channel.
pub(crate) fn fold<T>(context: &'static str, outcome: Result<T, Rejection>) -> ServiceResult<T> {
    outcome.map_err(|rejection| match rejection {
        Rejection::Business(message) => {
            debug!(context, %message, "Operation rejected");
            OperationFailure::new(message)
        }
        Rejection::Fault(err) => {
            warn!(context, error = %err, "Operation failed");
            OperationFailure::from_error(context, &err)
        }
    })
}
