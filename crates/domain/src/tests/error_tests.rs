// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BUSINESS_RULE_VIOLATION, DOMAIN_ERROR, DomainError, EmployeeId, INVALID_ARGUMENT,
    RepositoryError,
};
use rust_decimal_macros::dec;
use time::macros::date;

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::EmptyField { field: "name" };
    assert_eq!(format!("{err}"), "Field 'name' cannot be empty");

    let err: DomainError = DomainError::InvalidAllocation { value: 120 };
    assert_eq!(
        format!("{err}"),
        "Allocation percentage must be between 1 and 100, got 120"
    );

    let err: DomainError = DomainError::InvalidDateRange {
        start: date!(2024 - 03 - 10),
        end: date!(2024 - 03 - 01),
    };
    assert_eq!(
        format!("{err}"),
        "End date must be after start date (start: 2024-03-10, end: 2024-03-01)"
    );

    let err: DomainError = DomainError::InsufficientAmount {
        available: dec!(10),
        requested: dec!(20),
    };
    assert_eq!(
        format!("{err}"),
        "Insufficient amount: cannot subtract 20 from 10"
    );

    let err: DomainError = DomainError::TimeEntryLocked {
        operation: "update the hours of",
    };
    assert_eq!(
        format!("{err}"),
        "Cannot update the hours of an approved time entry"
    );

    let err: DomainError = DomainError::InsufficientLeave {
        requested: 5,
        available: 2,
    };
    assert_eq!(
        format!("{err}"),
        "Insufficient leave balance: requested 5 days, 2 available"
    );
}

#[test]
fn test_error_codes() {
    assert_eq!(
        DomainError::InvalidIdentifier { field: "id" }.error_code(),
        INVALID_ARGUMENT
    );
    assert_eq!(DomainError::InvalidTenant.error_code(), INVALID_ARGUMENT);
    assert_eq!(
        DomainError::InvalidStatusTransition {
            rule: "INVALID_STATUS_TRANSITION",
            entity: "project",
            from: String::from("Completed"),
            to: String::from("Active"),
        }
        .error_code(),
        BUSINESS_RULE_VIOLATION
    );
    assert_eq!(DomainError::SelfManagement.error_code(), DOMAIN_ERROR);
    assert_eq!(
        DomainError::OverlappingAssignment {
            employee_id: EmployeeId::new()
        }
        .error_code(),
        DOMAIN_ERROR
    );
}

#[test]
fn test_rules() {
    assert_eq!(DomainError::SelfManagement.rule(), None);
    assert_eq!(
        DomainError::OverlappingAssignment {
            employee_id: EmployeeId::new()
        }
        .rule(),
        Some("EMPLOYEE_ALREADY_ASSIGNED")
    );
}

#[test]
fn test_repository_error_display() {
    assert_eq!(
        RepositoryError::Storage(String::from("disk full")).to_string(),
        "storage failure: disk full"
    );
    assert_eq!(RepositoryError::Cancelled.to_string(), "operation cancelled");
    assert_eq!(
        RepositoryError::NotFound(String::from("project 42")).to_string(),
        "record not found: project 42"
    );
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> = Box::new(DomainError::InvalidLeaveDays);
    assert_eq!(err.to_string(), "Leave days must be positive");
}
