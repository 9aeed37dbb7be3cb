// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, PdrAction, PdrStatus, UserRole};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidStatus(String::from("BOGUS"));
    assert_eq!(format!("{err}"), "Invalid PDR status: 'BOGUS'");

    let err: DomainError = DomainError::InvalidRole(String::from("intern"));
    assert_eq!(format!("{err}"), "Invalid user role: 'intern'");

    let err: DomainError = DomainError::InvalidAction(String::from("approve"));
    assert_eq!(format!("{err}"), "Invalid PDR action: 'approve'");

    let err: DomainError = DomainError::InvalidValidationField(String::from("salary"));
    assert_eq!(format!("{err}"), "Unrecognized validation field: salary");

    let err: DomainError = DomainError::UnknownNotificationType(String::from("PDR_PARTY"));
    assert_eq!(format!("{err}"), "Unknown notification type: 'PDR_PARTY'");

    let err: DomainError = DomainError::InvalidTransition {
        from: PdrStatus::Created,
        to: PdrStatus::PlanLocked,
        action: PdrAction::ApprovePlan,
    };
    assert_eq!(
        format!("{err}"),
        "Invalid transition: CREATED -> PLAN_LOCKED via 'approvePlan'"
    );

    let err: DomainError = DomainError::RoleNotAllowed {
        from: PdrStatus::Created,
        to: PdrStatus::Submitted,
        action: PdrAction::SubmitInitialPdr,
        role: UserRole::Ceo,
    };
    assert_eq!(
        format!("{err}"),
        "Role CEO is not allowed to perform 'submitInitialPDR' (CREATED -> SUBMITTED)"
    );

    let err: DomainError = DomainError::InvalidContent(String::from("goal index 4"));
    assert_eq!(format!("{err}"), "Invalid content: goal index 4");
}
