// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the transition table and transition validator.

use crate::{
    DomainError, NextState, PdrAction, PdrStatus, TRANSITIONS, UserRole, ValidationResult,
    find_transition, get_valid_next_states, validate_state_transition,
};

fn table_has_row(from: PdrStatus, to: PdrStatus, action: PdrAction) -> bool {
    TRANSITIONS
        .iter()
        .any(|row| row.from == from && row.to == to && row.action == action)
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn test_employee_can_submit_initial_plan() {
    let result: ValidationResult = validate_state_transition(
        PdrStatus::Created,
        PdrStatus::Submitted,
        PdrAction::SubmitInitialPdr,
        UserRole::Employee,
    );

    assert!(result.is_valid());
    assert!(result.errors().is_empty());
}

#[test]
fn test_ceo_cannot_submit_initial_plan() {
    let result: ValidationResult = validate_state_transition(
        PdrStatus::Created,
        PdrStatus::Submitted,
        PdrAction::SubmitInitialPdr,
        UserRole::Ceo,
    );

    assert!(!result.is_valid());
    assert_eq!(result.errors().len(), 1);
    assert!(result.errors()[0].contains("Role CEO is not allowed"));
}

#[test]
fn test_skip_from_created_to_plan_locked_is_rejected() {
    let result: ValidationResult = validate_state_transition(
        PdrStatus::Created,
        PdrStatus::PlanLocked,
        PdrAction::ApprovePlan,
        UserRole::Ceo,
    );

    assert!(!result.is_valid());
    assert_eq!(result.errors().len(), 1);
    assert!(result.errors()[0].starts_with("Invalid transition"));
}

#[test]
fn test_wrong_action_name_is_rejected() {
    let result = find_transition(
        PdrStatus::Created,
        PdrStatus::Submitted,
        PdrAction::SubmitMidYear,
        UserRole::Employee,
    );

    assert_eq!(
        result,
        Err(DomainError::InvalidTransition {
            from: PdrStatus::Created,
            to: PdrStatus::Submitted,
            action: PdrAction::SubmitMidYear,
        })
    );
}

#[test]
fn test_role_and_triple_failures_are_distinguishable() {
    let missing_row: ValidationResult = validate_state_transition(
        PdrStatus::Created,
        PdrStatus::Completed,
        PdrAction::CompleteReview,
        UserRole::Ceo,
    );
    let wrong_role: ValidationResult = validate_state_transition(
        PdrStatus::EndYearSubmitted,
        PdrStatus::Completed,
        PdrAction::CompleteReview,
        UserRole::Employee,
    );

    assert_ne!(missing_row.errors(), wrong_role.errors());
}

#[test]
fn test_ceo_may_bypass_mid_year_submission() {
    let transition = find_transition(
        PdrStatus::PlanLocked,
        PdrStatus::MidYearApproved,
        PdrAction::ApproveMidYear,
        UserRole::Ceo,
    )
    .unwrap();

    assert!(!transition.requires_validation);
}

#[test]
fn test_employee_may_skip_mid_year_entirely() {
    assert!(
        validate_state_transition(
            PdrStatus::PlanLocked,
            PdrStatus::EndYearSubmitted,
            PdrAction::SubmitEndYear,
            UserRole::Employee,
        )
        .is_valid()
    );
    assert!(
        validate_state_transition(
            PdrStatus::MidYearApproved,
            PdrStatus::EndYearSubmitted,
            PdrAction::SubmitEndYear,
            UserRole::Employee,
        )
        .is_valid()
    );
}

#[test]
fn test_mark_booked_needs_no_validation() {
    let transition = find_transition(
        PdrStatus::Submitted,
        PdrStatus::PlanLocked,
        PdrAction::MarkBooked,
        UserRole::Ceo,
    )
    .unwrap();

    assert!(!transition.requires_validation);
    assert!(transition.validation_fields.is_empty());
}

// ============================================================================
// Table-wide properties
// ============================================================================

#[test]
fn test_triples_absent_from_table_are_invalid_for_every_role() {
    for from in PdrStatus::ALL {
        for to in PdrStatus::ALL {
            for action in PdrAction::ALL {
                if table_has_row(from, to, action) {
                    continue;
                }
                for role in UserRole::ALL {
                    let result = validate_state_transition(from, to, action, role);
                    assert!(
                        !result.is_valid(),
                        "{from} -> {to} via {action} should be invalid for {role}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_table_rows_are_valid_exactly_for_allowed_roles() {
    for row in TRANSITIONS {
        for role in UserRole::ALL {
            let result = validate_state_transition(row.from, row.to, row.action, role);
            assert_eq!(result.is_valid(), row.allowed_roles.contains(&role));
        }
    }
}

#[test]
fn test_table_rows_are_unique() {
    for (i, a) in TRANSITIONS.iter().enumerate() {
        for b in &TRANSITIONS[i + 1..] {
            assert!(
                !(a.from == b.from && a.to == b.to && a.action == b.action),
                "duplicate row {} -> {} via {}",
                a.from,
                a.to,
                a.action
            );
        }
    }
}

#[test]
fn test_validation_fields_present_only_when_required() {
    for row in TRANSITIONS {
        assert_eq!(row.requires_validation, !row.validation_fields.is_empty());
    }
}

#[test]
fn test_no_row_leaves_terminal_status() {
    assert!(
        TRANSITIONS
            .iter()
            .all(|row| !row.from.is_terminal())
    );
}

#[test]
fn test_every_non_terminal_status_has_an_exit() {
    for status in PdrStatus::ALL {
        if status.is_terminal() {
            continue;
        }
        let exits: usize = UserRole::ALL
            .into_iter()
            .map(|role| get_valid_next_states(status, role).len())
            .sum();
        assert!(exits > 0, "{status} has no outgoing transition");
    }
}

// ============================================================================
// Next-state listing
// ============================================================================

#[test]
fn test_valid_next_states_matches_table_projection() {
    for status in PdrStatus::ALL {
        for role in UserRole::ALL {
            let expected: Vec<NextState> = TRANSITIONS
                .iter()
                .filter(|row| row.from == status && row.allowed_roles.contains(&role))
                .map(|row| NextState {
                    state: row.to,
                    action: row.action,
                })
                .collect();

            assert_eq!(get_valid_next_states(status, role), expected);
        }
    }
}

#[test]
fn test_completed_has_no_next_states() {
    assert!(get_valid_next_states(PdrStatus::Completed, UserRole::Ceo).is_empty());
    assert!(get_valid_next_states(PdrStatus::Completed, UserRole::Employee).is_empty());
}

#[test]
fn test_ceo_next_states_from_plan_locked() {
    let next: Vec<NextState> = get_valid_next_states(PdrStatus::PlanLocked, UserRole::Ceo);

    assert_eq!(
        next,
        vec![NextState {
            state: PdrStatus::MidYearApproved,
            action: PdrAction::ApproveMidYear,
        }]
    );
}

#[test]
fn test_employee_next_states_from_plan_locked() {
    let next: Vec<NextState> = get_valid_next_states(PdrStatus::PlanLocked, UserRole::Employee);

    assert_eq!(next.len(), 2);
    assert!(next.contains(&NextState {
        state: PdrStatus::MidYearSubmitted,
        action: PdrAction::SubmitMidYear,
    }));
    assert!(next.contains(&NextState {
        state: PdrStatus::EndYearSubmitted,
        action: PdrAction::SubmitEndYear,
    }));
}

#[test]
fn test_ceo_has_two_ways_to_lock_a_submitted_plan() {
    let next: Vec<NextState> = get_valid_next_states(PdrStatus::Submitted, UserRole::Ceo);
    let actions: Vec<PdrAction> = next.iter().map(|n| n.action).collect();

    assert_eq!(actions, vec![PdrAction::ApprovePlan, PdrAction::MarkBooked]);
    assert!(next.iter().all(|n| n.state == PdrStatus::PlanLocked));
}

// ============================================================================
// Action names
// ============================================================================

#[test]
fn test_action_string_round_trip() {
    for action in PdrAction::ALL {
        assert_eq!(action.as_str().parse::<PdrAction>(), Ok(action));
    }
}

#[test]
fn test_action_parse_is_exact() {
    assert!("submitInitialPdr".parse::<PdrAction>().is_err());
    assert!("approve_plan".parse::<PdrAction>().is_err());
}

#[test]
fn test_action_serializes_to_wire_name() {
    let json: String = serde_json::to_string(&PdrAction::SubmitInitialPdr).unwrap();
    assert_eq!(json, "\"submitInitialPDR\"");
}
