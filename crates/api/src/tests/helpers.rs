// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use pdr_audit::Cause;
use pdr_domain::{Behavior, Goal, UserRole};

use crate::{
    AuthenticatedActor, CreatePdrRequest, FeedbackEntry, InMemoryPdrRepository,
    TransitionPdrRequest, UpdatePdrRequest, create_pdr, transition_pdr, update_pdr,
};

pub const OWNER_ID: i64 = 10;
pub const OTHER_EMPLOYEE_ID: i64 = 11;
pub const CEO_ID: i64 = 1;

pub fn create_test_owner() -> AuthenticatedActor {
    AuthenticatedActor::new(OWNER_ID, String::from("Alex Owner"), UserRole::Employee)
}

pub fn create_test_other_employee() -> AuthenticatedActor {
    AuthenticatedActor::new(
        OTHER_EMPLOYEE_ID,
        String::from("Sam Other"),
        UserRole::Employee,
    )
}

pub fn create_test_ceo() -> AuthenticatedActor {
    AuthenticatedActor::new(CEO_ID, String::from("Dana Chief"), UserRole::Ceo)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-1"), String::from("API request"))
}

pub fn create_complete_plan_request() -> UpdatePdrRequest {
    UpdatePdrRequest {
        goals: Some(vec![
            Goal::new("Grow the team", "Hire two engineers"),
            Goal::new("Cut build times", "Halve CI duration"),
        ]),
        behaviors: Some(vec![Behavior::new("Gives candid feedback")]),
        ..UpdatePdrRequest::default()
    }
}

pub fn create_feedback_request(comments: &str) -> UpdatePdrRequest {
    UpdatePdrRequest {
        behavior_feedback: vec![FeedbackEntry {
            index: 0,
            comments: Some(comments.to_string()),
        }],
        ..UpdatePdrRequest::default()
    }
}

pub fn transition_request(target_status: &str, action: &str) -> TransitionPdrRequest {
    TransitionPdrRequest {
        target_status: target_status.to_string(),
        action: action.to_string(),
    }
}

/// Creates an owner PDR for 2026 and returns its ID.
pub fn create_test_pdr(repository: &mut InMemoryPdrRepository) -> i64 {
    create_pdr(
        repository,
        &CreatePdrRequest { year: 2026 },
        &create_test_owner(),
        create_test_cause(),
    )
    .unwrap()
    .pdr
    .pdr_id
}

/// Creates a PDR, fills in a complete plan and submits it.
pub fn create_submitted_pdr(repository: &mut InMemoryPdrRepository) -> i64 {
    let pdr_id: i64 = create_test_pdr(repository);
    update_pdr(
        repository,
        pdr_id,
        create_complete_plan_request(),
        &create_test_owner(),
        &create_test_cause(),
    )
    .unwrap();
    transition_pdr(
        repository,
        pdr_id,
        &transition_request("SUBMITTED", "submitInitialPDR"),
        &create_test_owner(),
        create_test_cause(),
    )
    .unwrap();
    pdr_id
}

/// Takes a PDR through CEO feedback and plan approval.
pub fn create_locked_pdr(repository: &mut InMemoryPdrRepository) -> i64 {
    let pdr_id: i64 = create_submitted_pdr(repository);
    update_pdr(
        repository,
        pdr_id,
        create_feedback_request("Strong plan"),
        &create_test_ceo(),
        &create_test_cause(),
    )
    .unwrap();
    transition_pdr(
        repository,
        pdr_id,
        &transition_request("PLAN_LOCKED", "approvePlan"),
        &create_test_ceo(),
        create_test_cause(),
    )
    .unwrap();
    pdr_id
}
