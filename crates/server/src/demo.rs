// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Demo data for manual testing.
//!
//! Seeds one PDR in every status, each owned by its own demo employee and
//! reviewed by a single demo CEO.

use pdr_api::{
    ApiError, AuthenticatedActor, CreatePdrRequest, FeedbackEntry, InMemoryPdrRepository,
    TransitionPdrRequest, UpdatePdrRequest, create_pdr, transition_pdr, update_pdr,
};
use pdr_audit::Cause;
use pdr_domain::{Behavior, Goal, PdrAction, PdrStatus, UserRole};
use tracing::info;

/// The demo reviewer's user ID.
pub const DEMO_CEO_ID: i64 = 1;
/// Demo employees are numbered from here, one per status.
pub const DEMO_EMPLOYEE_BASE_ID: i64 = 100;
const DEMO_YEAR: u16 = 2026;

// The main workflow path. Each step names the status it reaches.
const DEMO_PATH: [(PdrStatus, PdrAction, UserRole); 6] = [
    (
        PdrStatus::Submitted,
        PdrAction::SubmitInitialPdr,
        UserRole::Employee,
    ),
    (PdrStatus::PlanLocked, PdrAction::ApprovePlan, UserRole::Ceo),
    (
        PdrStatus::MidYearSubmitted,
        PdrAction::SubmitMidYear,
        UserRole::Employee,
    ),
    (
        PdrStatus::MidYearApproved,
        PdrAction::ApproveMidYear,
        UserRole::Ceo,
    ),
    (
        PdrStatus::EndYearSubmitted,
        PdrAction::SubmitEndYear,
        UserRole::Employee,
    ),
    (
        PdrStatus::Completed,
        PdrAction::CompleteReview,
        UserRole::Ceo,
    ),
];

fn demo_cause() -> Cause {
    Cause::new(String::from("seed-demo"), String::from("Demo data seeding"))
}

fn demo_ceo() -> AuthenticatedActor {
    AuthenticatedActor::new(DEMO_CEO_ID, String::from("Demo CEO"), UserRole::Ceo)
}

fn demo_plan() -> UpdatePdrRequest {
    UpdatePdrRequest {
        goals: Some(vec![
            Goal::new(
                "Improve onboarding",
                "Cut time to first commit for new hires",
            ),
            Goal::new("Mentor a junior engineer", "Hold fortnightly pairing sessions"),
        ]),
        behaviors: Some(vec![Behavior {
            description: String::from("Shares context early"),
            self_assessment: Some(String::from("Improving")),
            ceo_comments: None,
        }]),
        ..UpdatePdrRequest::default()
    }
}

fn demo_feedback() -> UpdatePdrRequest {
    UpdatePdrRequest {
        behavior_feedback: vec![FeedbackEntry {
            index: 0,
            comments: Some(String::from("Clear and proactive communication")),
        }],
        ..UpdatePdrRequest::default()
    }
}

fn seed_one(
    repository: &mut InMemoryPdrRepository,
    owner: &AuthenticatedActor,
    status: PdrStatus,
) -> Result<i64, ApiError> {
    let ceo: AuthenticatedActor = demo_ceo();
    let pdr_id: i64 = create_pdr(
        repository,
        &CreatePdrRequest { year: DEMO_YEAR },
        owner,
        demo_cause(),
    )?
    .pdr
    .pdr_id;

    if status == PdrStatus::Created {
        return Ok(pdr_id);
    }

    update_pdr(repository, pdr_id, demo_plan(), owner, &demo_cause())?;

    for (target, action, role) in DEMO_PATH {
        if target == PdrStatus::PlanLocked {
            update_pdr(repository, pdr_id, demo_feedback(), &ceo, &demo_cause())?;
        }

        let actor: &AuthenticatedActor = match role {
            UserRole::Employee => owner,
            UserRole::Ceo => &ceo,
        };
        transition_pdr(
            repository,
            pdr_id,
            &TransitionPdrRequest {
                target_status: target.to_string(),
                action: action.to_string(),
            },
            actor,
            demo_cause(),
        )?;

        if target == status {
            break;
        }
    }

    Ok(pdr_id)
}

/// Seeds one demo PDR per status.
///
/// # Errors
///
/// Returns an error if any step of the workflow is rejected.
pub fn seed_demo_data(repository: &mut InMemoryPdrRepository) -> Result<usize, ApiError> {
    let mut seeded: usize = 0;

    for (offset, status) in (1_i64..).zip(PdrStatus::ALL) {
        let owner: AuthenticatedActor = AuthenticatedActor::new(
            DEMO_EMPLOYEE_BASE_ID + offset,
            format!("Demo Employee {offset}"),
            UserRole::Employee,
        );
        let pdr_id: i64 = seed_one(repository, &owner, status)?;
        info!(pdr_id, status = %status, owner_id = owner.user_id, "Seeded demo PDR");
        seeded += 1;
    }

    Ok(seeded)
}
