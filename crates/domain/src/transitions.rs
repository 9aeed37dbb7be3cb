// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! PDR status transition table and transition validation.
//!
//! The table is the single list of legal status changes. Every row names
//! the action that performs it, the roles that may trigger it, and the
//! content checks that must pass before the status may change.
//! Transitions are user-initiated only; nothing here advances status on
//! its own.

use crate::error::DomainError;
use crate::notification::NotificationType;
use crate::types::{PdrStatus, UserRole};
use crate::validation::{ValidationField, ValidationResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A named workflow action that moves a PDR between statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PdrAction {
    /// Employee submits the initial plan.
    #[serde(rename = "submitInitialPDR")]
    SubmitInitialPdr,
    /// CEO approves the initial plan after review.
    #[serde(rename = "approvePlan")]
    ApprovePlan,
    /// CEO records that the planning meeting is booked, locking the plan.
    #[serde(rename = "markBooked")]
    MarkBooked,
    /// Employee submits the mid-year check-in.
    #[serde(rename = "submitMidYear")]
    SubmitMidYear,
    /// CEO approves the mid-year check-in.
    #[serde(rename = "approveMidYear")]
    ApproveMidYear,
    /// Employee submits the end-year review.
    #[serde(rename = "submitEndYear")]
    SubmitEndYear,
    /// CEO completes the end-year review.
    #[serde(rename = "completeReview")]
    CompleteReview,
}

impl PdrAction {
    /// All actions.
    pub const ALL: [Self; 7] = [
        Self::SubmitInitialPdr,
        Self::ApprovePlan,
        Self::MarkBooked,
        Self::SubmitMidYear,
        Self::ApproveMidYear,
        Self::SubmitEndYear,
        Self::CompleteReview,
    ];

    /// Returns the wire name of the action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SubmitInitialPdr => "submitInitialPDR",
            Self::ApprovePlan => "approvePlan",
            Self::MarkBooked => "markBooked",
            Self::SubmitMidYear => "submitMidYear",
            Self::ApproveMidYear => "approveMidYear",
            Self::SubmitEndYear => "submitEndYear",
            Self::CompleteReview => "completeReview",
        }
    }

    /// Returns the notification sent to the PDR owner when this action succeeds.
    #[must_use]
    pub const fn notification_type(&self) -> NotificationType {
        match self {
            Self::SubmitInitialPdr | Self::SubmitMidYear | Self::SubmitEndYear => {
                NotificationType::PdrSubmitted
            }
            Self::ApprovePlan | Self::MarkBooked => NotificationType::PdrLocked,
            Self::ApproveMidYear => NotificationType::PdrFeedback,
            Self::CompleteReview => NotificationType::PdrCompleted,
        }
    }
}

impl FromStr for PdrAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| DomainError::InvalidAction(s.to_string()))
    }
}

impl std::fmt::Display for PdrAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One legal status change.
///
/// All instances live in [`TRANSITIONS`] and are immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StateTransition {
    /// The status the PDR must currently hold.
    pub from: PdrStatus,
    /// The status the PDR moves to.
    pub to: PdrStatus,
    /// The action that performs the change.
    pub action: PdrAction,
    /// Roles permitted to perform the action.
    pub allowed_roles: &'static [UserRole],
    /// Whether content checks gate this transition.
    pub requires_validation: bool,
    /// The content checks to run when `requires_validation` is set.
    pub validation_fields: &'static [ValidationField],
}

impl StateTransition {
    /// Returns true if the role may perform this transition.
    #[must_use]
    pub fn allows(&self, role: UserRole) -> bool {
        self.allowed_roles.contains(&role)
    }
}

const EMPLOYEE_ONLY: &[UserRole] = &[UserRole::Employee];
const CEO_ONLY: &[UserRole] = &[UserRole::Ceo];
const PLAN_CONTENT: &[ValidationField] = &[ValidationField::Goals, ValidationField::Behaviors];
const GOALS_ONLY: &[ValidationField] = &[ValidationField::Goals];
const CEO_FEEDBACK: &[ValidationField] = &[ValidationField::CeoFields];

/// The ordered table of legal transitions.
///
/// Mid-year is optional: the CEO may approve mid-year directly from
/// `PLAN_LOCKED`, and the employee may go straight to the end-year
/// submission from `PLAN_LOCKED`.
pub const TRANSITIONS: &[StateTransition] = &[
    StateTransition {
        from: PdrStatus::Created,
        to: PdrStatus::Submitted,
        action: PdrAction::SubmitInitialPdr,
        allowed_roles: EMPLOYEE_ONLY,
        requires_validation: true,
        validation_fields: PLAN_CONTENT,
    },
    StateTransition {
        from: PdrStatus::Submitted,
        to: PdrStatus::PlanLocked,
        action: PdrAction::ApprovePlan,
        allowed_roles: CEO_ONLY,
        requires_validation: true,
        validation_fields: CEO_FEEDBACK,
    },
    StateTransition {
        from: PdrStatus::Submitted,
        to: PdrStatus::PlanLocked,
        action: PdrAction::MarkBooked,
        allowed_roles: CEO_ONLY,
        requires_validation: false,
        validation_fields: &[],
    },
    StateTransition {
        from: PdrStatus::PlanLocked,
        to: PdrStatus::MidYearSubmitted,
        action: PdrAction::SubmitMidYear,
        allowed_roles: EMPLOYEE_ONLY,
        requires_validation: true,
        validation_fields: GOALS_ONLY,
    },
    StateTransition {
        from: PdrStatus::PlanLocked,
        to: PdrStatus::MidYearApproved,
        action: PdrAction::ApproveMidYear,
        allowed_roles: CEO_ONLY,
        requires_validation: false,
        validation_fields: &[],
    },
    StateTransition {
        from: PdrStatus::MidYearSubmitted,
        to: PdrStatus::MidYearApproved,
        action: PdrAction::ApproveMidYear,
        allowed_roles: CEO_ONLY,
        requires_validation: true,
        validation_fields: CEO_FEEDBACK,
    },
    StateTransition {
        from: PdrStatus::PlanLocked,
        to: PdrStatus::EndYearSubmitted,
        action: PdrAction::SubmitEndYear,
        allowed_roles: EMPLOYEE_ONLY,
        requires_validation: true,
        validation_fields: PLAN_CONTENT,
    },
    StateTransition {
        from: PdrStatus::MidYearApproved,
        to: PdrStatus::EndYearSubmitted,
        action: PdrAction::SubmitEndYear,
        allowed_roles: EMPLOYEE_ONLY,
        requires_validation: true,
        validation_fields: PLAN_CONTENT,
    },
    StateTransition {
        from: PdrStatus::EndYearSubmitted,
        to: PdrStatus::Completed,
        action: PdrAction::CompleteReview,
        allowed_roles: CEO_ONLY,
        requires_validation: true,
        validation_fields: CEO_FEEDBACK,
    },
];

/// A reachable next status together with the action that reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NextState {
    /// The status the action leads to.
    pub state: PdrStatus,
    /// The action to perform.
    pub action: PdrAction,
}

/// Looks up the transition row for an attempted status change.
///
/// Matching is exact on `(from, to, action)`. A skip across two rows is
/// never matched even when a two-step path exists.
///
/// # Arguments
///
/// * `from` - The current status
/// * `to` - The requested status
/// * `action` - The action being attempted
/// * `role` - The acting role
///
/// # Errors
///
/// Returns an error if:
/// - No row matches the triple (`DomainError::InvalidTransition`)
/// - The row exists but excludes the role (`DomainError::RoleNotAllowed`)
pub fn find_transition(
    from: PdrStatus,
    to: PdrStatus,
    action: PdrAction,
    role: UserRole,
) -> Result<&'static StateTransition, DomainError> {
    let transition: &'static StateTransition = TRANSITIONS
        .iter()
        .find(|row| row.from == from && row.to == to && row.action == action)
        .ok_or(DomainError::InvalidTransition { from, to, action })?;

    if !transition.allows(role) {
        return Err(DomainError::RoleNotAllowed {
            from,
            to,
            action,
            role,
        });
    }

    Ok(transition)
}

/// Validates an attempted status change against the transition table.
///
/// Only the first failing condition is reported.
#[must_use]
pub fn validate_state_transition(
    from: PdrStatus,
    to: PdrStatus,
    action: PdrAction,
    role: UserRole,
) -> ValidationResult {
    match find_transition(from, to, action, role) {
        Ok(_) => ValidationResult::valid(),
        Err(err) => ValidationResult::from_errors(vec![err.to_string()]),
    }
}

/// Returns every status the role can move the PDR to from `current`.
///
/// Terminal statuses and roles without an eligible action yield an empty list.
#[must_use]
pub fn get_valid_next_states(current: PdrStatus, role: UserRole) -> Vec<NextState> {
    TRANSITIONS
        .iter()
        .filter(|row| row.from == current && row.allows(role))
        .map(|row| NextState {
            state: row.to,
            action: row.action,
        })
        .collect()
}
