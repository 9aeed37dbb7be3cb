// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{Pdr, TransitionResult};
use pdr_audit::{Action, Actor, AuditEvent, Cause};
use pdr_domain::{
    Behavior, Capability, Goal, Notification, PdrAction, PdrPermissions, PdrStatus,
    StateTransition, ValidationResult, create_pdr_notification, find_transition,
    get_pdr_permissions, validate_transition_requirements,
};

fn require(
    capability: Capability,
    operation: &str,
    permissions: &PdrPermissions,
) -> Result<(), CoreError> {
    if capability.is_allowed() {
        return Ok(());
    }
    Err(CoreError::PermissionDenied {
        operation: operation.to_string(),
        reason: permissions
            .read_only_reason
            .clone()
            .unwrap_or_else(|| String::from("not permitted for this role and status")),
    })
}

// CEO comments are carried over by position. Callers anchor commented
// entries with `ensure_feedback_anchored` first.
fn merge_goals(existing: &[Goal], revised: Vec<Goal>) -> Vec<Goal> {
    revised
        .into_iter()
        .enumerate()
        .map(|(i, goal)| Goal {
            ceo_comments: existing.get(i).and_then(|old| old.ceo_comments.clone()),
            ..goal
        })
        .collect()
}

fn merge_behaviors(existing: &[Behavior], revised: Vec<Behavior>) -> Vec<Behavior> {
    revised
        .into_iter()
        .enumerate()
        .map(|(i, behavior)| Behavior {
            ceo_comments: existing.get(i).and_then(|old| old.ceo_comments.clone()),
            ..behavior
        })
        .collect()
}

/// Rejects a revision that would detach CEO feedback from its entry.
///
/// An entry carrying CEO comments must stay at its position under the same
/// key (goal title or behavior description). New entries may be appended
/// and commented entries may have their other fields edited.
fn ensure_feedback_anchored<T>(
    operation: &str,
    field: &str,
    existing: &[T],
    revised: &[T],
    key: impl Fn(&T) -> &str,
    has_feedback: impl Fn(&T) -> bool,
) -> Result<(), CoreError> {
    let detached: Option<usize> = existing.iter().enumerate().find_map(|(i, old)| {
        let kept: bool = revised
            .get(i)
            .is_some_and(|new| key(new).trim() == key(old).trim());
        (has_feedback(old) && !kept).then_some(i)
    });

    match detached {
        None => Ok(()),
        Some(index) => Err(CoreError::PermissionDenied {
            operation: operation.to_string(),
            reason: format!(
                "{field} {index} carries CEO feedback and cannot be removed or replaced"
            ),
        }),
    }
}

fn apply_transition(
    pdr: &Pdr,
    target: PdrStatus,
    action: PdrAction,
    actor: &Actor,
    permissions: &PdrPermissions,
) -> Result<(Pdr, Notification), CoreError> {
    require(permissions.can_view, action.as_str(), permissions)?;

    let transition: &StateTransition = find_transition(pdr.status, target, action, actor.role)?;

    let requirements: ValidationResult = validate_transition_requirements(&pdr.data, transition);
    if !requirements.is_valid() {
        return Err(CoreError::RequirementsNotMet(requirements.into_errors()));
    }

    let mut new_pdr: Pdr = pdr.clone();
    new_pdr.status = transition.to;

    let notification: Notification = create_pdr_notification(
        pdr.pdr_id,
        pdr.owner_id,
        action.notification_type(),
        Some(&actor.display_name),
    );

    Ok((new_pdr, notification))
}

/// Applies a command to a PDR, producing the new PDR and an audit event.
///
/// This function:
/// - Resolves the actor's permissions from the PDR's status and ownership
/// - For transitions, checks the transition table and the content requirements
/// - For edits, checks the field-group edit capability
/// - Never mutates the input PDR
///
/// # Arguments
///
/// * `pdr` - The current PDR (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new PDR, the audit event and an
///   optional notification
/// * `Err(CoreError)` if the command is not permitted or invalid
///
/// # Errors
///
/// Returns an error if:
/// - The actor's permissions do not cover the command
/// - The transition is not in the table or not open to the actor's role
/// - The PDR content does not satisfy the transition's requirements
/// - A feedback index is out of range
pub fn apply(
    pdr: &Pdr,
    command: Command,
    actor: &Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let permissions: PdrPermissions =
        get_pdr_permissions(pdr.status, actor.role, pdr.is_owned_by(actor.user_id));
    let name: &'static str = command.name();

    let (new_pdr, notification, details): (Pdr, Option<Notification>, String) = match command {
        Command::Transition { target, action } => {
            let (new_pdr, notification) =
                apply_transition(pdr, target, action, actor, &permissions)?;
            let details: String = format!("{} -> {}", pdr.status, new_pdr.status);
            (new_pdr, Some(notification), details)
        }
        Command::ReviseGoals { goals } => {
            require(permissions.can_edit_employee_fields, name, &permissions)?;
            if !permissions.can_edit_ceo_fields.is_allowed() {
                ensure_feedback_anchored(
                    name,
                    "goal",
                    &pdr.data.goals,
                    &goals,
                    |goal| goal.title.as_str(),
                    |goal| goal.ceo_comments.is_some(),
                )?;
            }
            let mut new_pdr: Pdr = pdr.clone();
            let details: String = format!("{} goal(s)", goals.len());
            new_pdr.data.goals = merge_goals(&pdr.data.goals, goals);
            (new_pdr, None, details)
        }
        Command::ReviseBehaviors { behaviors } => {
            require(permissions.can_edit_employee_fields, name, &permissions)?;
            if !permissions.can_edit_ceo_fields.is_allowed() {
                ensure_feedback_anchored(
                    name,
                    "behavior",
                    &pdr.data.behaviors,
                    &behaviors,
                    |behavior| behavior.description.as_str(),
                    |behavior| behavior.ceo_comments.is_some(),
                )?;
            }
            let mut new_pdr: Pdr = pdr.clone();
            let details: String = format!("{} behavior(s)", behaviors.len());
            new_pdr.data.behaviors = merge_behaviors(&pdr.data.behaviors, behaviors);
            (new_pdr, None, details)
        }
        Command::RecordGoalFeedback {
            goal_index,
            comments,
        } => {
            require(permissions.can_edit_ceo_fields, name, &permissions)?;
            let mut new_pdr: Pdr = pdr.clone();
            let len: usize = new_pdr.data.goals.len();
            let goal: &mut Goal = new_pdr
                .data
                .goals
                .get_mut(goal_index)
                .ok_or(CoreError::IndexOutOfRange {
                    field: "goal",
                    index: goal_index,
                    len,
                })?;
            goal.ceo_comments = comments;
            (new_pdr, None, format!("goal {goal_index}"))
        }
        Command::RecordBehaviorFeedback {
            behavior_index,
            comments,
        } => {
            require(permissions.can_edit_ceo_fields, name, &permissions)?;
            let mut new_pdr: Pdr = pdr.clone();
            let len: usize = new_pdr.data.behaviors.len();
            let behavior: &mut Behavior = new_pdr
                .data
                .behaviors
                .get_mut(behavior_index)
                .ok_or(CoreError::IndexOutOfRange {
                    field: "behavior",
                    index: behavior_index,
                    len,
                })?;
            behavior.ceo_comments = comments;
            (new_pdr, None, format!("behavior {behavior_index}"))
        }
    };

    let audit_event: AuditEvent = AuditEvent::new(
        pdr.pdr_id,
        actor.clone(),
        cause,
        Action::new(name.to_string(), Some(details)),
        pdr.snapshot(),
        new_pdr.snapshot(),
    );

    Ok(TransitionResult {
        new_pdr,
        audit_event,
        notification,
    })
}
