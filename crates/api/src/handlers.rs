// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use pdr::{Command, FEEDBACK_COMMANDS, Pdr, TransitionResult, apply};
use pdr_audit::{Action, Actor, AuditEvent, Cause};
use pdr_domain::{
    NextState, PdrAction, PdrData, PdrPermissions, PdrStatus, TRANSITIONS, get_pdr_permissions,
    get_valid_next_states, validate_content_limits,
};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::repository::{NotificationRecord, PdrRepository};
use crate::request_response::{
    AuditTimelineResponse, CreatePdrRequest, CreatePdrResponse, DeletePdrResponse, FeedbackEntry,
    GetPdrResponse, GetPermissionsResponse, ListNotificationsResponse, ListPdrsRequest,
    ListPdrsResponse, PdrInfo, TransitionPdrRequest, TransitionPdrResponse,
    TransitionTableResponse, UpdatePdrRequest, UpdatePdrResponse,
};

/// Earliest review year accepted on creation.
pub const MIN_REVIEW_YEAR: u16 = 2000;
/// Latest review year accepted on creation.
pub const MAX_REVIEW_YEAR: u16 = 2100;

fn current_timestamp() -> Result<String, ApiError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format timestamp: {e}"),
        })
}

fn permissions_for(pdr: &Pdr, actor: &AuthenticatedActor) -> PdrPermissions {
    get_pdr_permissions(pdr.status, actor.role, pdr.is_owned_by(actor.user_id))
}

fn not_found(pdr_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("PDR"),
        message: format!("PDR {pdr_id} does not exist"),
    }
}

/// Converts a PDR into the view the actor is allowed to see.
fn pdr_to_info(pdr: &Pdr, permissions: &PdrPermissions) -> PdrInfo {
    let data: PdrData = if permissions.can_view_ceo_fields.is_allowed() {
        pdr.data.clone()
    } else {
        pdr.data.without_ceo_fields()
    };

    PdrInfo {
        pdr_id: pdr.pdr_id,
        owner_id: pdr.owner_id,
        year: pdr.year,
        status: pdr.status,
        data,
        is_editable: permissions.can_edit.is_allowed(),
    }
}

/// Loads a PDR the actor may view.
///
/// PDRs the actor may not view are reported exactly like missing ones.
fn load_visible_pdr(
    repository: &impl PdrRepository,
    pdr_id: i64,
    actor: &AuthenticatedActor,
) -> Result<(Pdr, PdrPermissions), ApiError> {
    let pdr: Pdr = repository.get_pdr(pdr_id)?;
    let permissions: PdrPermissions = permissions_for(&pdr, actor);

    if !permissions.can_view.is_allowed() {
        warn!(
            pdr_id,
            actor_id = actor.user_id,
            "PDR requested by a user who may not view it"
        );
        return Err(not_found(pdr_id));
    }

    Ok((pdr, permissions))
}

fn feedback_comments(entry: FeedbackEntry) -> (usize, Option<String>) {
    let comments: Option<String> = entry
        .comments
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty());
    (entry.index, comments)
}

fn update_commands(request: UpdatePdrRequest) -> Vec<Command> {
    let mut commands: Vec<Command> = Vec::new();

    if let Some(goals) = request.goals {
        commands.push(Command::ReviseGoals { goals });
    }
    if let Some(behaviors) = request.behaviors {
        commands.push(Command::ReviseBehaviors { behaviors });
    }
    for entry in request.goal_feedback {
        let (goal_index, comments) = feedback_comments(entry);
        commands.push(Command::RecordGoalFeedback {
            goal_index,
            comments,
        });
    }
    for entry in request.behavior_feedback {
        let (behavior_index, comments) = feedback_comments(entry);
        commands.push(Command::RecordBehaviorFeedback {
            behavior_index,
            comments,
        });
    }

    commands
}

/// Creates a new PDR for the acting employee.
///
/// This function:
/// - Verifies the actor is an employee
/// - Validates the review year
/// - Stores the PDR in `CREATED`
/// - Records the creation in the audit trail
///
/// # Arguments
///
/// * `repository` - The PDR repository
/// * `request` - The API request to create a PDR
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not an employee
/// - The year is outside the accepted range
/// - The employee already has a PDR for the year
pub fn create_pdr(
    repository: &mut impl PdrRepository,
    request: &CreatePdrRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreatePdrResponse, ApiError> {
    AuthorizationService::authorize_create_pdr(authenticated_actor)?;

    if !(MIN_REVIEW_YEAR..=MAX_REVIEW_YEAR).contains(&request.year) {
        return Err(ApiError::InvalidInput {
            field: String::from("year"),
            message: format!(
                "Review year must be between {MIN_REVIEW_YEAR} and {MAX_REVIEW_YEAR}, got {}",
                request.year
            ),
        });
    }

    let pdr: Pdr = repository.insert_pdr(authenticated_actor.user_id, request.year)?;

    let event: AuditEvent = AuditEvent::new(
        pdr.pdr_id,
        authenticated_actor.to_audit_actor(),
        cause,
        Action::new(
            String::from("CreatePdr"),
            Some(format!("year {}", request.year)),
        ),
        pdr.snapshot(),
        pdr.snapshot(),
    );
    repository.append_audit_event(event, current_timestamp()?);

    info!(
        pdr_id = pdr.pdr_id,
        owner_id = pdr.owner_id,
        year = pdr.year,
        "Created PDR"
    );

    let permissions: PdrPermissions = permissions_for(&pdr, authenticated_actor);
    Ok(CreatePdrResponse {
        pdr: pdr_to_info(&pdr, &permissions),
        message: format!("Created PDR {} for {}", pdr.pdr_id, pdr.year),
    })
}

/// Reads one PDR.
///
/// CEO comments are removed when the actor may not view them yet.
///
/// # Errors
///
/// Returns an error if the PDR does not exist or the actor may not view it.
pub fn get_pdr(
    repository: &impl PdrRepository,
    pdr_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<GetPdrResponse, ApiError> {
    let (pdr, permissions) = load_visible_pdr(repository, pdr_id, authenticated_actor)?;
    debug!(pdr_id, status = %pdr.status, "Read PDR");

    Ok(GetPdrResponse {
        pdr: pdr_to_info(&pdr, &permissions),
        permissions,
    })
}

/// Lists the PDRs visible to the actor.
///
/// # Errors
///
/// Returns an error if the status filter is not a known status or alias.
pub fn list_pdrs(
    repository: &impl PdrRepository,
    request: &ListPdrsRequest,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListPdrsResponse, ApiError> {
    let status_filter: Option<PdrStatus> = request
        .status
        .as_deref()
        .map(PdrStatus::normalize)
        .transpose()
        .map_err(translate_domain_error)?;

    let pdrs: Vec<PdrInfo> = repository
        .list_pdrs()
        .iter()
        .filter(|pdr| status_filter.is_none_or(|status| pdr.status == status))
        .filter_map(|pdr| {
            let permissions: PdrPermissions = permissions_for(pdr, authenticated_actor);
            permissions
                .can_view
                .is_allowed()
                .then(|| pdr_to_info(pdr, &permissions))
        })
        .collect();

    debug!(
        actor_id = authenticated_actor.user_id,
        count = pdrs.len(),
        "Listed PDRs"
    );

    Ok(ListPdrsResponse { pdrs })
}

/// Returns the actor's permissions on a PDR and the transitions open to them.
///
/// # Errors
///
/// Returns an error if the PDR does not exist or the actor may not view it.
pub fn get_permissions(
    repository: &impl PdrRepository,
    pdr_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<GetPermissionsResponse, ApiError> {
    let (pdr, permissions) = load_visible_pdr(repository, pdr_id, authenticated_actor)?;
    let next_states: Vec<NextState> = get_valid_next_states(pdr.status, authenticated_actor.role);

    Ok(GetPermissionsResponse {
        pdr_id,
        status: pdr.status,
        permissions,
        next_states,
    })
}

/// Applies content changes to a PDR.
///
/// Each requested change is a separate command with its own audit event.
/// Either every change is stored or none is.
///
/// # Arguments
///
/// * `repository` - The PDR repository
/// * `pdr_id` - The PDR to change
/// * `request` - The requested changes
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The PDR does not exist or the actor may not view it
/// - The request contains no changes
/// - The actor may not edit a field group the request touches
/// - A feedback index does not exist
/// - A text field is too long
/// - The PDR's status changed while the request was being applied
pub fn update_pdr(
    repository: &mut impl PdrRepository,
    pdr_id: i64,
    request: UpdatePdrRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: &Cause,
) -> Result<UpdatePdrResponse, ApiError> {
    let (original, _) = load_visible_pdr(&*repository, pdr_id, authenticated_actor)?;

    let commands: Vec<Command> = update_commands(request);
    if commands.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("request"),
            message: String::from("No changes were requested"),
        });
    }

    let actor: Actor = authenticated_actor.to_audit_actor();
    let mut current: Pdr = original.clone();
    let mut events: Vec<AuditEvent> = Vec::with_capacity(commands.len());
    for command in commands {
        let operation: &'static str = command.name();
        let result: TransitionResult =
            apply(&current, command, &actor, cause.clone()).map_err(|e| {
                warn!(pdr_id, operation, error = %e, "Update rejected");
                translate_core_error(e)
            })?;
        current = result.new_pdr;
        events.push(result.audit_event);
    }

    validate_content_limits(&current.data).map_err(translate_domain_error)?;
    repository.save_pdr(&current, original.status)?;

    let recorded_at: String = current_timestamp()?;
    let changes: usize = events.len();
    for event in events {
        repository.append_audit_event(event, recorded_at.clone());
    }

    info!(
        pdr_id,
        actor_id = authenticated_actor.user_id,
        changes,
        "Updated PDR"
    );

    let permissions: PdrPermissions = permissions_for(&current, authenticated_actor);
    Ok(UpdatePdrResponse {
        pdr: pdr_to_info(&current, &permissions),
        changes,
        message: format!("Applied {changes} change(s) to PDR {pdr_id}"),
    })
}

/// Moves a PDR to a new status.
///
/// This function:
/// - Parses the target status (legacy names accepted) and the action
/// - Applies the transition through the core, which checks the transition
///   table and the content requirements
/// - Stores the PDR only if its status has not changed in the meantime
/// - Records the audit event and queues the notification
///
/// # Arguments
///
/// * `repository` - The PDR repository
/// * `pdr_id` - The PDR to transition
/// * `request` - The requested status and action
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The PDR does not exist or the actor may not view it
/// - The status or action name is not recognized
/// - The transition is not in the table or not open to the actor's role
/// - The PDR content does not meet the transition's requirements
/// - The PDR's status changed while the request was being applied
pub fn transition_pdr(
    repository: &mut impl PdrRepository,
    pdr_id: i64,
    request: &TransitionPdrRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<TransitionPdrResponse, ApiError> {
    let (pdr, _) = load_visible_pdr(&*repository, pdr_id, authenticated_actor)?;

    let target: PdrStatus =
        PdrStatus::normalize(&request.target_status).map_err(translate_domain_error)?;
    let action: PdrAction = request.action.parse().map_err(translate_domain_error)?;

    let result: TransitionResult = apply(
        &pdr,
        Command::Transition { target, action },
        &authenticated_actor.to_audit_actor(),
        cause,
    )
    .map_err(|e| {
        warn!(
            pdr_id,
            action = %action,
            from = %pdr.status,
            to = %target,
            error = %e,
            "Transition rejected"
        );
        translate_core_error(e)
    })?;

    repository.save_pdr(&result.new_pdr, pdr.status)?;

    let recorded_at: String = current_timestamp()?;
    repository.append_audit_event(result.audit_event, recorded_at.clone());
    let notification: Option<NotificationRecord> = result
        .notification
        .map(|notification| repository.push_notification(notification, recorded_at));

    info!(
        pdr_id,
        action = %action,
        from = %pdr.status,
        to = %result.new_pdr.status,
        "PDR transitioned"
    );

    let permissions: PdrPermissions = permissions_for(&result.new_pdr, authenticated_actor);
    Ok(TransitionPdrResponse {
        pdr: pdr_to_info(&result.new_pdr, &permissions),
        previous_status: pdr.status,
        notification,
        message: format!(
            "PDR {pdr_id} moved from {} to {}",
            pdr.status, result.new_pdr.status
        ),
    })
}

/// Deletes a PDR that has not been submitted yet.
///
/// The audit trail is kept and gains a deletion event.
///
/// # Errors
///
/// Returns an error if:
/// - The PDR does not exist or the actor may not view it
/// - The actor does not own the PDR
/// - The PDR has left `CREATED`
pub fn delete_pdr(
    repository: &mut impl PdrRepository,
    pdr_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<DeletePdrResponse, ApiError> {
    let (pdr, _) = load_visible_pdr(&*repository, pdr_id, authenticated_actor)?;
    AuthorizationService::authorize_delete_pdr(authenticated_actor, &pdr)?;

    let deleted: Pdr = repository.delete_pdr(pdr_id)?;
    let event: AuditEvent = AuditEvent::new(
        pdr_id,
        authenticated_actor.to_audit_actor(),
        cause,
        Action::new(String::from("DeletePdr"), None),
        deleted.snapshot(),
        deleted.snapshot(),
    );
    repository.append_audit_event(event, current_timestamp()?);

    info!(pdr_id, owner_id = deleted.owner_id, "Deleted PDR");

    Ok(DeletePdrResponse {
        pdr_id,
        message: format!("Deleted PDR {pdr_id}"),
    })
}

/// Lists the notifications addressed to the actor.
#[must_use]
pub fn list_notifications(
    repository: &impl PdrRepository,
    authenticated_actor: &AuthenticatedActor,
) -> ListNotificationsResponse {
    ListNotificationsResponse {
        notifications: repository.notifications_for(authenticated_actor.user_id),
    }
}

/// Returns a PDR's audit trail.
///
/// Actors who may not view CEO fields get the trail without CEO feedback
/// events and without feedback summaries.
///
/// # Errors
///
/// Returns an error if the PDR does not exist or the actor may not view it.
pub fn audit_timeline(
    repository: &impl PdrRepository,
    pdr_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<AuditTimelineResponse, ApiError> {
    let (_, permissions) = load_visible_pdr(repository, pdr_id, authenticated_actor)?;
    let recorded: Vec<AuditEvent> = repository.audit_events(pdr_id);

    let events: Vec<AuditEvent> = if permissions.can_view_ceo_fields.is_allowed() {
        recorded
    } else {
        recorded
            .into_iter()
            .filter(|event| !FEEDBACK_COMMANDS.contains(&event.action.name.as_str()))
            .map(AuditEvent::without_feedback)
            .collect()
    };

    Ok(AuditTimelineResponse { pdr_id, events })
}

/// Returns the static transition table.
#[must_use]
pub fn list_transitions() -> TransitionTableResponse {
    TransitionTableResponse {
        transitions: TRANSITIONS.to_vec(),
    }
}
