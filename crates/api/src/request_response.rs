// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use pdr_audit::AuditEvent;
use pdr_domain::{
    Behavior, Goal, NextState, PdrData, PdrPermissions, PdrStatus, StateTransition,
};

use crate::repository::NotificationRecord;

/// API request to start a PDR for a review year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePdrRequest {
    /// The review year (e.g., 2026).
    pub year: u16,
}

/// A PDR as seen by one actor.
///
/// CEO comments are removed when the actor may not view them.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PdrInfo {
    /// The record identifier.
    pub pdr_id: i64,
    /// The owning employee.
    pub owner_id: i64,
    /// The review year.
    pub year: u16,
    /// The current status.
    pub status: PdrStatus,
    /// Goals and behaviors.
    pub data: PdrData,
    /// Whether the actor may edit any part of the PDR.
    pub is_editable: bool,
}

/// API response for a successful PDR creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreatePdrResponse {
    /// The created PDR.
    pub pdr: PdrInfo,
    /// A success message.
    pub message: String,
}

/// API response for reading one PDR.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetPdrResponse {
    /// The PDR.
    pub pdr: PdrInfo,
    /// What the actor may do with it.
    pub permissions: PdrPermissions,
}

/// API request to list PDRs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListPdrsRequest {
    /// Only return PDRs in this status. Legacy status names are accepted.
    pub status: Option<String>,
}

/// API response listing the PDRs visible to the actor.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListPdrsResponse {
    /// The visible PDRs ordered by ID.
    pub pdrs: Vec<PdrInfo>,
}

/// API response describing what the actor may do with a PDR.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct GetPermissionsResponse {
    /// The PDR.
    pub pdr_id: i64,
    /// The PDR's current status.
    pub status: PdrStatus,
    /// The actor's permissions.
    pub permissions: PdrPermissions,
    /// The transitions the actor may attempt next.
    pub next_states: Vec<NextState>,
}

/// CEO feedback on one goal or behavior.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FeedbackEntry {
    /// Position of the goal or behavior.
    pub index: usize,
    /// The feedback, or `None` to clear it.
    #[serde(default)]
    pub comments: Option<String>,
}

/// API request to change PDR content.
///
/// Employee fields and CEO feedback may be sent together; each part is
/// checked against the actor's permissions separately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdatePdrRequest {
    /// Replacement goal list.
    pub goals: Option<Vec<Goal>>,
    /// Replacement behavior list.
    pub behaviors: Option<Vec<Behavior>>,
    /// CEO feedback on goals.
    pub goal_feedback: Vec<FeedbackEntry>,
    /// CEO feedback on behaviors.
    pub behavior_feedback: Vec<FeedbackEntry>,
}

/// API response for a successful update.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdatePdrResponse {
    /// The updated PDR.
    pub pdr: PdrInfo,
    /// The number of audited changes applied.
    pub changes: usize,
    /// A success message.
    pub message: String,
}

/// API request to move a PDR to a new status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPdrRequest {
    /// The requested status. Legacy status names are accepted.
    pub target_status: String,
    /// The workflow action name (e.g., `submitInitialPDR`).
    pub action: String,
}

/// API response for a successful transition.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TransitionPdrResponse {
    /// The PDR after the transition.
    pub pdr: PdrInfo,
    /// The status before the transition.
    pub previous_status: PdrStatus,
    /// The notification that was queued.
    pub notification: Option<NotificationRecord>,
    /// A success message.
    pub message: String,
}

/// API response for a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeletePdrResponse {
    /// The deleted PDR.
    pub pdr_id: i64,
    /// A success message.
    pub message: String,
}

/// API response listing the actor's notifications.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ListNotificationsResponse {
    /// Notifications addressed to the actor, oldest first.
    pub notifications: Vec<NotificationRecord>,
}

/// API response with a PDR's audit trail.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct AuditTimelineResponse {
    /// The PDR.
    pub pdr_id: i64,
    /// Events in the order they were recorded.
    pub events: Vec<AuditEvent>,
}

/// API response with the static transition table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TransitionTableResponse {
    /// Every legal transition.
    pub transitions: Vec<StateTransition>,
}
