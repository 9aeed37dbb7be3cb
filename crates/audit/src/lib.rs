// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use pdr_domain::{PdrStatus, UserRole};
use serde::Serialize;

/// Represents the user performing an action on a PDR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    /// The acting user's identifier.
    pub user_id: i64,
    /// The acting user's role at the time of the action.
    pub role: UserRole,
    /// Display name captured at the time of the action.
    pub display_name: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The acting user's identifier
    /// * `role` - The acting user's role
    /// * `display_name` - The name to attribute the action to
    #[must_use]
    pub const fn new(user_id: i64, role: UserRole, display_name: String) -> Self {
        Self {
            user_id,
            role,
            display_name,
        }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    /// The name of the action (e.g., "`approvePlan`", "`ReviseGoals`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of a PDR at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    /// The PDR's status.
    pub status: PdrStatus,
    /// A compact summary of the employee-authored content.
    pub data: String,
    /// A compact summary of CEO feedback, kept apart so it can be withheld.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot` without a feedback summary.
    #[must_use]
    pub const fn new(status: PdrStatus, data: String) -> Self {
        Self {
            status,
            data,
            feedback: None,
        }
    }

    /// Attaches a CEO feedback summary.
    #[must_use]
    pub fn with_feedback(self, feedback: String) -> Self {
        Self {
            feedback: Some(feedback),
            ..self
        }
    }

    /// Drops the CEO feedback summary.
    #[must_use]
    pub fn without_feedback(self) -> Self {
        Self {
            feedback: None,
            ..self
        }
    }
}

/// An immutable audit event representing a change to one PDR.
///
/// Every successful change must produce exactly one audit event.
/// Audit events capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The PDR before and after the change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEvent {
    /// The event ID assigned on persistence. `None` until stored.
    pub event_id: Option<i64>,
    /// The PDR this event is scoped to.
    pub pdr_id: i64,
    /// The actor who initiated this change.
    pub actor: Actor,
    /// The cause or reason for this change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The PDR before the change.
    pub before: StateSnapshot,
    /// The PDR after the change.
    pub after: StateSnapshot,
    /// RFC 3339 timestamp assigned on persistence.
    pub recorded_at: Option<String>,
}

impl AuditEvent {
    /// Creates a new, unpersisted `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `pdr_id` - The PDR the event is scoped to
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The PDR before the change
    /// * `after` - The PDR after the change
    #[must_use]
    pub const fn new(
        pdr_id: i64,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            pdr_id,
            actor,
            cause,
            action,
            before,
            after,
            recorded_at: None,
        }
    }

    /// Returns a copy stamped with its persisted ID and timestamp.
    #[must_use]
    pub fn persisted(self, event_id: i64, recorded_at: String) -> Self {
        Self {
            event_id: Some(event_id),
            recorded_at: Some(recorded_at),
            ..self
        }
    }

    /// Returns true if the event changed the PDR's status.
    #[must_use]
    pub fn is_status_change(&self) -> bool {
        self.before.status != self.after.status
    }

    /// Returns a copy with CEO feedback summaries removed from both snapshots.
    #[must_use]
    pub fn without_feedback(self) -> Self {
        Self {
            before: self.before.without_feedback(),
            after: self.after.without_feedback(),
            ..self
        }
    }
}
