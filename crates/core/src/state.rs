// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pdr_audit::{AuditEvent, StateSnapshot};
use pdr_domain::{Notification, PdrData, PdrStatus, is_blank};
use serde::Serialize;

/// A performance development review record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pdr {
    /// The record identifier.
    pub pdr_id: i64,
    /// The employee who created the PDR.
    pub owner_id: i64,
    /// The review year this PDR covers.
    pub year: u16,
    /// The current workflow status.
    pub status: PdrStatus,
    /// Goals and behaviors, including CEO feedback.
    pub data: PdrData,
}

impl Pdr {
    /// Creates a new PDR in `CREATED` with no content.
    ///
    /// # Arguments
    ///
    /// * `pdr_id` - The record identifier
    /// * `owner_id` - The creating employee
    /// * `year` - The review year
    #[must_use]
    pub fn new(pdr_id: i64, owner_id: i64, year: u16) -> Self {
        Self {
            pdr_id,
            owner_id,
            year,
            status: PdrStatus::Created,
            data: PdrData::default(),
        }
    }

    /// Returns true if the user created this PDR.
    #[must_use]
    pub const fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }

    /// Captures the PDR for an audit record.
    #[must_use]
    pub fn snapshot(&self) -> StateSnapshot {
        let goal_feedback: usize = self
            .data
            .goals
            .iter()
            .filter(|goal| !is_blank(goal.ceo_comments.as_deref()))
            .count();
        let behavior_feedback: usize = self
            .data
            .behaviors
            .iter()
            .filter(|behavior| !is_blank(behavior.ceo_comments.as_deref()))
            .count();

        StateSnapshot::new(
            self.status,
            format!(
                "goals={} behaviors={}",
                self.data.goals.len(),
                self.data.behaviors.len()
            ),
        )
        .with_feedback(format!(
            "goal_feedback={goal_feedback} behavior_feedback={behavior_feedback}"
        ))
    }
}

/// The result of applying a command to a PDR.
///
/// Every successful command produces exactly one audit event. Status
/// transitions additionally produce a notification for the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The PDR after the command.
    pub new_pdr: Pdr,
    /// The audit event recording the change.
    pub audit_event: AuditEvent,
    /// The notification to deliver, if any.
    pub notification: Option<Notification>,
}
