// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Per-role, per-status permission computation.
//!
//! Permissions are derived on every query and never persisted. They group
//! fields into employee-authored and CEO-authored sets and resolve view and
//! edit rights for each from the status gate, the role and ownership.

use crate::types::{PdrStatus, StatusGate, UserRole};
use serde::{Deserialize, Serialize};

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    #[default]
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let b = bool::deserialize(deserializer)?;
        Ok(Self::from_bool(b))
    }
}

/// The full capability vector for one viewer of one PDR.
///
/// `can_edit` is denied whenever `read_only_reason` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PdrPermissions {
    pub can_view: Capability,
    pub can_edit: Capability,
    pub can_view_employee_fields: Capability,
    pub can_edit_employee_fields: Capability,
    pub can_view_ceo_fields: Capability,
    pub can_edit_ceo_fields: Capability,
    /// Employee may trigger the next phase's submission.
    pub can_submit_for_review: Capability,
    /// CEO may approve a phase the employee submitted.
    ///
    /// Covers validated review exits only. The unvalidated CEO exits have
    /// their own flag (`can_mark_booked`) or none (the mid-year bypass from
    /// `PLAN_LOCKED`, which the transition table alone governs).
    pub can_submit_ceo_review: Capability,
    /// CEO may mark the planning meeting booked.
    pub can_mark_booked: Capability,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_only_reason: Option<String>,
}

impl PdrPermissions {
    /// The all-denied base permission set.
    #[must_use]
    pub fn denied() -> Self {
        Self::default()
    }
}

fn employee_owner_permissions(status: PdrStatus) -> PdrPermissions {
    use Capability::{Allowed, Denied};

    match status.gate() {
        StatusGate::Draft => PdrPermissions {
            can_view: Allowed,
            can_edit: Allowed,
            can_view_employee_fields: Allowed,
            can_edit_employee_fields: Allowed,
            can_submit_for_review: Allowed,
            ..PdrPermissions::denied()
        },
        // CEO feedback stays hidden until the review gate advances
        StatusGate::AwaitingReview => PdrPermissions {
            can_view: Allowed,
            can_edit: Denied,
            can_view_employee_fields: Allowed,
            read_only_reason: Some(String::from(
                "PDR has been submitted and is pending review",
            )),
            ..PdrPermissions::denied()
        },
        StatusGate::Approved => PdrPermissions {
            can_view: Allowed,
            can_edit: Allowed,
            can_view_employee_fields: Allowed,
            can_edit_employee_fields: Allowed,
            can_view_ceo_fields: Allowed,
            can_submit_for_review: Allowed,
            ..PdrPermissions::denied()
        },
        StatusGate::Closed => PdrPermissions {
            can_view: Allowed,
            can_view_employee_fields: Allowed,
            can_view_ceo_fields: Allowed,
            read_only_reason: Some(String::from(
                "PDR review is completed and is read-only",
            )),
            ..PdrPermissions::denied()
        },
    }
}

fn ceo_permissions(status: PdrStatus) -> PdrPermissions {
    use Capability::Allowed;

    let feedback: PdrPermissions = PdrPermissions {
        can_view: Allowed,
        can_edit: Allowed,
        can_view_employee_fields: Allowed,
        can_view_ceo_fields: Allowed,
        can_edit_ceo_fields: Allowed,
        ..PdrPermissions::denied()
    };

    match status.gate() {
        StatusGate::Draft => PdrPermissions {
            can_view: Allowed,
            read_only_reason: Some(String::from("PDR has not been submitted yet")),
            ..PdrPermissions::denied()
        },
        StatusGate::AwaitingReview => PdrPermissions {
            can_submit_ceo_review: Allowed,
            can_mark_booked: Capability::from_bool(status == PdrStatus::Submitted),
            ..feedback
        },
        // Feedback stays correctable after approval and after completion.
        // The PLAN_LOCKED mid-year bypass is not a review of submitted work.
        StatusGate::Approved | StatusGate::Closed => feedback,
    }
}

/// Computes the permissions a viewer holds on a PDR.
///
/// This is a pure function of its arguments.
///
/// # Arguments
///
/// * `status` - The PDR's current status
/// * `role` - The viewer's role
/// * `is_owner` - Whether the viewer created the PDR
///
/// # Returns
///
/// Non-owner employees receive the all-denied set for every status. The CEO
/// is resolved independently of ownership.
#[must_use]
pub fn get_pdr_permissions(status: PdrStatus, role: UserRole, is_owner: bool) -> PdrPermissions {
    match role {
        UserRole::Employee if is_owner => employee_owner_permissions(status),
        UserRole::Employee => PdrPermissions::denied(),
        UserRole::Ceo => ceo_permissions(status),
    }
}

/// Returns true if the viewer may edit any part of the PDR.
#[must_use]
pub fn is_pdr_editable(status: PdrStatus, role: UserRole, is_owner: bool) -> bool {
    get_pdr_permissions(status, role, is_owner)
        .can_edit
        .is_allowed()
}
