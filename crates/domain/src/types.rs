// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents the workflow status of a PDR.
///
/// Statuses are listed in workflow order. The order is a phase order, not a
/// comparison, so the enum deliberately does not implement `Ord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PdrStatus {
    /// Initial plan is being drafted by the employee.
    #[default]
    Created,
    /// Initial plan submitted, awaiting CEO review.
    Submitted,
    /// Initial plan approved. Goals are agreed for the year.
    PlanLocked,
    /// Mid-year check-in submitted, awaiting CEO review.
    MidYearSubmitted,
    /// Mid-year check-in approved (or bypassed by the CEO).
    MidYearApproved,
    /// End-year review submitted, awaiting CEO review.
    EndYearSubmitted,
    /// Review cycle finished.
    Completed,
}

/// Coarse grouping of statuses that drives field visibility and editability.
///
/// Every status belongs to exactly one gate. The permission resolver matches
/// on gates so that adding a status forces a gate decision at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusGate {
    /// The employee owns the document and the CEO has not seen it.
    Draft,
    /// A phase submission is waiting on the CEO.
    AwaitingReview,
    /// A phase has been approved; the employee works towards the next one.
    Approved,
    /// No further workflow activity.
    Closed,
}

impl PdrStatus {
    /// All statuses in workflow order.
    pub const ALL: [Self; 7] = [
        Self::Created,
        Self::Submitted,
        Self::PlanLocked,
        Self::MidYearSubmitted,
        Self::MidYearApproved,
        Self::EndYearSubmitted,
        Self::Completed,
    ];

    /// Returns the canonical string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Submitted => "SUBMITTED",
            Self::PlanLocked => "PLAN_LOCKED",
            Self::MidYearSubmitted => "MID_YEAR_SUBMITTED",
            Self::MidYearApproved => "MID_YEAR_APPROVED",
            Self::EndYearSubmitted => "END_YEAR_SUBMITTED",
            Self::Completed => "COMPLETED",
        }
    }

    /// Returns the gate this status belongs to.
    #[must_use]
    pub const fn gate(&self) -> StatusGate {
        match self {
            Self::Created => StatusGate::Draft,
            Self::Submitted | Self::MidYearSubmitted | Self::EndYearSubmitted => {
                StatusGate::AwaitingReview
            }
            Self::PlanLocked | Self::MidYearApproved => StatusGate::Approved,
            Self::Completed => StatusGate::Closed,
        }
    }

    /// Returns true if no workflow transition leaves this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Parses a status, accepting the legacy aliases used by older records.
    ///
    /// Legacy aliases:
    /// - `Created`, `DRAFT` map to `CREATED`
    /// - `OPEN_FOR_REVIEW`, `UNDER_REVIEW` map to `SUBMITTED`
    /// - `Plan - Locked`, `PDR_Booked` map to `PLAN_LOCKED`
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` if the string is neither canonical
    /// nor a known alias.
    pub fn normalize(value: &str) -> Result<Self, DomainError> {
        match value.trim() {
            "Created" | "DRAFT" => Ok(Self::Created),
            "OPEN_FOR_REVIEW" | "UNDER_REVIEW" => Ok(Self::Submitted),
            "Plan - Locked" | "PDR_Booked" => Ok(Self::PlanLocked),
            other => other.parse(),
        }
    }
}

impl FromStr for PdrStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CREATED" => Ok(Self::Created),
            "SUBMITTED" => Ok(Self::Submitted),
            "PLAN_LOCKED" => Ok(Self::PlanLocked),
            "MID_YEAR_SUBMITTED" => Ok(Self::MidYearSubmitted),
            "MID_YEAR_APPROVED" => Ok(Self::MidYearApproved),
            "END_YEAR_SUBMITTED" => Ok(Self::EndYearSubmitted),
            "COMPLETED" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for PdrStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The role of the user acting on a PDR.
///
/// Ownership is a separate flag: only the owning employee holds
/// employee-level rights, while the CEO oversees every PDR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// An employee authoring their own plan.
    Employee,
    /// The reviewing manager with organization-wide oversight.
    Ceo,
}

impl UserRole {
    /// All roles.
    pub const ALL: [Self; 2] = [Self::Employee, Self::Ceo];

    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employee => "EMPLOYEE",
            Self::Ceo => "CEO",
        }
    }
}

impl FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "EMPLOYEE" => Ok(Self::Employee),
            "CEO" => Ok(Self::Ceo),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A goal in the employee's plan.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Goal {
    /// Short goal title. Employee-authored.
    pub title: String,
    /// What the goal involves. Employee-authored.
    pub description: String,
    /// Manager feedback on this goal. CEO-authored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceo_comments: Option<String>,
}

impl Goal {
    /// Creates a goal without CEO feedback.
    #[must_use]
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            ceo_comments: None,
        }
    }
}

/// A behavior self-assessment entry.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Behavior {
    /// Description of the behavior. Employee-authored.
    pub description: String,
    /// The employee's own assessment. Employee-authored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_assessment: Option<String>,
    /// Manager feedback on this behavior. CEO-authored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ceo_comments: Option<String>,
}

impl Behavior {
    /// Creates a behavior entry without assessment or feedback.
    #[must_use]
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            self_assessment: None,
            ceo_comments: None,
        }
    }
}

/// The content of a PDR that requirement validation inspects.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PdrData {
    /// The employee's goals.
    #[serde(default)]
    pub goals: Vec<Goal>,
    /// The employee's behavior entries.
    #[serde(default)]
    pub behaviors: Vec<Behavior>,
}

impl PdrData {
    /// Creates PDR content from goals and behaviors.
    #[must_use]
    pub const fn new(goals: Vec<Goal>, behaviors: Vec<Behavior>) -> Self {
        Self { goals, behaviors }
    }

    /// Returns a copy with every CEO-authored field removed.
    ///
    /// Used when the viewer may not see CEO feedback yet.
    #[must_use]
    pub fn without_ceo_fields(&self) -> Self {
        Self {
            goals: self
                .goals
                .iter()
                .map(|goal| Goal {
                    ceo_comments: None,
                    ..goal.clone()
                })
                .collect(),
            behaviors: self
                .behaviors
                .iter()
                .map(|behavior| Behavior {
                    ceo_comments: None,
                    ..behavior.clone()
                })
                .collect(),
        }
    }
}

/// Returns true if the text is absent or whitespace only.
#[must_use]
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|text| text.trim().is_empty())
}
