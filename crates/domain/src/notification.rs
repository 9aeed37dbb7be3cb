// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification payloads emitted by workflow events.
//!
//! Storing and delivering notifications is the caller's job.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const DEFAULT_ACTOR_NAME: &str = "Your manager";

/// The closed set of notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// The plan has been locked by the reviewer.
    PdrLocked,
    /// A phase has been submitted for review.
    PdrSubmitted,
    /// A reminder to finish outstanding work.
    PdrReminder,
    /// New reviewer feedback is available.
    PdrFeedback,
    /// The review cycle has been completed.
    PdrCompleted,
}

impl NotificationType {
    /// Returns the wire name of the notification type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PdrLocked => "PDR_LOCKED",
            Self::PdrSubmitted => "PDR_SUBMITTED",
            Self::PdrReminder => "PDR_REMINDER",
            Self::PdrFeedback => "PDR_FEEDBACK",
            Self::PdrCompleted => "PDR_COMPLETED",
        }
    }
}

impl FromStr for NotificationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PDR_LOCKED" => Ok(Self::PdrLocked),
            "PDR_SUBMITTED" => Ok(Self::PdrSubmitted),
            "PDR_REMINDER" => Ok(Self::PdrReminder),
            "PDR_FEEDBACK" => Ok(Self::PdrFeedback),
            "PDR_COMPLETED" => Ok(Self::PdrCompleted),
            _ => Err(DomainError::UnknownNotificationType(s.to_string())),
        }
    }
}

impl std::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A notification addressed to one user about one PDR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// The recipient.
    pub user_id: i64,
    /// The PDR the notification concerns.
    pub pdr_id: i64,
    /// The notification kind.
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
}

/// Builds the notification payload for a workflow event.
///
/// `actor_name` is interpolated into messages that name the reviewer and
/// falls back to a generic phrase when absent or blank.
#[must_use]
pub fn create_pdr_notification(
    pdr_id: i64,
    user_id: i64,
    notification_type: NotificationType,
    actor_name: Option<&str>,
) -> Notification {
    let actor: &str = actor_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_ACTOR_NAME);

    let (title, message): (&str, String) = match notification_type {
        NotificationType::PdrLocked => (
            "PDR Locked",
            format!("{actor} has locked your PDR. You can now view their feedback."),
        ),
        NotificationType::PdrSubmitted => (
            "PDR Submitted",
            String::from("Your PDR has been submitted for review."),
        ),
        NotificationType::PdrReminder => (
            "PDR Reminder",
            String::from("Please complete your PDR before the review deadline."),
        ),
        NotificationType::PdrFeedback => (
            "Feedback Available",
            format!("{actor} has added feedback to your PDR."),
        ),
        NotificationType::PdrCompleted => (
            "PDR Completed",
            format!("{actor} has completed your end-year review."),
        ),
    };

    Notification {
        user_id,
        pdr_id,
        notification_type,
        title: title.to_string(),
        message,
    }
}

/// Builds a notification from a type name received at a boundary.
///
/// # Errors
///
/// Returns `DomainError::UnknownNotificationType` if the name is outside the
/// closed set. Callers are expected to propagate this rather than default it.
pub fn create_named_pdr_notification(
    pdr_id: i64,
    user_id: i64,
    notification_type: &str,
    actor_name: Option<&str>,
) -> Result<Notification, DomainError> {
    let kind: NotificationType = notification_type.parse()?;
    Ok(create_pdr_notification(pdr_id, user_id, kind, actor_name))
}
