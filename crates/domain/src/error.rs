// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::transitions::PdrAction;
use crate::types::{PdrStatus, UserRole};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The status string is neither a canonical status nor a known alias.
    InvalidStatus(String),
    /// The role string is not a known role.
    InvalidRole(String),
    /// The action name is not a known workflow action.
    InvalidAction(String),
    /// The validation field name is not recognized.
    InvalidValidationField(String),
    /// The notification type is outside the closed set.
    UnknownNotificationType(String),
    /// No transition table row matches the attempted triple.
    InvalidTransition {
        /// The current status.
        from: PdrStatus,
        /// The requested status.
        to: PdrStatus,
        /// The action that was attempted.
        action: PdrAction,
    },
    /// A transition row exists but the role may not trigger it.
    RoleNotAllowed {
        /// The current status.
        from: PdrStatus,
        /// The requested status.
        to: PdrStatus,
        /// The action that was attempted.
        action: PdrAction,
        /// The role that attempted it.
        role: UserRole,
    },
    /// Goal or behavior text is invalid.
    InvalidContent(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus(status) => write!(f, "Invalid PDR status: '{status}'"),
            Self::InvalidRole(role) => write!(f, "Invalid user role: '{role}'"),
            Self::InvalidAction(action) => write!(f, "Invalid PDR action: '{action}'"),
            Self::InvalidValidationField(field) => {
                write!(f, "Unrecognized validation field: {field}")
            }
            Self::UnknownNotificationType(kind) => {
                write!(f, "Unknown notification type: '{kind}'")
            }
            Self::InvalidTransition { from, to, action } => {
                write!(f, "Invalid transition: {from} -> {to} via '{action}'")
            }
            Self::RoleNotAllowed {
                from,
                to,
                action,
                role,
            } => {
                write!(
                    f,
                    "Role {role} is not allowed to perform '{action}' ({from} -> {to})"
                )
            }
            Self::InvalidContent(msg) => write!(f, "Invalid content: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
