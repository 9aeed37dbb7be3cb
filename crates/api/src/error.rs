// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use pdr::CoreError;
use pdr_domain::{DomainError, PdrStatus};

use crate::repository::RepositoryError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The PDR's status no longer permits the action.
    Locked {
        /// The action that was attempted.
        action: String,
        /// The PDR's current status.
        status: PdrStatus,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::Locked { action, status } => {
                write!(f, "'{action}' is not allowed once a PDR is {status}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor's role does not permit the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The actor's permissions on this PDR do not cover the operation.
    PermissionDenied {
        /// The operation that was attempted.
        operation: String,
        /// Why the PDR is read-only to this actor.
        reason: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// The PDR content does not satisfy the requested transition.
    ValidationFailed {
        /// Every failed requirement.
        errors: Vec<String>,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The write lost a race with another change.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::PermissionDenied { operation, reason } => {
                write!(f, "Permission denied for '{operation}': {reason}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ValidationFailed { errors } => {
                write!(f, "Validation failed: {}", errors.join("; "))
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
            AuthError::Locked { .. } => Self::DomainRuleViolation {
                rule: String::from("delete_only_while_created"),
                message: err.to_string(),
            },
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::PdrNotFound(pdr_id) => Self::ResourceNotFound {
                resource_type: String::from("PDR"),
                message: format!("PDR {pdr_id} does not exist"),
            },
            RepositoryError::StaleStatus { .. } | RepositoryError::DuplicatePdr { .. } => {
                Self::Conflict {
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    let field: &str = match err {
        DomainError::InvalidTransition { .. } => {
            return ApiError::DomainRuleViolation {
                rule: String::from("state_transition"),
                message,
            };
        }
        DomainError::RoleNotAllowed { .. } => {
            return ApiError::DomainRuleViolation {
                rule: String::from("transition_role"),
                message,
            };
        }
        DomainError::InvalidStatus(_) => "status",
        DomainError::InvalidRole(_) => "role",
        DomainError::InvalidAction(_) => "action",
        DomainError::InvalidValidationField(_) => "validation_field",
        DomainError::UnknownNotificationType(_) => "notification_type",
        DomainError::InvalidContent(_) => "data",
    };
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::PermissionDenied { operation, reason } => {
            ApiError::PermissionDenied { operation, reason }
        }
        CoreError::RequirementsNotMet(errors) => ApiError::ValidationFailed { errors },
        CoreError::IndexOutOfRange { field, .. } => ApiError::InvalidInput {
            field: format!("{field}_feedback"),
            message: err.to_string(),
        },
    }
}
