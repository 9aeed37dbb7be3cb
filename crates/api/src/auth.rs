// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types.
//!
//! Per-PDR permissions come from the domain permission resolver. This module
//! only covers identity and the few operations that sit outside it.

use pdr::Pdr;
use pdr_audit::Actor;
use pdr_domain::{PdrStatus, UserRole};

use crate::error::AuthError;

/// An authenticated user with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The user's identifier.
    pub user_id: i64,
    /// The name shown in notifications and the audit trail.
    pub display_name: String,
    /// The role assigned to this user.
    pub role: UserRole,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's identifier
    /// * `display_name` - The user's display name
    /// * `role` - The role assigned to this user
    #[must_use]
    pub const fn new(user_id: i64, display_name: String, role: UserRole) -> Self {
        Self {
            user_id,
            display_name,
            role,
        }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// The result is also the identity the core uses for permission checks.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.user_id, self.role, self.display_name.clone())
    }

    /// Returns true if the actor reviews PDRs.
    #[must_use]
    pub const fn is_ceo(&self) -> bool {
        matches!(self.role, UserRole::Ceo)
    }
}

/// Authorization checks for operations the permission resolver does not cover.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may start a new PDR.
    ///
    /// Only employees create PDRs; the CEO reviews them.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the `EMPLOYEE` role.
    pub fn authorize_create_pdr(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            UserRole::Employee => Ok(()),
            UserRole::Ceo => Err(AuthError::Unauthorized {
                action: String::from("create_pdr"),
                required_role: String::from("EMPLOYEE"),
            }),
        }
    }

    /// Checks if an actor may delete a PDR.
    ///
    /// Only the owner may delete, and only before the first submission.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The actor does not own the PDR
    /// - The PDR has left `CREATED`
    pub fn authorize_delete_pdr(actor: &AuthenticatedActor, pdr: &Pdr) -> Result<(), AuthError> {
        if !pdr.is_owned_by(actor.user_id) {
            return Err(AuthError::Unauthorized {
                action: String::from("delete_pdr"),
                required_role: String::from("owning EMPLOYEE"),
            });
        }
        if pdr.status != PdrStatus::Created {
            return Err(AuthError::Locked {
                action: String::from("delete_pdr"),
                status: pdr.status,
            });
        }
        Ok(())
    }
}

/// Stub authentication for callers that assert their own identity.
///
/// There is no credential check. The identity is validated for shape only.
///
/// # Arguments
///
/// * `user_id` - The identifier of the user to authenticate
/// * `display_name` - The user's display name
/// * `role` - The role name (`EMPLOYEE` or `CEO`, any case)
///
/// # Errors
///
/// Returns an error if:
/// - The user ID is not positive
/// - The display name is blank
/// - The role is not recognized
pub fn authenticate_stub(
    user_id: i64,
    display_name: &str,
    role: &str,
) -> Result<AuthenticatedActor, AuthError> {
    if user_id <= 0 {
        return Err(AuthError::AuthenticationFailed {
            reason: format!("User ID must be positive, got {user_id}"),
        });
    }

    let display_name: &str = display_name.trim();
    if display_name.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Display name cannot be empty"),
        });
    }

    let role: UserRole = role
        .parse()
        .map_err(|e: pdr_domain::DomainError| AuthError::AuthenticationFailed {
            reason: e.to_string(),
        })?;

    Ok(AuthenticatedActor::new(
        user_id,
        display_name.to_string(),
        role,
    ))
}
