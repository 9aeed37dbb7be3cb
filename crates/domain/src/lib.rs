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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod notification;
mod permissions;
mod transitions;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use notification::{
    Notification, NotificationType, create_named_pdr_notification, create_pdr_notification,
};
pub use permissions::{Capability, PdrPermissions, get_pdr_permissions, is_pdr_editable};
pub use transitions::{
    NextState, PdrAction, StateTransition, TRANSITIONS, find_transition, get_valid_next_states,
    validate_state_transition,
};

// Re-export public types
pub use types::{Behavior, Goal, PdrData, PdrStatus, StatusGate, UserRole, is_blank};
pub use validation::{
    MAX_TEXT_LENGTH, ValidationField, ValidationResult, validate_content_limits,
    validate_named_requirements, validate_transition_requirements,
};
