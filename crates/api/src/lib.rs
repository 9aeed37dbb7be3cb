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
    clippy::unwrap_used,
    clippy::expect_used
)]

mod auth;
mod error;
mod handlers;
mod repository;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, authenticate_stub};
pub use error::{ApiError, AuthError, translate_core_error, translate_domain_error};
pub use handlers::{
    MAX_REVIEW_YEAR, MIN_REVIEW_YEAR, audit_timeline, create_pdr, delete_pdr, get_pdr,
    get_permissions, list_notifications, list_pdrs, list_transitions, transition_pdr, update_pdr,
};
pub use repository::{InMemoryPdrRepository, NotificationRecord, PdrRepository, RepositoryError};
pub use request_response::{
    AuditTimelineResponse, CreatePdrRequest, CreatePdrResponse, DeletePdrResponse, FeedbackEntry,
    GetPdrResponse, GetPermissionsResponse, ListNotificationsResponse, ListPdrsRequest,
    ListPdrsResponse, PdrInfo, TransitionPdrRequest, TransitionPdrResponse,
    TransitionTableResponse, UpdatePdrRequest, UpdatePdrResponse,
};
