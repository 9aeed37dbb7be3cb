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
#![allow(clippy::multiple_crate_versions)]

mod demo;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use pdr_api::{
    ApiError, AuditTimelineResponse, AuthError, AuthenticatedActor, CreatePdrRequest,
    CreatePdrResponse, DeletePdrResponse, FeedbackEntry, GetPdrResponse, GetPermissionsResponse,
    InMemoryPdrRepository, ListNotificationsResponse, ListPdrsRequest, ListPdrsResponse,
    TransitionPdrRequest, TransitionPdrResponse, TransitionTableResponse, UpdatePdrRequest,
    UpdatePdrResponse, audit_timeline, authenticate_stub, create_pdr, delete_pdr, get_pdr,
    get_permissions, list_notifications, list_pdrs, list_transitions, transition_pdr, update_pdr,
};
use pdr_audit::Cause;
use pdr_domain::{Behavior, Goal};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info};

/// PDR Server - HTTP server for the PDR review workflow
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Seed one demo PDR per status on startup
    #[arg(long)]
    seed_demo: bool,
}

/// Application state shared across handlers.
///
/// This contains the repository wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// PDRs, their audit trail and queued notifications.
    repository: Arc<Mutex<InMemoryPdrRepository>>,
}

/// Actor identity supplied on read and delete requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorQuery {
    /// The acting user's ID.
    actor_id: i64,
    /// The acting user's display name.
    actor_name: String,
    /// The acting user's role.
    actor_role: String,
}

/// Query parameters for listing PDRs.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ListPdrsQuery {
    actor_id: i64,
    actor_name: String,
    actor_role: String,
    /// Optional status filter.
    status: Option<String>,
}

/// API request for creating a PDR.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreatePdrApiRequest {
    actor_id: i64,
    actor_name: String,
    actor_role: String,
    #[serde(default)]
    cause_id: Option<String>,
    #[serde(default)]
    cause_description: Option<String>,
    /// The review year.
    year: u16,
}

/// API request for updating PDR content.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct UpdatePdrApiRequest {
    actor_id: i64,
    actor_name: String,
    actor_role: String,
    #[serde(default)]
    cause_id: Option<String>,
    #[serde(default)]
    cause_description: Option<String>,
    /// Replacement goal list.
    #[serde(default)]
    goals: Option<Vec<Goal>>,
    /// Replacement behavior list.
    #[serde(default)]
    behaviors: Option<Vec<Behavior>>,
    /// CEO feedback on goals.
    #[serde(default)]
    goal_feedback: Vec<FeedbackEntry>,
    /// CEO feedback on behaviors.
    #[serde(default)]
    behavior_feedback: Vec<FeedbackEntry>,
}

/// API request for transitioning a PDR.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct TransitionPdrApiRequest {
    actor_id: i64,
    actor_name: String,
    actor_role: String,
    #[serde(default)]
    cause_id: Option<String>,
    #[serde(default)]
    cause_description: Option<String>,
    /// The requested status.
    target_status: String,
    /// The workflow action name.
    action: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Individual failures, when there are several.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    errors: Vec<String>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Individual failures.
    errors: Vec<String>,
}

impl HttpError {
    const fn new(status: StatusCode, message: String) -> Self {
        Self {
            status,
            message,
            errors: Vec::new(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            errors: self.errors,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let message: String = err.to_string();
        match err {
            ApiError::AuthenticationFailed { .. } => Self::new(StatusCode::UNAUTHORIZED, message),
            ApiError::Unauthorized { .. } | ApiError::PermissionDenied { .. } => {
                Self::new(StatusCode::FORBIDDEN, message)
            }
            ApiError::DomainRuleViolation { .. } => {
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            ApiError::ValidationFailed { errors } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message,
                errors,
            },
            ApiError::InvalidInput { .. } => Self::new(StatusCode::BAD_REQUEST, message),
            ApiError::ResourceNotFound { .. } => Self::new(StatusCode::NOT_FOUND, message),
            ApiError::Conflict { .. } => Self::new(StatusCode::CONFLICT, message),
            ApiError::Internal { .. } => {
                error!(error = %message, "Internal error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        }
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        Self::from(ApiError::from(err))
    }
}

fn authenticate(
    actor_id: i64,
    actor_name: &str,
    actor_role: &str,
) -> Result<AuthenticatedActor, HttpError> {
    authenticate_stub(actor_id, actor_name, actor_role).map_err(HttpError::from)
}

fn build_cause(id: Option<String>, description: Option<String>, default: &str) -> Cause {
    Cause::new(
        id.unwrap_or_else(|| String::from("http")),
        description.unwrap_or_else(|| default.to_string()),
    )
}

/// Handler for POST `/pdrs` endpoint.
///
/// Creates a new PDR for the acting employee.
async fn handle_create_pdr(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreatePdrApiRequest>,
) -> Result<Json<CreatePdrResponse>, HttpError> {
    info!(
        actor_id = req.actor_id,
        role = %req.actor_role,
        year = req.year,
        "Handling create_pdr request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_name, &req.actor_role)?;
    let cause: Cause = build_cause(req.cause_id, req.cause_description, "Create PDR");

    let mut repository = app_state.repository.lock().await;
    let response: CreatePdrResponse = create_pdr(
        &mut *repository,
        &CreatePdrRequest { year: req.year },
        &actor,
        cause,
    )?;

    Ok(Json(response))
}

/// Handler for GET `/pdrs` endpoint.
///
/// Lists the PDRs the actor may view.
async fn handle_list_pdrs(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListPdrsQuery>,
) -> Result<Json<ListPdrsResponse>, HttpError> {
    let actor: AuthenticatedActor =
        authenticate(query.actor_id, &query.actor_name, &query.actor_role)?;

    let repository = app_state.repository.lock().await;
    let response: ListPdrsResponse = list_pdrs(
        &*repository,
        &ListPdrsRequest {
            status: query.status,
        },
        &actor,
    )?;

    Ok(Json(response))
}

/// Handler for GET `/pdrs/{pdr_id}` endpoint.
async fn handle_get_pdr(
    AxumState(app_state): AxumState<AppState>,
    Path(pdr_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<GetPdrResponse>, HttpError> {
    let actor: AuthenticatedActor =
        authenticate(query.actor_id, &query.actor_name, &query.actor_role)?;

    let repository = app_state.repository.lock().await;
    let response: GetPdrResponse = get_pdr(&*repository, pdr_id, &actor)?;

    Ok(Json(response))
}

/// Handler for DELETE `/pdrs/{pdr_id}` endpoint.
///
/// Deletes a PDR that is still in `CREATED`.
async fn handle_delete_pdr(
    AxumState(app_state): AxumState<AppState>,
    Path(pdr_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<DeletePdrResponse>, HttpError> {
    info!(pdr_id, actor_id = query.actor_id, "Handling delete_pdr request");

    let actor: AuthenticatedActor =
        authenticate(query.actor_id, &query.actor_name, &query.actor_role)?;
    let cause: Cause = build_cause(None, None, "Delete PDR");

    let mut repository = app_state.repository.lock().await;
    let response: DeletePdrResponse = delete_pdr(&mut *repository, pdr_id, &actor, cause)?;

    Ok(Json(response))
}

/// Handler for GET `/pdrs/{pdr_id}/permissions` endpoint.
///
/// Returns the actor's permissions and next available actions.
async fn handle_get_permissions(
    AxumState(app_state): AxumState<AppState>,
    Path(pdr_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<GetPermissionsResponse>, HttpError> {
    let actor: AuthenticatedActor =
        authenticate(query.actor_id, &query.actor_name, &query.actor_role)?;

    let repository = app_state.repository.lock().await;
    let response: GetPermissionsResponse = get_permissions(&*repository, pdr_id, &actor)?;

    Ok(Json(response))
}

/// Handler for POST `/pdrs/{pdr_id}/update` endpoint.
///
/// Changes employee content or CEO feedback.
async fn handle_update_pdr(
    AxumState(app_state): AxumState<AppState>,
    Path(pdr_id): Path<i64>,
    Json(req): Json<UpdatePdrApiRequest>,
) -> Result<Json<UpdatePdrResponse>, HttpError> {
    info!(pdr_id, actor_id = req.actor_id, "Handling update_pdr request");

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_name, &req.actor_role)?;
    let cause: Cause = build_cause(req.cause_id, req.cause_description, "Update PDR");

    let update_request: UpdatePdrRequest = UpdatePdrRequest {
        goals: req.goals,
        behaviors: req.behaviors,
        goal_feedback: req.goal_feedback,
        behavior_feedback: req.behavior_feedback,
    };

    let mut repository = app_state.repository.lock().await;
    let response: UpdatePdrResponse =
        update_pdr(&mut *repository, pdr_id, update_request, &actor, &cause)?;

    Ok(Json(response))
}

/// Handler for POST `/pdrs/{pdr_id}/transition` endpoint.
///
/// Moves a PDR to a new status.
async fn handle_transition_pdr(
    AxumState(app_state): AxumState<AppState>,
    Path(pdr_id): Path<i64>,
    Json(req): Json<TransitionPdrApiRequest>,
) -> Result<Json<TransitionPdrResponse>, HttpError> {
    info!(
        pdr_id,
        actor_id = req.actor_id,
        action = %req.action,
        target = %req.target_status,
        "Handling transition_pdr request"
    );

    let actor: AuthenticatedActor = authenticate(req.actor_id, &req.actor_name, &req.actor_role)?;
    let cause: Cause = build_cause(req.cause_id, req.cause_description, "Transition PDR");

    let transition_request: TransitionPdrRequest = TransitionPdrRequest {
        target_status: req.target_status,
        action: req.action,
    };

    let mut repository = app_state.repository.lock().await;
    let response: TransitionPdrResponse =
        transition_pdr(&mut *repository, pdr_id, &transition_request, &actor, cause)?;

    Ok(Json(response))
}

/// Handler for GET `/pdrs/{pdr_id}/audit` endpoint.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Path(pdr_id): Path<i64>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    let actor: AuthenticatedActor =
        authenticate(query.actor_id, &query.actor_name, &query.actor_role)?;

    let repository = app_state.repository.lock().await;
    let response: AuditTimelineResponse = audit_timeline(&*repository, pdr_id, &actor)?;

    Ok(Json(response))
}

/// Handler for GET `/notifications` endpoint.
async fn handle_list_notifications(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ActorQuery>,
) -> Result<Json<ListNotificationsResponse>, HttpError> {
    let actor: AuthenticatedActor =
        authenticate(query.actor_id, &query.actor_name, &query.actor_role)?;

    let repository = app_state.repository.lock().await;
    let response: ListNotificationsResponse = list_notifications(&*repository, &actor);
    debug!(
        actor_id = actor.user_id,
        count = response.notifications.len(),
        "Listed notifications"
    );

    Ok(Json(response))
}

/// Handler for GET `/transitions` endpoint.
#[allow(clippy::unused_async)]
async fn handle_list_transitions() -> Json<TransitionTableResponse> {
    Json(list_transitions())
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/pdrs", post(handle_create_pdr).get(handle_list_pdrs))
        .route(
            "/pdrs/{pdr_id}",
            get(handle_get_pdr).delete(handle_delete_pdr),
        )
        .route("/pdrs/{pdr_id}/permissions", get(handle_get_permissions))
        .route("/pdrs/{pdr_id}/update", post(handle_update_pdr))
        .route("/pdrs/{pdr_id}/transition", post(handle_transition_pdr))
        .route("/pdrs/{pdr_id}/audit", get(handle_get_audit_timeline))
        .route("/notifications", get(handle_list_notifications))
        .route("/transitions", get(handle_list_transitions))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing PDR Server");

    let mut repository: InMemoryPdrRepository = InMemoryPdrRepository::new();
    if args.seed_demo {
        let seeded: usize = demo::seed_demo_data(&mut repository)?;
        info!(seeded, "Seeded demo data");
    }

    let app_state: AppState = AppState {
        repository: Arc::new(Mutex::new(repository)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
