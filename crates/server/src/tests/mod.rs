// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod http_tests;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::{AppState, build_router};
use pdr_api::InMemoryPdrRepository;

pub const OWNER_QUERY: &str = "actor_id=10&actor_name=Alex%20Owner&actor_role=EMPLOYEE";
pub const OTHER_QUERY: &str = "actor_id=11&actor_name=Sam%20Other&actor_role=EMPLOYEE";
pub const CEO_QUERY: &str = "actor_id=1&actor_name=Dana%20Chief&actor_role=CEO";

/// Helper to create test app state with an empty repository.
pub fn create_test_app_state() -> AppState {
    AppState {
        repository: Arc::new(Mutex::new(InMemoryPdrRepository::new())),
    }
}

pub fn create_test_app() -> Router {
    build_router(create_test_app_state())
}

fn with_actor(mut body: Value, actor_id: i64, actor_name: &str, actor_role: &str) -> Value {
    let fields = body.as_object_mut().expect("request body must be an object");
    fields.insert(String::from("actor_id"), json!(actor_id));
    fields.insert(String::from("actor_name"), json!(actor_name));
    fields.insert(String::from("actor_role"), json!(actor_role));
    body
}

pub fn as_owner(body: Value) -> Value {
    with_actor(body, 10, "Alex Owner", "EMPLOYEE")
}

pub fn as_ceo(body: Value) -> Value {
    with_actor(body, 1, "Dana Chief", "CEO")
}

/// Sends one request and returns the status and decoded JSON body.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request: Request<Body> = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// Creates a PDR as the owner and returns its ID.
pub async fn create_pdr_as_owner(app: &Router) -> i64 {
    let (status, body) = send(app, "POST", "/pdrs", Some(as_owner(json!({ "year": 2026 })))).await;
    assert_eq!(status, StatusCode::OK);
    body["pdr"]["pdr_id"].as_i64().unwrap()
}

/// Creates a PDR, fills in a plan and submits it.
pub async fn create_submitted_pdr(app: &Router) -> i64 {
    let pdr_id: i64 = create_pdr_as_owner(app).await;

    let (status, _) = send(
        app,
        "POST",
        &format!("/pdrs/{pdr_id}/update"),
        Some(as_owner(json!({
            "goals": [{ "title": "Grow the team", "description": "Hire two engineers" }],
            "behaviors": [{ "description": "Gives candid feedback" }]
        }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        app,
        "POST",
        &format!("/pdrs/{pdr_id}/transition"),
        Some(as_owner(json!({
            "target_status": "SUBMITTED",
            "action": "submitInitialPDR"
        }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    pdr_id
}
