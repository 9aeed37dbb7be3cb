// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::{Router, http::StatusCode};
use serde_json::{Value, json};

use super::{
    CEO_QUERY, OTHER_QUERY, OWNER_QUERY, as_ceo, as_owner, create_pdr_as_owner,
    create_submitted_pdr, create_test_app, send,
};

#[tokio::test]
async fn test_create_and_get_pdr() {
    let app: Router = create_test_app();
    let pdr_id: i64 = create_pdr_as_owner(&app).await;

    let (status, body) = send(&app, "GET", &format!("/pdrs/{pdr_id}?{OWNER_QUERY}"), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pdr"]["status"], "CREATED");
    assert_eq!(body["pdr"]["is_editable"], true);
    assert_eq!(body["permissions"]["can_edit_employee_fields"], true);
    assert_eq!(body["permissions"]["can_view_ceo_fields"], false);
}

#[tokio::test]
async fn test_ceo_cannot_create_pdr() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "POST", "/pdrs", Some(as_ceo(json!({ "year": 2026 })))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], true);
}

#[tokio::test]
async fn test_blank_actor_name_is_unauthenticated() {
    let app: Router = create_test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/pdrs",
        Some(json!({
            "actor_id": 10,
            "actor_name": "",
            "actor_role": "EMPLOYEE",
            "year": 2026
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_other_employee_gets_not_found() {
    let app: Router = create_test_app();
    let pdr_id: i64 = create_pdr_as_owner(&app).await;

    let (status, _) = send(&app, "GET", &format!("/pdrs/{pdr_id}?{OTHER_QUERY}"), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_submitting_empty_pdr_lists_every_failure() {
    let app: Router = create_test_app();
    let pdr_id: i64 = create_pdr_as_owner(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/pdrs/{pdr_id}/transition"),
        Some(as_owner(json!({
            "target_status": "SUBMITTED",
            "action": "submitInitialPDR"
        }))),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body["errors"],
        json!([
            "At least one goal is required",
            "At least one behavior is required"
        ])
    );
}

#[tokio::test]
async fn test_unknown_status_filter_is_bad_request() {
    let app: Router = create_test_app();

    let (status, _) = send(&app, "GET", &format!("/pdrs?{CEO_QUERY}&status=ARCHIVED"), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_plan_review_over_http() {
    let app: Router = create_test_app();
    let pdr_id: i64 = create_submitted_pdr(&app).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/pdrs/{pdr_id}/permissions?{CEO_QUERY}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["permissions"]["can_mark_booked"], true);
    assert_eq!(body["next_states"].as_array().unwrap().len(), 2);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/pdrs/{pdr_id}/update"),
        Some(as_ceo(json!({
            "behavior_feedback": [{ "index": 0, "comments": "Clear communicator" }]
        }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/pdrs/{pdr_id}/transition"),
        Some(as_ceo(json!({
            "target_status": "PLAN_LOCKED",
            "action": "approvePlan"
        }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["previous_status"], "SUBMITTED");
    assert_eq!(body["notification"]["type"], "PDR_LOCKED");

    let (status, body) = send(&app, "GET", &format!("/notifications?{OWNER_QUERY}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let notifications: &Vec<Value> = body["notifications"].as_array().unwrap();
    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0]["type"], "PDR_SUBMITTED");

    let (status, body) = send(&app, "GET", &format!("/pdrs/{pdr_id}?{OWNER_QUERY}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["pdr"]["data"]["behaviors"][0]["ceo_comments"],
        "Clear communicator"
    );

    let (status, body) = send(
        &app,
        "GET",
        &format!("/pdrs/{pdr_id}/audit?{OWNER_QUERY}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["events"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_owner_cannot_edit_submitted_pdr() {
    let app: Router = create_test_app();
    let pdr_id: i64 = create_submitted_pdr(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/pdrs/{pdr_id}/update"),
        Some(as_owner(json!({
            "goals": [{ "title": "Sneaky", "description": "Late edit" }]
        }))),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .contains("pending review")
    );
}

#[tokio::test]
async fn test_delete_rules() {
    let app: Router = create_test_app();
    let submitted_id: i64 = create_submitted_pdr(&app).await;

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/pdrs/{submitted_id}?{OWNER_QUERY}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, body) = send(
        &app,
        "POST",
        "/pdrs",
        Some(as_owner(json!({ "year": 2027 }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let draft_id: i64 = body["pdr"]["pdr_id"].as_i64().unwrap();

    let (status, _) = send(&app, "DELETE", &format!("/pdrs/{draft_id}?{CEO_QUERY}"), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "DELETE", &format!("/pdrs/{draft_id}?{OWNER_QUERY}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/pdrs/{draft_id}?{OWNER_QUERY}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_year_conflicts() {
    let app: Router = create_test_app();
    create_pdr_as_owner(&app).await;

    let (status, _) = send(&app, "POST", "/pdrs", Some(as_owner(json!({ "year": 2026 })))).await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_transition_table_route() {
    let app: Router = create_test_app();

    let (status, body) = send(&app, "GET", "/transitions", None).await;

    assert_eq!(status, StatusCode::OK);
    let transitions: &Vec<Value> = body["transitions"].as_array().unwrap();
    assert_eq!(transitions.len(), 9);
    assert_eq!(transitions[2]["action"], "markBooked");
    assert_eq!(transitions[2]["requires_validation"], false);
}
