// ====================================
// tests/integration/profile_flow_tests.rs
// ====================================
//! Profile view and update over the router
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;

use crate::test_utils::{post_json, register_user, send, setup_test_app};

#[tokio::test]
async fn test_profile_returns_public_fields_only() {
    let (app, _state) = setup_test_app();
    let token = register_user(&app, "A", "a@x.com", "p1").await;

    let (status, body) = post_json(&app, "/profile", json!({}), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "A", "email": "a@x.com" }));
}

#[tokio::test]
async fn test_update_profile_name_and_email() {
    let (app, _state) = setup_test_app();
    let token = register_user(&app, "A", "a@x.com", "p1").await;

    let (status, body) = post_json(
        &app,
        "/update_profile",
        json!({ "name": "Alice", "email": "alice@x.com" }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "message": "Profile updated successfully",
            "user": { "name": "Alice", "email": "alice@x.com" }
        })
    );

    // The old token still names the old email
    let (status, body) = post_json(&app, "/profile", json!({}), Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "User not found!" }));

    let (status, _) = post_json(
        &app,
        "/login",
        json!({ "email": "a@x.com", "password": "p1" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = post_json(
        &app,
        "/login",
        json!({ "email": "alice@x.com", "password": "p1" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let fresh = body["token"].as_str().unwrap().to_string();

    let (status, body) = post_json(&app, "/profile", json!({}), Some(&fresh)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "Alice", "email": "alice@x.com" }));
}

#[tokio::test]
async fn test_empty_fields_leave_profile_unchanged() {
    let (app, _state) = setup_test_app();
    let token = register_user(&app, "A", "a@x.com", "p1").await;

    for body in [json!({}), json!({ "name": "", "email": "" })] {
        let (status, reply) =
            post_json(&app, "/update_profile", body.clone(), Some(&token)).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(reply["user"], json!({ "name": "A", "email": "a@x.com" }), "{body}");
    }

    let (status, reply) = post_json(
        &app,
        "/update_profile",
        json!({ "name": "Renamed" }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["user"], json!({ "name": "Renamed", "email": "a@x.com" }));
}

#[tokio::test]
async fn test_update_to_same_email_is_allowed() {
    let (app, _state) = setup_test_app();
    let token = register_user(&app, "A", "a@x.com", "p1").await;

    let (status, reply) = post_json(
        &app,
        "/update_profile",
        json!({ "email": "a@x.com" }),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reply["user"]["email"], "a@x.com");
}

#[tokio::test]
async fn test_update_conflict_changes_nothing() {
    let (app, _state) = setup_test_app();
    let token_a = register_user(&app, "A", "a@x.com", "p1").await;
    let token_b = register_user(&app, "B", "b@x.com", "p2").await;

    let (status, body) = post_json(
        &app,
        "/update_profile",
        json!({ "name": "Hijacker", "email": "b@x.com" }),
        Some(&token_a),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Email already exists!" }));

    let (_, a) = post_json(&app, "/profile", json!({}), Some(&token_a)).await;
    assert_eq!(a, json!({ "name": "A", "email": "a@x.com" }));
    let (_, b) = post_json(&app, "/profile", json!({}), Some(&token_b)).await;
    assert_eq!(b, json!({ "name": "B", "email": "b@x.com" }));
}

#[tokio::test]
async fn test_profile_without_token() {
    let (app, _state) = setup_test_app();

    for uri in ["/profile", "/update_profile"] {
        let (status, body) = post_json(&app, uri, json!({ "name": "X" }), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["message"], "Token is missing!", "{uri}");
    }
}

#[tokio::test]
async fn test_stale_token_reports_missing_account_before_body() {
    let (app, state) = setup_test_app();
    let token = state.tokens.issue("gone@x.com").unwrap();

    let request = Request::builder()
        .method("POST")
        .uri("/update_profile")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, &token)
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "User not found!" }));
}

#[tokio::test]
async fn test_unreadable_update_body_for_known_account() {
    let (app, _state) = setup_test_app();
    let token = register_user(&app, "A", "a@x.com", "p1").await;

    let request = Request::builder()
        .method("POST")
        .uri("/update_profile")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, &token)
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "Invalid request body" }));
}
