// =================================
// tests/integration/auth_flow_tests.rs
// =================================
//! End-to-end register / login / protected flow over the router
use authgate_backend_lib::auth::TokenService;
use authgate_backend_lib::storage::UserStorage;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;

use crate::test_utils::{post_json, register_user, send, setup_test_app, TEST_SECRET};

#[tokio::test]
async fn test_register_login_protected_flow() {
    let (app, _state) = setup_test_app();

    let (status, body) = post_json(
        &app,
        "/register",
        json!({ "name": "A", "email": "a@x.com", "password": "p1" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, body) = post_json(
        &app,
        "/login",
        json!({ "email": "a@x.com", "password": "p1" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = post_json(&app, "/protected", json!({}), Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "message": "Welcome a@x.com! This is a protected route." })
    );

    let (status, body) = post_json(&app, "/protected", json!({}), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "Token is missing!" }));
}

#[tokio::test]
async fn test_register_token_names_the_email() {
    let (app, _state) = setup_test_app();
    let token = register_user(&app, "A", "a@x.com", "p1").await;

    let verifier = TokenService::with_hs256(TEST_SECRET.as_bytes());
    assert_eq!(verifier.verify(&token).unwrap(), "a@x.com");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let (app, state) = setup_test_app();

    let bodies = [
        json!({}),
        json!({ "email": "a@x.com", "password": "p1" }),
        json!({ "name": "A", "password": "p1" }),
        json!({ "name": "A", "email": "a@x.com" }),
        json!({ "name": "", "email": "a@x.com", "password": "p1" }),
        json!({ "name": "A", "email": "a@x.com", "password": "" }),
    ];
    for body in bodies {
        let (status, reply) = post_json(&app, "/register", body.clone(), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(reply, json!({ "message": "Missing fields" }), "{body}");
    }
    assert!(state.users.storage().is_empty());
}

#[tokio::test]
async fn test_duplicate_register() {
    let (app, _state) = setup_test_app();
    register_user(&app, "A", "a@x.com", "p1").await;

    let (status, body) = post_json(
        &app,
        "/register",
        json!({ "name": "Other", "email": "a@x.com", "password": "p2" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "User already exists" }));

    // The first password still works and the second does not
    let (status, _) = post_json(
        &app,
        "/login",
        json!({ "email": "a@x.com", "password": "p1" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = post_json(
        &app,
        "/login",
        json!({ "email": "a@x.com", "password": "p2" }),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_failures() {
    let (app, _state) = setup_test_app();
    register_user(&app, "A", "a@x.com", "p1").await;

    let cases = [
        (
            json!({ "email": "nobody@x.com", "password": "p1" }),
            StatusCode::NOT_FOUND,
            "User not found!",
        ),
        (
            json!({ "email": "a@x.com", "password": "wrong" }),
            StatusCode::UNAUTHORIZED,
            "Invalid password!",
        ),
        (
            json!({ "email": "a@x.com" }),
            StatusCode::BAD_REQUEST,
            "Email and password are required!",
        ),
        (
            json!({ "email": "", "password": "p1" }),
            StatusCode::BAD_REQUEST,
            "Email and password are required!",
        ),
    ];
    for (body, expected_status, expected_message) in cases {
        let (status, reply) = post_json(&app, "/login", body.clone(), None).await;
        assert_eq!(status, expected_status, "{body}");
        assert_eq!(reply, json!({ "message": expected_message }), "{body}");
    }
}

#[tokio::test]
async fn test_unreadable_body() {
    let (app, _state) = setup_test_app();

    for uri in ["/register", "/login"] {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body, json!({ "message": "Invalid request body" }), "{uri}");
    }
}

#[tokio::test]
async fn test_error_bodies_never_leak_hashes() {
    let (app, state) = setup_test_app();
    register_user(&app, "A", "a@x.com", "p1").await;
    let hash = state
        .users
        .get_by_email("a@x.com")
        .unwrap()
        .password_hash()
        .to_string();

    let (_, body) = post_json(
        &app,
        "/login",
        json!({ "email": "a@x.com", "password": "wrong" }),
        None,
    )
    .await;
    assert!(!body.to_string().contains(&hash));
    assert!(!body.to_string().contains("scrypt"));
}
