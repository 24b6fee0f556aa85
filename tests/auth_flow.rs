use axum::http::{Method, StatusCode};
use serde_json::json;

use taskboard::test_helpers::{access_token, register, send, test_router};

#[tokio::test]
async fn root_and_health_respond() {
    let app = test_router().await;

    let (status, json) = send(&app, Method::GET, "/", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["api_prefix"], "/api");

    let (status, json) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "healthy");
}

#[tokio::test]
async fn register_returns_tokens_and_profile() {
    let app = test_router().await;

    let session = register(&app, "alice").await;
    assert!(session["access_token"].as_str().is_some());
    assert!(session["refresh_token"].as_str().is_some());
    assert_eq!(session["token_type"], "bearer");
    assert_eq!(session["user"]["email"], "alice@example.com");
    assert!(session["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_email_and_username_are_rejected() {
    let app = test_router().await;
    register(&app, "alice").await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": "alice@example.com",
            "username": "someone",
            "password": "correct-horse",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Email already registered");

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": "other@example.com",
            "username": "alice",
            "password": "correct-horse",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Username already taken");
}

#[tokio::test]
async fn short_password_is_rejected() {
    let app = test_router().await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": "bob@example.com",
            "username": "bob",
            "password": "short",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["status"], 400);
}

#[tokio::test]
async fn login_checks_credentials() {
    let app = test_router().await;
    register(&app, "alice").await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Incorrect email or password");

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "correct-horse"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["user"]["username"], "alice");
}

#[tokio::test]
async fn me_requires_a_valid_bearer_token() {
    let app = test_router().await;

    let (status, json) = send(&app, Method::GET, "/api/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["status"], 401);

    let (status, _) = send(&app, Method::GET, "/api/auth/me", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = access_token(&app, "alice").await;
    let (status, json) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["username"], "alice");
}

#[tokio::test]
async fn refresh_rotates_the_refresh_token() {
    let app = test_router().await;
    let session = register(&app, "alice").await;
    let refresh = session["refresh_token"].as_str().expect("refresh token");

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/auth/refresh",
        None,
        Some(json!({"refresh_token": refresh})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_ne!(json["data"]["refresh_token"], refresh);

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/auth/refresh",
        None,
        Some(json!({"refresh_token": refresh})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Invalid refresh token");
}

#[tokio::test]
async fn logout_revokes_the_supplied_refresh_token() {
    let app = test_router().await;
    let session = register(&app, "alice").await;
    let access = session["access_token"].as_str().expect("access token");
    let refresh = session["refresh_token"].as_str().expect("refresh token");

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/auth/logout",
        Some(access),
        Some(json!({"refresh_token": refresh})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["message"], "Successfully logged out");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/refresh",
        None,
        Some(json!({"refresh_token": refresh})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_bodies_are_rendered_as_json_errors() {
    let app = test_router().await;

    let (status, json) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "alice@example.com"})),
    )
    .await;
    assert!(status.is_client_error());
    assert_eq!(json["status"], status.as_u16());
    assert!(json["data"].is_null());
}
