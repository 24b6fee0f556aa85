use std::sync::Arc;

use axum::{
    Router,
    body::{self, Body},
    http::{Method, Request, StatusCode, header},
};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::{
    config::{AppConfig, DatabaseConfig, LimitsConfig},
    db::connection,
    routes::app,
    state::AppState,
};

pub const TEST_JWT_SECRET: &str = "test-secret-for-taskboard";

/// A private in-memory SQLite store with the schema applied. One connection
/// keeps every query on the same database.
pub async fn memory_db() -> DatabaseConnection {
    connection::connect(&DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_idle: 1,
    })
    .await
    .expect("in-memory sqlite should connect")
}

pub fn test_config(limits: LimitsConfig) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.auth.jwt_secret = TEST_JWT_SECRET.to_string();
    cfg.database.url = "sqlite::memory:".to_string();
    cfg.limits = limits;
    cfg
}

pub async fn build_state(limits: LimitsConfig) -> Arc<AppState> {
    AppState::new(test_config(limits), memory_db().await)
}

pub async fn test_router() -> Router {
    app(build_state(LimitsConfig::default()).await)
}

/// Sends one request through `app` and returns the status with the decoded
/// JSON body (`Null` when the body is empty).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("router should respond");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be json")
    };
    (status, json)
}

/// Registers `name` as `{name}@example.com` and returns the session payload.
pub async fn register(app: &Router, name: &str) -> Value {
    let (status, json) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "email": format!("{name}@example.com"),
            "username": name,
            "password": "correct-horse",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {json}");
    json["data"].clone()
}

/// Registers `name` and returns its access token.
pub async fn access_token(app: &Router, name: &str) -> String {
    register(app, name).await["access_token"]
        .as_str()
        .expect("access token present")
        .to_string()
}
