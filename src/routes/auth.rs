use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;

use crate::{
    auth::Registration,
    middleware::CurrentUser,
    response::{ApiResult, JsonApiResponse},
    services::ServiceContext,
    state::AppState,
};

use super::{
    responses::{TokenResponse, UserResponse},
    validate,
};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .with_state(state)
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<TokenResponse> {
    let email = validate::email(&body.email)?;
    let username = validate::bounded("username", &body.username, validate::USERNAME)?;
    let full_name = body
        .full_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());

    let session = ServiceContext::from_state(state.as_ref())
        .auth(state.auth.as_ref())
        .register(Registration {
            email: &email,
            username: &username,
            password: &body.password,
            full_name,
        })
        .await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "registered", session.into())
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<TokenResponse> {
    let email = validate::email(&body.email)?;
    let session = ServiceContext::from_state(state.as_ref())
        .auth(state.auth.as_ref())
        .login(&email, &body.password)
        .await?;
    JsonApiResponse::ok(session.into())
}

async fn refresh(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RefreshRequest>,
) -> ApiResult<TokenResponse> {
    let session = ServiceContext::from_state(state.as_ref())
        .auth(state.auth.as_ref())
        .refresh(body.refresh_token.trim())
        .await?;
    JsonApiResponse::ok(session.into())
}

async fn logout(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
    body: Option<Json<LogoutRequest>>,
) -> ApiResult<()> {
    let body = body.map(|Json(body)| body).unwrap_or_default();
    ServiceContext::from_state(state.as_ref())
        .auth(state.auth.as_ref())
        .logout(body.refresh_token.as_deref())
        .await?;
    JsonApiResponse::with_status(StatusCode::OK, "Successfully logged out", ())
}

async fn me(current: CurrentUser) -> ApiResult<UserResponse> {
    JsonApiResponse::ok(current.user.into())
}
