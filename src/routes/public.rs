use std::sync::Arc;

use axum::{Router, extract::State, routing::get};
use serde::Serialize;

use crate::{
    error::AppError,
    response::{ApiResult, JsonApiResponse},
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub api_prefix: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
}

async fn root() -> ApiResult<ServiceInfo> {
    JsonApiResponse::ok(ServiceInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        api_prefix: super::API_PREFIX,
    })
}

async fn health(State(state): State<Arc<AppState>>) -> ApiResult<HealthResponse> {
    if let Err(err) = state.db.ping().await {
        tracing::error!(error = %err, "health check could not reach the database");
        return Err(AppError::unavailable("Database unavailable"));
    }
    JsonApiResponse::ok(HealthResponse {
        status: "healthy",
        database: "connected",
    })
}
