use std::sync::Arc;

use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::{
    middleware::{catch_panic_layer, cors_layer, json_error_middleware},
    state::AppState,
};

pub mod auth;
pub mod boards;
pub mod cards;
pub mod lists;
pub mod public;
pub mod responses;
pub mod validate;

pub const API_PREFIX: &str = "/api";

pub fn router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(auth::router(state.clone()))
        .merge(boards::router(state.clone()))
        .merge(lists::router(state.clone()))
        .merge(cards::router(state.clone()));

    Router::new()
        .nest(API_PREFIX, api)
        .merge(public::router(state))
}

/// The router with the full middleware stack, as served by the binary.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config.general);
    router(state)
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
