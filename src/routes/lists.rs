use std::{collections::HashMap, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    middleware::CurrentUser,
    response::{ApiResult, JsonApiResponse},
    services::{ServiceContext, list_service::ListPatch},
    state::AppState,
};

use super::{
    responses::{ListResponse, ListWithCardsResponse},
    validate,
};

#[derive(Debug, Deserialize)]
pub struct CreateListRequest {
    pub title: String,
    pub order: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateListRequest {
    pub title: Option<String>,
    pub order: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderListsRequest {
    pub list_orders: HashMap<String, i64>,
}

/// `{id}` is the board id for create, listing and reorder, and the list id
/// for update and delete.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/lists/{id}",
            post(create_list)
                .get(board_lists)
                .put(update_list)
                .delete(delete_list),
        )
        .route("/lists/{id}/reorder", post(reorder_lists))
        .with_state(state)
}

async fn create_list(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(board_id): Path<Uuid>,
    Json(body): Json<CreateListRequest>,
) -> ApiResult<ListResponse> {
    let title = validate::bounded("title", &body.title, validate::LIST_TITLE)?;
    let order = validate::order("order", body.order)?;
    let list = ServiceContext::from_state(state.as_ref())
        .list()
        .create(current.id, board_id, title, order)
        .await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", list.into())
}

async fn board_lists(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(board_id): Path<Uuid>,
) -> ApiResult<Vec<ListWithCardsResponse>> {
    let lists = ServiceContext::from_state(state.as_ref())
        .list()
        .board_lists(current.id, board_id)
        .await?;
    JsonApiResponse::ok(lists.into_iter().map(ListWithCardsResponse::from).collect())
}

async fn update_list(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(list_id): Path<Uuid>,
    Json(body): Json<UpdateListRequest>,
) -> ApiResult<ListResponse> {
    let patch = ListPatch {
        title: validate::optional_bounded("title", body.title, validate::LIST_TITLE)?,
        order: validate::order("order", body.order)?,
    };
    let list = ServiceContext::from_state(state.as_ref())
        .list()
        .update(current.id, list_id, patch)
        .await?;
    JsonApiResponse::ok(list.into())
}

async fn delete_list(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(list_id): Path<Uuid>,
) -> ApiResult<()> {
    ServiceContext::from_state(state.as_ref())
        .list()
        .delete(current.id, list_id)
        .await?;
    JsonApiResponse::with_status(StatusCode::OK, "List deleted successfully", ())
}

async fn reorder_lists(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(board_id): Path<Uuid>,
    Json(body): Json<ReorderListsRequest>,
) -> ApiResult<()> {
    let orders = validate::reorder_map(body.list_orders)?;
    ServiceContext::from_state(state.as_ref())
        .list()
        .reorder(current.id, board_id, &orders)
        .await?;
    JsonApiResponse::with_status(StatusCode::OK, "Lists reordered successfully", ())
}
