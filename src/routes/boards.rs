use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    middleware::CurrentUser,
    response::{ApiResult, JsonApiResponse},
    services::{
        ServiceContext,
        board_service::{BoardPatch, NewBoard},
    },
    state::AppState,
};

use super::{
    responses::{BoardListResponse, BoardResponse},
    validate,
};

#[derive(Debug, Deserialize)]
pub struct CreateBoardRequest {
    pub title: String,
    pub description: Option<String>,
    pub background_color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBoardRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub description: Option<Option<String>>,
    pub background_color: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/boards", post(create_board).get(list_boards))
        .route(
            "/boards/{board_id}",
            get(get_board).put(update_board).delete(delete_board),
        )
        .with_state(state)
}

async fn create_board(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Json(body): Json<CreateBoardRequest>,
) -> ApiResult<BoardResponse> {
    let new = NewBoard {
        title: validate::bounded("title", &body.title, validate::BOARD_TITLE)?,
        description: validate::max_len(
            "description",
            body.description,
            validate::BOARD_DESCRIPTION_MAX,
        )?,
        background_color: validate::hex_color(body.background_color)?,
    };
    let board = ServiceContext::from_state(state.as_ref())
        .board()
        .create(current.id, new)
        .await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", board.into())
}

async fn list_boards(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
) -> ApiResult<BoardListResponse> {
    let boards = ServiceContext::from_state(state.as_ref())
        .board()
        .list_for(current.id)
        .await?;
    let total = boards.len();
    JsonApiResponse::ok(BoardListResponse {
        boards: boards.into_iter().map(BoardResponse::from).collect(),
        total,
    })
}

async fn get_board(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(board_id): Path<Uuid>,
) -> ApiResult<BoardResponse> {
    let board = ServiceContext::from_state(state.as_ref())
        .board()
        .get(current.id, board_id)
        .await?;
    JsonApiResponse::ok(board.into())
}

async fn update_board(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(board_id): Path<Uuid>,
    Json(body): Json<UpdateBoardRequest>,
) -> ApiResult<BoardResponse> {
    let patch = BoardPatch {
        title: validate::optional_bounded("title", body.title, validate::BOARD_TITLE)?,
        description: body
            .description
            .map(|description| {
                validate::max_len("description", description, validate::BOARD_DESCRIPTION_MAX)
            })
            .transpose()?,
        background_color: validate::hex_color(body.background_color)?,
    };
    let board = ServiceContext::from_state(state.as_ref())
        .board()
        .update(current.id, board_id, patch)
        .await?;
    JsonApiResponse::ok(board.into())
}

async fn delete_board(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(board_id): Path<Uuid>,
) -> ApiResult<()> {
    ServiceContext::from_state(state.as_ref())
        .board()
        .delete(current.id, board_id)
        .await?;
    JsonApiResponse::with_status(StatusCode::OK, "Board deleted successfully", ())
}
