use std::{collections::HashMap, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::post,
};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    middleware::CurrentUser,
    response::{ApiResult, JsonApiResponse},
    services::{
        ServiceContext,
        card_service::{CardDraft, CardPatch, ChecklistItem},
    },
    state::AppState,
};

use super::{responses::CardResponse, validate};

#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
    pub due_date: Option<DateTimeWithTimeZone>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    pub order: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCardRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub description: Option<Option<String>>,
    pub labels: Option<Vec<String>>,
    #[serde(default, deserialize_with = "validate::nullable")]
    pub due_date: Option<Option<DateTimeWithTimeZone>>,
    pub checklist: Option<Vec<ChecklistItem>>,
    pub order: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderCardsRequest {
    pub card_orders: HashMap<String, i64>,
}

#[derive(Debug, Deserialize)]
pub struct MoveCardRequest {
    pub target_list_id: Uuid,
    pub new_order: i64,
}

/// `{id}` is the list id for create and reorder, and the card id for update,
/// delete and move.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/cards/{id}",
            post(create_card).put(update_card).delete(delete_card),
        )
        .route("/cards/{id}/reorder", post(reorder_cards))
        .route("/cards/{id}/move", post(move_card))
        .with_state(state)
}

async fn create_card(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(list_id): Path<Uuid>,
    Json(body): Json<CreateCardRequest>,
) -> ApiResult<CardResponse> {
    let draft = CardDraft {
        title: validate::bounded("title", &body.title, validate::CARD_TITLE)?,
        description: validate::max_len(
            "description",
            body.description,
            validate::CARD_DESCRIPTION_MAX,
        )?,
        labels: body.labels,
        due_date: body.due_date,
        checklist: validate::checklist(body.checklist)?,
        order: validate::order("order", body.order)?,
    };
    let card = ServiceContext::from_state(state.as_ref())
        .card()
        .create(current.id, list_id, draft)
        .await?;
    JsonApiResponse::with_status(StatusCode::CREATED, "created", card.into())
}

async fn update_card(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(card_id): Path<Uuid>,
    Json(body): Json<UpdateCardRequest>,
) -> ApiResult<CardResponse> {
    let patch = CardPatch {
        title: validate::optional_bounded("title", body.title, validate::CARD_TITLE)?,
        description: body
            .description
            .map(|description| {
                validate::max_len("description", description, validate::CARD_DESCRIPTION_MAX)
            })
            .transpose()?,
        labels: body.labels,
        due_date: body.due_date,
        checklist: body.checklist.map(validate::checklist).transpose()?,
        order: validate::order("order", body.order)?,
    };
    let card = ServiceContext::from_state(state.as_ref())
        .card()
        .update(current.id, card_id, patch)
        .await?;
    JsonApiResponse::ok(card.into())
}

async fn delete_card(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(card_id): Path<Uuid>,
) -> ApiResult<()> {
    ServiceContext::from_state(state.as_ref())
        .card()
        .delete(current.id, card_id)
        .await?;
    JsonApiResponse::with_status(StatusCode::OK, "Card deleted successfully", ())
}

async fn reorder_cards(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(list_id): Path<Uuid>,
    Json(body): Json<ReorderCardsRequest>,
) -> ApiResult<()> {
    let orders = validate::reorder_map(body.card_orders)?;
    ServiceContext::from_state(state.as_ref())
        .card()
        .reorder(current.id, list_id, &orders)
        .await?;
    JsonApiResponse::with_status(StatusCode::OK, "Cards reordered successfully", ())
}

async fn move_card(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Path(card_id): Path<Uuid>,
    Json(body): Json<MoveCardRequest>,
) -> ApiResult<CardResponse> {
    validate::order("new_order", Some(body.new_order))?;
    let card = ServiceContext::from_state(state.as_ref())
        .card()
        .move_card(current.id, card_id, body.target_list_id, body.new_order)
        .await?;
    JsonApiResponse::ok(card.into())
}
