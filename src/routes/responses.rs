use sea_orm::prelude::DateTimeWithTimeZone;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    auth::AuthSession,
    db::entities::{board, card, list, user},
    services::{
        aggregator::ListWithCards,
        card_service::{ChecklistItem, checklist_of, labels_of},
    },
};

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        Self {
            id: user.id,
            email: user.email,
            username: user.username,
            full_name: user.full_name,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    pub expires_in: usize,
    pub user: UserResponse,
}

impl From<AuthSession> for TokenResponse {
    fn from(session: AuthSession) -> Self {
        Self {
            access_token: session.tokens.access_token,
            refresh_token: session.tokens.refresh_token,
            token_type: session.tokens.token_type,
            expires_in: session.tokens.expires_in,
            user: session.user.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BoardResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub background_color: String,
    pub owner_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<board::Model> for BoardResponse {
    fn from(board: board::Model) -> Self {
        Self {
            id: board.id,
            title: board.title,
            description: board.description,
            background_color: board.background_color,
            owner_id: board.owner_id,
            created_at: board.created_at,
            updated_at: board.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BoardListResponse {
    pub boards: Vec<BoardResponse>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub id: Uuid,
    pub title: String,
    pub order: i64,
    pub board_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<list::Model> for ListResponse {
    fn from(list: list::Model) -> Self {
        Self {
            id: list.id,
            title: list.title,
            order: list.order,
            board_id: list.board_id,
            created_at: list.created_at,
            updated_at: list.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListWithCardsResponse {
    #[serde(flatten)]
    pub list: ListResponse,
    pub cards: Vec<CardResponse>,
}

impl From<ListWithCards> for ListWithCardsResponse {
    fn from(entry: ListWithCards) -> Self {
        Self {
            list: entry.list.into(),
            cards: entry.cards.into_iter().map(CardResponse::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CardResponse {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub labels: Vec<String>,
    pub due_date: Option<DateTimeWithTimeZone>,
    pub checklist: Vec<ChecklistItem>,
    pub order: i64,
    pub list_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl From<card::Model> for CardResponse {
    fn from(card: card::Model) -> Self {
        Self {
            labels: labels_of(&card),
            checklist: checklist_of(&card),
            id: card.id,
            title: card.title,
            description: card.description,
            due_date: card.due_date,
            order: card.order,
            list_id: card.list_id,
            created_at: card.created_at,
            updated_at: card.updated_at,
        }
    }
}
