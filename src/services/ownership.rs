use std::fmt;

use uuid::Uuid;

use crate::{
    db::dao::{BoardDao, CardDao, DaoBase, DaoLayerError, ListDao},
    db::entities::{board, card, list},
    error::AppError,
};

/// One link in the card -> list -> board -> owner chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Board,
    List,
    Card,
}

impl Link {
    pub fn noun(self) -> &'static str {
        match self {
            Link::Board => "board",
            Link::List => "list",
            Link::Card => "card",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Link::Board => "Board",
            Link::List => "List",
            Link::Card => "Card",
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum OwnershipError {
    #[error("{} not found", .0.label())]
    NotFound(Link),

    #[error("Not authorized to access this {0}")]
    Forbidden(Link),

    #[error("Storage error: {0}")]
    Store(#[from] DaoLayerError),
}

impl From<OwnershipError> for AppError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::NotFound(_) => AppError::not_found(err.to_string()),
            OwnershipError::Forbidden(_) => AppError::forbidden(err.to_string()),
            OwnershipError::Store(inner) => AppError::from(inner),
        }
    }
}

pub type OwnershipResult<T> = Result<T, OwnershipError>;

#[derive(Debug, Clone)]
pub struct ListChain {
    pub list: list::Model,
    pub board: board::Model,
}

#[derive(Debug, Clone)]
pub struct CardChain {
    pub card: card::Model,
    pub list: list::Model,
    pub board: board::Model,
}

/// Walks a target up to its board and compares the board owner with the
/// requester. Nothing is cached; every call reads the store.
#[derive(Clone)]
pub struct OwnershipResolver {
    boards: BoardDao,
    lists: ListDao,
    cards: CardDao,
}

impl OwnershipResolver {
    pub fn new(boards: BoardDao, lists: ListDao, cards: CardDao) -> Self {
        Self {
            boards,
            lists,
            cards,
        }
    }

    pub async fn board(&self, requester: Uuid, board_id: Uuid) -> OwnershipResult<board::Model> {
        let board = self.load_board(board_id).await?;
        owned_by(requester, board, Link::Board)
    }

    pub async fn list(&self, requester: Uuid, list_id: Uuid) -> OwnershipResult<ListChain> {
        let list = self
            .lists
            .find_optional(list_id)
            .await?
            .ok_or(OwnershipError::NotFound(Link::List))?;
        let board = self.load_board(list.board_id).await?;
        let board = owned_by(requester, board, Link::List)?;
        Ok(ListChain { list, board })
    }

    pub async fn card(&self, requester: Uuid, card_id: Uuid) -> OwnershipResult<CardChain> {
        let card = self
            .cards
            .find_optional(card_id)
            .await?
            .ok_or(OwnershipError::NotFound(Link::Card))?;
        let ListChain { list, board } = self.list(requester, card.list_id).await?;
        Ok(CardChain { card, list, board })
    }

    async fn load_board(&self, board_id: Uuid) -> OwnershipResult<board::Model> {
        self.boards
            .find_optional(board_id)
            .await?
            .ok_or(OwnershipError::NotFound(Link::Board))
    }
}

/// `link` names what the caller was trying to reach, so a foreign list is
/// reported as such even though the owner lives on its board.
fn owned_by(requester: Uuid, board: board::Model, link: Link) -> OwnershipResult<board::Model> {
    if board.owner_id != requester {
        return Err(OwnershipError::Forbidden(link));
    }
    Ok(board)
}
