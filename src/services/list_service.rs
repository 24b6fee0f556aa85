use std::collections::HashMap;

use sea_orm::Set;
use uuid::Uuid;

use crate::{
    db::dao::{CardDao, DaoBase, ListDao},
    db::entities::list,
    error::AppError,
    services::{
        aggregator::{BoardAggregator, ListWithCards},
        ordering::OrderAssigner,
        ownership::OwnershipResolver,
    },
};

#[derive(Debug, Clone, Default)]
pub struct ListPatch {
    pub title: Option<String>,
    pub order: Option<i64>,
}

#[derive(Clone)]
pub struct ListService {
    lists: ListDao,
    cards: CardDao,
    resolver: OwnershipResolver,
    assigner: OrderAssigner<ListDao>,
    aggregator: BoardAggregator,
}

impl ListService {
    pub fn new(lists: ListDao, cards: CardDao, resolver: OwnershipResolver) -> Self {
        Self {
            assigner: OrderAssigner::new(lists.clone()),
            aggregator: BoardAggregator::new(lists.clone(), cards.clone()),
            lists,
            cards,
            resolver,
        }
    }

    pub async fn create(
        &self,
        requester: Uuid,
        board_id: Uuid,
        title: String,
        order: Option<i64>,
    ) -> Result<list::Model, AppError> {
        let board = self.resolver.board(requester, board_id).await?;
        let order = self.assigner.resolve(board.id, order).await?;
        let list = self.lists.create_list(board.id, title, order).await?;
        tracing::info!(list_id = %list.id, %board_id, order, "list created");
        Ok(list)
    }

    pub async fn board_lists(
        &self,
        requester: Uuid,
        board_id: Uuid,
    ) -> Result<Vec<ListWithCards>, AppError> {
        let board = self.resolver.board(requester, board_id).await?;
        Ok(self.aggregator.lists_with_cards(&board).await?)
    }

    pub async fn update(
        &self,
        requester: Uuid,
        list_id: Uuid,
        patch: ListPatch,
    ) -> Result<list::Model, AppError> {
        let chain = self.resolver.list(requester, list_id).await?;
        let updated = self
            .lists
            .update_model(chain.list, move |active| {
                if let Some(title) = patch.title {
                    active.title = Set(title);
                }
                if let Some(order) = patch.order {
                    active.order = Set(order);
                }
            })
            .await?;
        tracing::info!(%list_id, "list updated");
        Ok(updated)
    }

    /// Deletes the list's cards first, then the list.
    pub async fn delete(&self, requester: Uuid, list_id: Uuid) -> Result<(), AppError> {
        let chain = self.resolver.list(requester, list_id).await?;
        let cards_removed = self.cards.delete_by_list(chain.list.id).await?;
        self.lists.delete(chain.list.id).await?;
        tracing::info!(%list_id, cards_removed, "list deleted");
        Ok(())
    }

    pub async fn reorder(
        &self,
        requester: Uuid,
        board_id: Uuid,
        orders: &HashMap<Uuid, i64>,
    ) -> Result<usize, AppError> {
        let board = self.resolver.board(requester, board_id).await?;
        let applied = self.assigner.reorder(board.id, orders).await?;
        tracing::info!(%board_id, requested = orders.len(), applied, "lists reordered");
        Ok(applied)
    }
}
