use sea_orm::Set;
use uuid::Uuid;

use crate::{
    config::LimitsConfig,
    db::dao::{BoardDao, DaoBase, ListDao},
    db::entities::board,
    error::AppError,
    services::ownership::OwnershipResolver,
};

pub const DEFAULT_BACKGROUND_COLOR: &str = "#3b82f6";

#[derive(Debug, Clone, Default)]
pub struct NewBoard {
    pub title: String,
    pub description: Option<String>,
    pub background_color: Option<String>,
}

/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct BoardPatch {
    pub title: Option<String>,
    /// `Some(None)` clears the stored description.
    pub description: Option<Option<String>>,
    pub background_color: Option<String>,
}

#[derive(Clone)]
pub struct BoardService {
    boards: BoardDao,
    lists: ListDao,
    resolver: OwnershipResolver,
    limits: LimitsConfig,
}

impl BoardService {
    pub fn new(
        boards: BoardDao,
        lists: ListDao,
        resolver: OwnershipResolver,
        limits: LimitsConfig,
    ) -> Self {
        Self {
            boards,
            lists,
            resolver,
            limits,
        }
    }

    pub async fn create(&self, owner_id: Uuid, new: NewBoard) -> Result<board::Model, AppError> {
        let owned = self.boards.count_by_owner(owner_id).await?;
        if owned >= self.limits.max_boards_per_user {
            return Err(AppError::bad_request(format!(
                "Maximum {} boards per user",
                self.limits.max_boards_per_user
            )));
        }

        let board = self
            .boards
            .create_board(
                owner_id,
                new.title,
                new.description,
                new.background_color
                    .unwrap_or_else(|| DEFAULT_BACKGROUND_COLOR.to_string()),
            )
            .await?;
        tracing::info!(board_id = %board.id, %owner_id, "board created");
        Ok(board)
    }

    pub async fn list_for(&self, owner_id: Uuid) -> Result<Vec<board::Model>, AppError> {
        Ok(self.boards.find_by_owner(owner_id).await?)
    }

    pub async fn get(&self, requester: Uuid, board_id: Uuid) -> Result<board::Model, AppError> {
        Ok(self.resolver.board(requester, board_id).await?)
    }

    pub async fn update(
        &self,
        requester: Uuid,
        board_id: Uuid,
        patch: BoardPatch,
    ) -> Result<board::Model, AppError> {
        let board = self.resolver.board(requester, board_id).await?;
        let updated = self
            .boards
            .update_model(board, move |active| {
                if let Some(title) = patch.title {
                    active.title = Set(title);
                }
                if let Some(description) = patch.description {
                    active.description = Set(description);
                }
                if let Some(color) = patch.background_color {
                    active.background_color = Set(color);
                }
            })
            .await?;
        tracing::info!(%board_id, "board updated");
        Ok(updated)
    }

    /// Removes only the board row. Its lists and cards stay in the store.
    pub async fn delete(&self, requester: Uuid, board_id: Uuid) -> Result<(), AppError> {
        let board = self.resolver.board(requester, board_id).await?;
        self.boards.delete(board.id).await?;

        let orphaned = self.lists.count_by_board(board.id).await?;
        if orphaned > 0 {
            tracing::warn!(%board_id, orphaned_lists = orphaned, "board deleted with lists remaining");
        } else {
            tracing::info!(%board_id, "board deleted");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use uuid::Uuid;

    use super::NewBoard;
    use crate::services::ServiceContext;

    fn count_row(count: i64) -> BTreeMap<String, Value> {
        BTreeMap::from([("num_items".to_string(), Value::BigInt(Some(count)))])
    }

    #[tokio::test]
    async fn create_rejects_owner_at_board_limit() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[count_row(7)]])
            .into_connection();
        let service = ServiceContext::new(&db).board();

        let err = service
            .create(
                Uuid::new_v4(),
                NewBoard {
                    title: "Eighth".to_string(),
                    ..NewBoard::default()
                },
            )
            .await
            .expect_err("limit reached");
        assert_eq!(err.message(), "Maximum 7 boards per user");
        assert_eq!(db.into_transaction_log().len(), 1);
    }
}
