use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::{board, prelude::Board};

#[derive(Clone)]
pub struct BoardDao {
    db: DatabaseConnection,
}

impl DaoBase for BoardDao {
    type Entity = Board;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl BoardDao {
    pub async fn create_board(
        &self,
        owner_id: Uuid,
        title: String,
        description: Option<String>,
        background_color: String,
    ) -> DaoResult<board::Model> {
        let model = board::ActiveModel {
            title: Set(title),
            description: Set(description),
            background_color: Set(background_color),
            owner_id: Set(owner_id),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn find_by_owner(&self, owner_id: Uuid) -> DaoResult<Vec<board::Model>> {
        self.find_all(move |query| {
            query
                .filter(board::Column::OwnerId.eq(owner_id))
                .order_by_asc(board::Column::CreatedAt)
        })
        .await
    }

    pub async fn count_by_owner(&self, owner_id: Uuid) -> DaoResult<u64> {
        Board::find()
            .filter(board::Column::OwnerId.eq(owner_id))
            .count(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use uuid::Uuid;

    use crate::db::entities::board;

    use super::BoardDao;
    use crate::db::dao::{DaoBase, DaoLayerError};

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn board_model(id: Uuid, owner_id: Uuid, title: &str) -> board::Model {
        let now = ts();
        board::Model {
            id,
            created_at: now,
            updated_at: now,
            title: title.to_string(),
            description: None,
            background_color: "#3b82f6".to_string(),
            owner_id,
        }
    }

    #[tokio::test]
    async fn find_by_owner_returns_rows() {
        let owner = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                board_model(Uuid::new_v4(), owner, "Roadmap"),
                board_model(Uuid::new_v4(), owner, "Chores"),
            ]])
            .into_connection();
        let dao = BoardDao::new(&db);

        let boards = dao.find_by_owner(owner).await.expect("query should succeed");
        let titles: Vec<_> = boards.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["Roadmap", "Chores"]);
    }

    #[tokio::test]
    async fn find_by_id_reports_missing_board() {
        let missing = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<board::Model>::new()])
            .into_connection();
        let dao = BoardDao::new(&db);

        let err = dao.find_by_id(missing).await.expect_err("board is missing");
        assert!(matches!(
            err,
            DaoLayerError::NotFound { entity: "board", id } if id == missing
        ));
    }

    #[tokio::test]
    async fn count_by_owner_maps_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("count failed".to_string())])
            .into_connection();
        let dao = BoardDao::new(&db);

        let err = dao
            .count_by_owner(Uuid::new_v4())
            .await
            .expect_err("count should fail");
        assert!(matches!(err, DaoLayerError::Db(_)));
    }
}
