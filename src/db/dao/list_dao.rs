use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

use super::base_traits::ordered_children;
use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::{list, prelude::List};

#[derive(Clone)]
pub struct ListDao {
    db: DatabaseConnection,
}

impl DaoBase for ListDao {
    type Entity = List;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl ListDao {
    pub async fn create_list(
        &self,
        board_id: Uuid,
        title: String,
        order: i64,
    ) -> DaoResult<list::Model> {
        let model = list::ActiveModel {
            title: Set(title),
            order: Set(order),
            board_id: Set(board_id),
            ..Default::default()
        };
        self.create(model).await
    }

    /// Lists of a board, ascending by order.
    pub async fn find_by_board(&self, board_id: Uuid) -> DaoResult<Vec<list::Model>> {
        ordered_children::<List>(vec![board_id])
            .all(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn count_by_board(&self, board_id: Uuid) -> DaoResult<u64> {
        List::find()
            .filter(list::Column::BoardId.eq(board_id))
            .count(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use uuid::Uuid;

    use crate::db::entities::list;

    use super::ListDao;
    use crate::db::dao::DaoBase;

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn list_model(board_id: Uuid, title: &str, order: i64) -> list::Model {
        let now = ts();
        list::Model {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title: title.to_string(),
            order,
            board_id,
        }
    }

    #[tokio::test]
    async fn find_by_board_issues_a_single_query() {
        let board_id = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                list_model(board_id, "Todo", 0),
                list_model(board_id, "Doing", 1),
            ]])
            .into_connection();
        let dao = ListDao::new(&db);

        let lists = dao.find_by_board(board_id).await.expect("query should succeed");
        let titles: Vec<_> = lists.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, ["Todo", "Doing"]);
        assert_eq!(db.into_transaction_log().len(), 1);
    }
}
