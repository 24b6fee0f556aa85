use sea_orm::entity::prelude::{DateTimeWithTimeZone, Json};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};
use uuid::Uuid;

use super::base_traits::ordered_children;
use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::{card, prelude::Card};

#[derive(Clone)]
pub struct CardDao {
    db: DatabaseConnection,
}

impl DaoBase for CardDao {
    type Entity = Card;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

pub struct NewCard {
    pub list_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub labels: Json,
    pub due_date: Option<DateTimeWithTimeZone>,
    pub checklist: Json,
    pub order: i64,
}

impl CardDao {
    pub async fn create_card(&self, new: NewCard) -> DaoResult<card::Model> {
        let model = card::ActiveModel {
            title: Set(new.title),
            description: Set(new.description),
            labels: Set(new.labels),
            due_date: Set(new.due_date),
            checklist: Set(new.checklist),
            order: Set(new.order),
            list_id: Set(new.list_id),
            ..Default::default()
        };
        self.create(model).await
    }

    pub async fn find_by_list(&self, list_id: Uuid) -> DaoResult<Vec<card::Model>> {
        self.find_by_lists(vec![list_id]).await
    }

    /// Cards of every given list in one query, ascending by order.
    pub async fn find_by_lists(&self, list_ids: Vec<Uuid>) -> DaoResult<Vec<card::Model>> {
        if list_ids.is_empty() {
            return Ok(Vec::new());
        }
        ordered_children::<Card>(list_ids)
            .all(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn count_by_lists(&self, list_ids: Vec<Uuid>) -> DaoResult<u64> {
        if list_ids.is_empty() {
            return Ok(0);
        }
        Card::find()
            .filter(card::Column::ListId.is_in(list_ids))
            .count(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }

    pub async fn delete_by_list(&self, list_id: Uuid) -> DaoResult<u64> {
        Card::delete_many()
            .filter(card::Column::ListId.eq(list_id))
            .exec(&self.db)
            .await
            .map(|result| result.rows_affected)
            .map_err(DaoLayerError::Db)
    }

    /// Reassigns list and order in a single save.
    pub async fn move_to(
        &self,
        card: card::Model,
        list_id: Uuid,
        order: i64,
    ) -> DaoResult<card::Model> {
        self.update_model(card, move |active| {
            active.list_id = Set(list_id);
            active.order = Set(order);
        })
        .await
    }
}
