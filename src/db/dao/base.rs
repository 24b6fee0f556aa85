use chrono::Utc;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, PrimaryKeyTrait, Select,
};
use uuid::Uuid;

use super::base_traits::{HasIdActiveModel, TimestampedActiveModel};
use super::error::{DaoLayerError, DaoResult};

fn entity_name<E: EntityTrait>() -> &'static str {
    let full = std::any::type_name::<E>();
    // `taskboard::db::entities::card::Entity` -> `card`
    full.rsplit("::").nth(1).unwrap_or(full)
}

pub trait DaoBase: Clone + Send + Sync + Sized
where
    <Self::Entity as EntityTrait>::Model:
        FromQueryResult + IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send + Sync,
    <Self::Entity as EntityTrait>::ActiveModel: ActiveModelTrait<Entity = Self::Entity>
        + ActiveModelBehavior
        + HasIdActiveModel
        + TimestampedActiveModel
        + Send,
    <<Self::Entity as EntityTrait>::PrimaryKey as PrimaryKeyTrait>::ValueType:
        From<Uuid> + Send + Sync,
{
    type Entity: EntityTrait + Send + Sync;

    fn new(db: &DatabaseConnection) -> Self;

    fn db(&self) -> &DatabaseConnection;

    fn not_found(id: Uuid) -> DaoLayerError {
        DaoLayerError::NotFound {
            entity: entity_name::<Self::Entity>(),
            id,
        }
    }

    async fn create(
        &self,
        data: impl IntoActiveModel<<Self::Entity as EntityTrait>::ActiveModel> + Send,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let now = Utc::now().fixed_offset();
        let mut active = data.into_active_model();
        active.set_id(Uuid::new_v4());
        active.set_created_at(now);
        active.set_updated_at(now);
        active.insert(self.db()).await.map_err(DaoLayerError::Db)
    }

    async fn find_optional(
        &self,
        id: Uuid,
    ) -> DaoResult<Option<<Self::Entity as EntityTrait>::Model>> {
        Self::Entity::find_by_id(id)
            .one(self.db())
            .await
            .map_err(DaoLayerError::Db)
    }

    async fn find_by_id(&self, id: Uuid) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        self.find_optional(id)
            .await?
            .ok_or_else(|| Self::not_found(id))
    }

    async fn find_all(
        &self,
        apply: impl FnOnce(Select<Self::Entity>) -> Select<Self::Entity> + Send,
    ) -> DaoResult<Vec<<Self::Entity as EntityTrait>::Model>> {
        apply(Self::Entity::find())
            .all(self.db())
            .await
            .map_err(DaoLayerError::Db)
    }

    /// Applies `apply` to an already loaded row and persists it with a fresh
    /// `updated_at`.
    async fn update_model(
        &self,
        model: <Self::Entity as EntityTrait>::Model,
        apply: impl FnOnce(&mut <Self::Entity as EntityTrait>::ActiveModel) + Send,
    ) -> DaoResult<<Self::Entity as EntityTrait>::Model> {
        let mut active = model.into_active_model();
        apply(&mut active);
        active.set_updated_at(Utc::now().fixed_offset());
        active.update(self.db()).await.map_err(DaoLayerError::Db)
    }

    async fn delete(&self, id: Uuid) -> DaoResult<Uuid> {
        let result = Self::Entity::delete_by_id(id)
            .exec(self.db())
            .await
            .map_err(DaoLayerError::Db)?;

        if result.rows_affected == 0 {
            return Err(Self::not_found(id));
        }

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::entity_name;
    use crate::db::entities::{card, user};

    #[test]
    fn entity_name_uses_module_segment() {
        assert_eq!(entity_name::<card::Entity>(), "card");
        assert_eq!(entity_name::<user::Entity>(), "user");
    }
}
