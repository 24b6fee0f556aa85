use sea_orm::entity::prelude::DateTimeWithTimeZone;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Select};
use uuid::Uuid;

pub trait HasCreatedAtColumn: EntityTrait {
    fn created_at_column() -> Self::Column;
}

pub trait HasIdActiveModel {
    fn set_id(&mut self, id: Uuid);
}

pub trait TimestampedActiveModel {
    fn set_created_at(&mut self, ts: DateTimeWithTimeZone);
    fn set_updated_at(&mut self, ts: DateTimeWithTimeZone);
}

/// A row that lives in an ordered sibling set under a single parent
/// (cards under a list, lists under a board).
pub trait OrderedModel {
    fn sibling_id(&self) -> Uuid;
    fn parent_id(&self) -> Uuid;
    fn sort_order(&self) -> i64;
    fn inserted_at(&self) -> DateTimeWithTimeZone;

    /// Ascending order value; ties fall back to insertion time, then id.
    fn sort_key(&self) -> (i64, DateTimeWithTimeZone, Uuid) {
        (self.sort_order(), self.inserted_at(), self.sibling_id())
    }
}

pub trait OrderedActiveModel {
    fn set_order(&mut self, order: i64);
}

pub trait OrderedEntity: HasCreatedAtColumn {
    fn parent_column() -> Self::Column;
    fn order_column() -> Self::Column;
}

/// Children of the given parents, ascending by order then insertion time.
pub fn ordered_children<E: OrderedEntity>(parents: Vec<Uuid>) -> Select<E> {
    E::find()
        .filter(E::parent_column().is_in(parents))
        .order_by_asc(E::order_column())
        .order_by_asc(E::created_at_column())
}
