use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

// Lists reference boards by id only; there is no foreign key, so deleting a
// board leaves its lists in place.
#[base_entity]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "boards")]
pub struct Model {
    pub title: String,
    pub description: Option<String>,
    pub background_color: String,
    #[sea_orm(indexed)]
    pub owner_id: Uuid,
}

impl ActiveModelBehavior for ActiveModel {}
