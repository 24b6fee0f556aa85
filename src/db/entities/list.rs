use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

#[base_entity(parent = "board_id")]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "lists")]
pub struct Model {
    pub title: String,
    pub order: i64,
    #[sea_orm(indexed)]
    pub board_id: Uuid,
}

impl ActiveModelBehavior for ActiveModel {}
