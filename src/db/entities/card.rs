use base_entity_derive::base_entity;
use sea_orm::entity::prelude::*;

/// `labels` holds a JSON array of strings and `checklist` a JSON array of
/// `services::card_service::ChecklistItem`.
#[base_entity(parent = "list_id")]
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "cards")]
pub struct Model {
    pub title: String,
    pub description: Option<String>,
    pub labels: Json,
    pub due_date: Option<DateTimeWithTimeZone>,
    pub checklist: Json,
    pub order: i64,
    #[sea_orm(indexed)]
    pub list_id: Uuid,
}

impl ActiveModelBehavior for ActiveModel {}
