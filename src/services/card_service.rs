use std::collections::HashMap;

use sea_orm::Set;
use sea_orm::entity::prelude::{DateTimeWithTimeZone, Json};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{
    config::LimitsConfig,
    db::dao::{CardDao, DaoBase, ListDao, NewCard},
    db::entities::card,
    error::AppError,
    services::{ordering::OrderAssigner, ownership::OwnershipResolver},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    #[serde(default)]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CardDraft {
    pub title: String,
    pub description: Option<String>,
    pub labels: Vec<String>,
    pub due_date: Option<DateTimeWithTimeZone>,
    pub checklist: Vec<ChecklistItem>,
    pub order: Option<i64>,
}

/// Fields left as `None` keep their stored value. For the nullable ones,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub labels: Option<Vec<String>>,
    pub due_date: Option<Option<DateTimeWithTimeZone>>,
    pub checklist: Option<Vec<ChecklistItem>>,
    pub order: Option<i64>,
}

/// Labels form a set; the first occurrence of each keeps its position.
fn labels_json(labels: Vec<String>) -> Json {
    let mut seen = Vec::with_capacity(labels.len());
    for label in labels {
        if !seen.contains(&label) {
            seen.push(label);
        }
    }
    Json::from(seen)
}

/// Items without an id get a fresh one.
fn checklist_json(items: Vec<ChecklistItem>) -> Result<Json, AppError> {
    let items: Vec<ChecklistItem> = items
        .into_iter()
        .map(|mut item| {
            if item.id.trim().is_empty() {
                item.id = Uuid::new_v4().to_string();
            }
            item
        })
        .collect();
    serde_json::to_value(items)
        .map_err(|err| AppError::internal(format!("Checklist encoding failed: {err}")))
}

/// A stored column that no longer decodes reads as empty.
fn decode_column<T: DeserializeOwned>(card: &card::Model, column: &str, raw: &Json) -> Vec<T> {
    serde_json::from_value(raw.clone()).unwrap_or_else(|err| {
        tracing::warn!(
            card_id = %card.id,
            column,
            error = %err,
            "stored card column is malformed"
        );
        Vec::new()
    })
}

pub fn labels_of(card: &card::Model) -> Vec<String> {
    decode_column(card, "labels", &card.labels)
}

pub fn checklist_of(card: &card::Model) -> Vec<ChecklistItem> {
    decode_column(card, "checklist", &card.checklist)
}

#[derive(Clone)]
pub struct CardService {
    cards: CardDao,
    lists: ListDao,
    resolver: OwnershipResolver,
    assigner: OrderAssigner<CardDao>,
    limits: LimitsConfig,
}

impl CardService {
    pub fn new(
        cards: CardDao,
        lists: ListDao,
        resolver: OwnershipResolver,
        limits: LimitsConfig,
    ) -> Self {
        Self {
            assigner: OrderAssigner::new(cards.clone()),
            cards,
            lists,
            resolver,
            limits,
        }
    }

    async fn ensure_capacity(&self, board_id: Uuid) -> Result<(), AppError> {
        let list_ids = self
            .lists
            .find_by_board(board_id)
            .await?
            .into_iter()
            .map(|list| list.id)
            .collect();
        let count = self.cards.count_by_lists(list_ids).await?;
        if count >= self.limits.max_cards_per_board {
            return Err(AppError::bad_request(format!(
                "Maximum {} cards per board",
                self.limits.max_cards_per_board
            )));
        }
        Ok(())
    }

    pub async fn create(
        &self,
        requester: Uuid,
        list_id: Uuid,
        draft: CardDraft,
    ) -> Result<card::Model, AppError> {
        let chain = self.resolver.list(requester, list_id).await?;
        self.ensure_capacity(chain.board.id).await?;

        let order = self.assigner.resolve(chain.list.id, draft.order).await?;
        let card = self
            .cards
            .create_card(NewCard {
                list_id: chain.list.id,
                title: draft.title,
                description: draft.description,
                labels: labels_json(draft.labels),
                due_date: draft.due_date,
                checklist: checklist_json(draft.checklist)?,
                order,
            })
            .await?;
        tracing::info!(card_id = %card.id, %list_id, order, "card created");
        Ok(card)
    }

    pub async fn update(
        &self,
        requester: Uuid,
        card_id: Uuid,
        patch: CardPatch,
    ) -> Result<card::Model, AppError> {
        let chain = self.resolver.card(requester, card_id).await?;
        let checklist = patch.checklist.map(checklist_json).transpose()?;
        let labels = patch.labels.map(labels_json);

        let updated = self
            .cards
            .update_model(chain.card, move |active| {
                if let Some(title) = patch.title {
                    active.title = Set(title);
                }
                if let Some(description) = patch.description {
                    active.description = Set(description);
                }
                if let Some(labels) = labels {
                    active.labels = Set(labels);
                }
                if let Some(due_date) = patch.due_date {
                    active.due_date = Set(due_date);
                }
                if let Some(checklist) = checklist {
                    active.checklist = Set(checklist);
                }
                if let Some(order) = patch.order {
                    active.order = Set(order);
                }
            })
            .await?;
        tracing::info!(%card_id, "card updated");
        Ok(updated)
    }

    pub async fn delete(&self, requester: Uuid, card_id: Uuid) -> Result<(), AppError> {
        let chain = self.resolver.card(requester, card_id).await?;
        self.cards.delete(chain.card.id).await?;
        tracing::info!(%card_id, "card deleted");
        Ok(())
    }

    pub async fn reorder(
        &self,
        requester: Uuid,
        list_id: Uuid,
        orders: &HashMap<Uuid, i64>,
    ) -> Result<usize, AppError> {
        let chain = self.resolver.list(requester, list_id).await?;
        let applied = self.assigner.reorder(chain.list.id, orders).await?;
        tracing::info!(%list_id, requested = orders.len(), applied, "cards reordered");
        Ok(applied)
    }

    /// Both the card's current chain and the target list's chain must belong
    /// to the requester. Neither list is renumbered.
    pub async fn move_card(
        &self,
        requester: Uuid,
        card_id: Uuid,
        target_list_id: Uuid,
        new_order: i64,
    ) -> Result<card::Model, AppError> {
        let source = self.resolver.card(requester, card_id).await?;
        let target = self.resolver.list(requester, target_list_id).await?;

        if source.board.id != target.board.id {
            self.ensure_capacity(target.board.id).await?;
        }

        let from_list = source.list.id;
        let moved = self
            .cards
            .move_to(source.card, target.list.id, new_order)
            .await?;
        tracing::info!(%card_id, %from_list, to_list = %target_list_id, new_order, "card moved");
        Ok(moved)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use uuid::Uuid;

    use super::{ChecklistItem, checklist_json, checklist_of, labels_json, labels_of};
    use crate::db::entities::card;

    #[test]
    fn labels_are_deduplicated_in_first_seen_order() {
        let labels = labels_json(vec![
            "red".to_string(),
            "blue".to_string(),
            "red".to_string(),
        ]);
        assert_eq!(labels, json!(["red", "blue"]));
    }

    #[test]
    fn checklist_items_without_id_get_one() {
        let encoded = checklist_json(vec![
            ChecklistItem {
                id: "keep".to_string(),
                text: "Write README".to_string(),
                completed: true,
            },
            ChecklistItem {
                id: String::new(),
                text: "Write API docs".to_string(),
                completed: false,
            },
        ])
        .expect("checklist should encode");

        let items: Vec<ChecklistItem> =
            serde_json::from_value(encoded).expect("checklist should decode");
        assert_eq!(items[0].id, "keep");
        assert!(!items[1].id.is_empty());
        assert_eq!(items[1].text, "Write API docs");
    }

    #[test]
    fn malformed_stored_columns_read_as_empty() {
        let now = Utc::now().fixed_offset();
        let card = card::Model {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            title: "Legacy".to_string(),
            description: None,
            labels: json!({"not": "a list"}),
            due_date: None,
            checklist: json!([{"id": "a", "text": "Keep", "completed": false}, 7]),
            order: 0,
            list_id: Uuid::new_v4(),
        };

        assert!(labels_of(&card).is_empty());
        assert!(checklist_of(&card).is_empty());
    }
}
