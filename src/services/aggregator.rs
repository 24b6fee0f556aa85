use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    db::dao::{CardDao, DaoResult, ListDao},
    db::entities::{board, card, list},
    services::ordering::sort_siblings,
};

#[derive(Debug, Clone)]
pub struct ListWithCards {
    pub list: list::Model,
    pub cards: Vec<card::Model>,
}

/// Builds the nested list/card view of a board whose ownership has already
/// been checked.
#[derive(Clone)]
pub struct BoardAggregator {
    lists: ListDao,
    cards: CardDao,
}

impl BoardAggregator {
    pub fn new(lists: ListDao, cards: CardDao) -> Self {
        Self { lists, cards }
    }

    /// One query for the lists and one for all of their cards.
    pub async fn lists_with_cards(&self, board: &board::Model) -> DaoResult<Vec<ListWithCards>> {
        let lists = self.lists.find_by_board(board.id).await?;
        if lists.is_empty() {
            return Ok(Vec::new());
        }
        let list_ids = lists.iter().map(|list| list.id).collect();
        let cards = self.cards.find_by_lists(list_ids).await?;
        Ok(group_cards(lists, cards))
    }
}

/// Attaches each card to its list; cards whose list is not in `lists` are
/// dropped.
pub fn group_cards(mut lists: Vec<list::Model>, cards: Vec<card::Model>) -> Vec<ListWithCards> {
    sort_siblings(&mut lists);

    let mut by_list: HashMap<Uuid, Vec<card::Model>> = HashMap::new();
    for card in cards {
        by_list.entry(card.list_id).or_default().push(card);
    }

    lists
        .into_iter()
        .map(|list| {
            let mut cards = by_list.remove(&list.id).unwrap_or_default();
            sort_siblings(&mut cards);
            ListWithCards { list, cards }
        })
        .collect()
}
