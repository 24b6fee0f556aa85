use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use crate::db::dao::{
    CardDao, DaoBase, DaoResult, ListDao, OrderedActiveModel, OrderedModel,
};
use crate::db::entities::{card, list};

/// Read/write access to one kind of ordered sibling set.
#[async_trait]
pub trait SiblingStore: Send + Sync {
    type Model: OrderedModel + Send + Sync;

    /// Every current child of `parent_id`, read fresh from the store.
    async fn siblings(&self, parent_id: Uuid) -> DaoResult<Vec<Self::Model>>;
    async fn sibling(&self, id: Uuid) -> DaoResult<Option<Self::Model>>;
    async fn set_order(&self, model: Self::Model, order: i64) -> DaoResult<Self::Model>;
}

#[async_trait]
impl SiblingStore for ListDao {
    type Model = list::Model;

    async fn siblings(&self, parent_id: Uuid) -> DaoResult<Vec<list::Model>> {
        self.find_by_board(parent_id).await
    }

    async fn sibling(&self, id: Uuid) -> DaoResult<Option<list::Model>> {
        self.find_optional(id).await
    }

    async fn set_order(&self, model: list::Model, order: i64) -> DaoResult<list::Model> {
        self.update_model(model, move |active| {
            OrderedActiveModel::set_order(active, order)
        })
        .await
    }
}

#[async_trait]
impl SiblingStore for CardDao {
    type Model = card::Model;

    async fn siblings(&self, parent_id: Uuid) -> DaoResult<Vec<card::Model>> {
        self.find_by_list(parent_id).await
    }

    async fn sibling(&self, id: Uuid) -> DaoResult<Option<card::Model>> {
        self.find_optional(id).await
    }

    async fn set_order(&self, model: card::Model, order: i64) -> DaoResult<card::Model> {
        self.update_model(model, move |active| {
            OrderedActiveModel::set_order(active, order)
        })
        .await
    }
}

/// Order for a new sibling appended after `siblings`: one past the current
/// maximum, or 0 for an empty set.
pub fn append_position<M: OrderedModel>(siblings: &[M]) -> i64 {
    siblings
        .iter()
        .map(OrderedModel::sort_order)
        .max()
        .map_or(0, |max| max.saturating_add(1))
}

/// Ascending by order; equal orders keep insertion order, then id.
pub fn sort_siblings<M: OrderedModel>(siblings: &mut [M]) {
    siblings.sort_by_key(|sibling| sibling.sort_key());
}

/// Assigns and rewrites order values within sibling sets.
///
/// No locks are held between the read and the write, so two concurrent
/// appends can compute the same value. Duplicates are tolerated and resolved
/// by the secondary sort key.
#[derive(Clone)]
pub struct OrderAssigner<S> {
    store: S,
}

impl<S: SiblingStore> OrderAssigner<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn next_order(&self, parent_id: Uuid) -> DaoResult<i64> {
        let siblings = self.store.siblings(parent_id).await?;
        Ok(append_position(&siblings))
    }

    /// Explicit orders are taken as-is, duplicates and gaps included.
    pub async fn resolve(&self, parent_id: Uuid, requested: Option<i64>) -> DaoResult<i64> {
        match requested {
            Some(order) => Ok(order),
            None => self.next_order(parent_id).await,
        }
    }

    /// Applies `orders` to the children of `parent_id` and returns how many
    /// entries were written. Ids that do not exist or belong to another parent
    /// are skipped; siblings not named in `orders` keep their value.
    pub async fn reorder(&self, parent_id: Uuid, orders: &HashMap<Uuid, i64>) -> DaoResult<usize> {
        let mut applied = 0;
        for (&id, &order) in orders {
            let Some(sibling) = self.store.sibling(id).await? else {
                tracing::debug!(%id, "reorder skipped unknown sibling");
                continue;
            };
            if sibling.parent_id() != parent_id {
                tracing::debug!(%id, %parent_id, "reorder skipped sibling of another parent");
                continue;
            }
            self.store.set_order(sibling, order).await?;
            applied += 1;
        }
        Ok(applied)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{Duration, FixedOffset, TimeZone};
    use sea_orm::entity::prelude::DateTimeWithTimeZone;
    use uuid::Uuid;

    use super::{OrderAssigner, SiblingStore, append_position, sort_siblings};
    use crate::db::dao::{DaoResult, OrderedModel};

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: Uuid,
        parent: Uuid,
        order: i64,
        created_at: DateTimeWithTimeZone,
    }

    impl OrderedModel for Item {
        fn sibling_id(&self) -> Uuid {
            self.id
        }

        fn parent_id(&self) -> Uuid {
            self.parent
        }

        fn sort_order(&self) -> i64 {
            self.order
        }

        fn inserted_at(&self) -> DateTimeWithTimeZone {
            self.created_at
        }
    }

    fn ts(offset_secs: i64) -> DateTimeWithTimeZone {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
            + Duration::seconds(offset_secs)
    }

    #[derive(Clone, Default)]
    struct MemoryStore {
        items: Arc<Mutex<Vec<Item>>>,
    }

    impl MemoryStore {
        fn insert(&self, parent: Uuid, order: i64) -> Uuid {
            let mut items = self.items.lock().expect("lock should not be poisoned");
            let id = Uuid::new_v4();
            let created_at = ts(items.len() as i64);
            items.push(Item {
                id,
                parent,
                order,
                created_at,
            });
            id
        }

        fn order_of(&self, id: Uuid) -> Option<i64> {
            self.items
                .lock()
                .expect("lock should not be poisoned")
                .iter()
                .find(|item| item.id == id)
                .map(|item| item.order)
        }
    }

    #[async_trait]
    impl SiblingStore for MemoryStore {
        type Model = Item;

        async fn siblings(&self, parent_id: Uuid) -> DaoResult<Vec<Item>> {
            Ok(self
                .items
                .lock()
                .expect("lock should not be poisoned")
                .iter()
                .filter(|item| item.parent == parent_id)
                .cloned()
                .collect())
        }

        async fn sibling(&self, id: Uuid) -> DaoResult<Option<Item>> {
            Ok(self
                .items
                .lock()
                .expect("lock should not be poisoned")
                .iter()
                .find(|item| item.id == id)
                .cloned())
        }

        async fn set_order(&self, mut model: Item, order: i64) -> DaoResult<Item> {
            let mut items = self.items.lock().expect("lock should not be poisoned");
            if let Some(stored) = items.iter_mut().find(|item| item.id == model.id) {
                stored.order = order;
            }
            model.order = order;
            Ok(model)
        }
    }

    #[test]
    fn append_position_is_zero_for_empty_set() {
        assert_eq!(append_position::<Item>(&[]), 0);
    }

    #[test]
    fn append_position_follows_maximum_not_count() {
        let parent = Uuid::new_v4();
        let items = [
            Item { id: Uuid::new_v4(), parent, order: 7, created_at: ts(0) },
            Item { id: Uuid::new_v4(), parent, order: 2, created_at: ts(1) },
        ];
        assert_eq!(append_position(&items), 8);
    }

    #[tokio::test]
    async fn appends_count_up_from_zero() {
        let store = MemoryStore::default();
        let assigner = OrderAssigner::new(store.clone());
        let parent = Uuid::new_v4();

        let mut assigned = Vec::new();
        for _ in 0..3 {
            let order = assigner.resolve(parent, None).await.expect("resolve");
            store.insert(parent, order);
            assigned.push(order);
        }
        assert_eq!(assigned, [0, 1, 2]);
    }

    #[tokio::test]
    async fn explicit_order_is_taken_verbatim() {
        let store = MemoryStore::default();
        let parent = Uuid::new_v4();
        store.insert(parent, 4);
        let assigner = OrderAssigner::new(store);

        assert_eq!(assigner.resolve(parent, Some(4)).await.expect("resolve"), 4);
        assert_eq!(assigner.resolve(parent, Some(40)).await.expect("resolve"), 40);
    }

    #[tokio::test]
    async fn sibling_sets_are_independent() {
        let store = MemoryStore::default();
        let left = Uuid::new_v4();
        let right = Uuid::new_v4();
        store.insert(left, 9);
        let assigner = OrderAssigner::new(store);

        assert_eq!(assigner.next_order(right).await.expect("next"), 0);
        assert_eq!(assigner.next_order(left).await.expect("next"), 10);
    }

    #[tokio::test]
    async fn concurrent_appends_may_share_a_value() {
        let store = MemoryStore::default();
        let parent = Uuid::new_v4();
        store.insert(parent, 0);
        store.insert(parent, 1);
        let assigner = OrderAssigner::new(store.clone());

        let (a, b) = tokio::join!(assigner.next_order(parent), assigner.next_order(parent));
        let (a, b) = (a.expect("first append"), b.expect("second append"));
        assert!(a >= 2 && b >= 2);

        store.insert(parent, a);
        store.insert(parent, b);
        let mut siblings = store.siblings(parent).await.expect("siblings");
        sort_siblings(&mut siblings);
        assert_eq!(siblings.len(), 4);
    }

    #[tokio::test]
    async fn reorder_skips_unknown_and_foreign_ids() {
        let store = MemoryStore::default();
        let parent = Uuid::new_v4();
        let other = Uuid::new_v4();
        let first = store.insert(parent, 0);
        let second = store.insert(parent, 1);
        let foreign = store.insert(other, 0);
        let assigner = OrderAssigner::new(store.clone());

        let orders = HashMap::from([(second, 0), (first, 1), (foreign, 9), (Uuid::new_v4(), 5)]);
        let applied = assigner.reorder(parent, &orders).await.expect("reorder");

        assert_eq!(applied, 2);
        assert_eq!(store.order_of(first), Some(1));
        assert_eq!(store.order_of(second), Some(0));
        assert_eq!(store.order_of(foreign), Some(0));
    }

    #[tokio::test]
    async fn reorder_with_only_unknown_ids_changes_nothing() {
        let store = MemoryStore::default();
        let parent = Uuid::new_v4();
        let existing = store.insert(parent, 3);
        let assigner = OrderAssigner::new(store.clone());

        let applied = assigner
            .reorder(parent, &HashMap::from([(Uuid::new_v4(), 5)]))
            .await
            .expect("reorder");

        assert_eq!(applied, 0);
        assert_eq!(store.order_of(existing), Some(3));
    }

    #[test]
    fn sort_breaks_ties_by_insertion_time() {
        let parent = Uuid::new_v4();
        let late = Item { id: Uuid::new_v4(), parent, order: 1, created_at: ts(10) };
        let early = Item { id: Uuid::new_v4(), parent, order: 1, created_at: ts(5) };
        let first = Item { id: Uuid::new_v4(), parent, order: 0, created_at: ts(20) };

        let mut items = vec![late.clone(), early.clone(), first.clone()];
        sort_siblings(&mut items);
        assert_eq!(items, [first, early, late]);
    }
}
