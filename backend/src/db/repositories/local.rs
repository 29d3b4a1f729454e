//! In-memory local repository implementation.
//!
//! Items live in an identity-keyed ordered map. Identities are handed out strictly
//! increasing and never reused, so key order is creation order and listing needs no
//! separate order-tracking sequence.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::db::repository::{ItemRepository, RepositoryError, RepositoryResult};
use crate::models::{Item, ItemId, ItemPayload};

/// In-memory local repository.
///
/// Cloning is cheap and clones share the same collection.
///
/// # Example
/// ```
/// use items_api::db::{ItemRepository, LocalRepository};
/// use items_api::models::ItemPayload;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = LocalRepository::new();
/// let item = repo.create_item(ItemPayload::new("A", 1.0)).await.unwrap();
/// assert_eq!(item.id.value(), 1);
/// assert_eq!(repo.list_items().await.unwrap().len(), 1);
/// # });
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    items: BTreeMap<ItemId, Item>,
    next_item_id: ItemId,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            next_item_id: ItemId(1),
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for LocalRepository {
    async fn list_items(&self) -> RepositoryResult<Vec<Item>> {
        let data = self.data.read();
        Ok(data.items.values().cloned().collect())
    }

    async fn get_item(&self, id: ItemId) -> RepositoryResult<Item> {
        let data = self.data.read();
        data.items
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::item_not_found("get_item", id))
    }

    async fn create_item(&self, candidate: ItemPayload) -> RepositoryResult<Item> {
        let mut data = self.data.write();
        let id = data.next_item_id;
        data.next_item_id = id.next();

        let item = Item::from_payload(id, Utc::now(), candidate);
        data.items.insert(id, item.clone());
        debug!(item_id = %id, "Created item");
        Ok(item)
    }

    async fn update_item(&self, id: ItemId, replacement: ItemPayload) -> RepositoryResult<Item> {
        let mut data = self.data.write();
        let existing = data
            .items
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::item_not_found("update_item", id))?;

        *existing = Item::from_payload(id, existing.created_at, replacement);
        debug!(item_id = %id, "Updated item");
        Ok(existing.clone())
    }

    async fn delete_item(&self, id: ItemId) -> RepositoryResult<Item> {
        let mut data = self.data.write();
        let removed = data
            .items
            .remove(&id)
            .ok_or_else(|| RepositoryError::item_not_found("delete_item", id))?;
        debug!(item_id = %id, "Deleted item");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(items: &[Item]) -> Vec<i64> {
        items.iter().map(|item| item.id.value()).collect()
    }

    #[tokio::test]
    async fn test_identities_start_at_one_and_increase() {
        let repo = LocalRepository::new();
        let a = repo.create_item(ItemPayload::new("A", 1.0)).await.unwrap();
        let b = repo.create_item(ItemPayload::new("B", 2.0)).await.unwrap();
        assert_eq!(a.id, ItemId(1));
        assert_eq!(b.id, ItemId(2));
    }

    #[tokio::test]
    async fn test_identities_not_reused_after_delete() {
        let repo = LocalRepository::new();
        let a = repo.create_item(ItemPayload::new("A", 1.0)).await.unwrap();
        repo.delete_item(a.id).await.unwrap();
        let b = repo.create_item(ItemPayload::new("B", 2.0)).await.unwrap();
        assert_eq!(b.id, ItemId(2));
    }

    #[tokio::test]
    async fn test_get_returns_created_item() {
        let repo = LocalRepository::new();
        let payload = ItemPayload::new("A", 1.5).with_description("first");
        let created = repo.create_item(payload.clone()).await.unwrap();
        let fetched = repo.get_item(created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.payload(), payload);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let repo = LocalRepository::new();
        let err = repo.get_item(ItemId(1)).await.unwrap_err();
        assert_eq!(err, RepositoryError::item_not_found("get_item", ItemId(1)));
    }

    #[tokio::test]
    async fn test_update_keeps_identity_timestamp_and_position() {
        let repo = LocalRepository::new();
        let a = repo.create_item(ItemPayload::new("A", 1.0)).await.unwrap();
        let b = repo.create_item(ItemPayload::new("B", 2.0)).await.unwrap();
        repo.create_item(ItemPayload::new("C", 3.0)).await.unwrap();

        let updated = repo
            .update_item(b.id, ItemPayload::new("B2", 3.0).with_description("new"))
            .await
            .unwrap();
        assert_eq!(updated.id, b.id);
        assert_eq!(updated.created_at, b.created_at);
        assert_eq!(updated.name, "B2");
        assert_eq!(updated.price, 3.0);
        assert_eq!(updated.description.as_deref(), Some("new"));

        let items = repo.list_items().await.unwrap();
        assert_eq!(ids(&items), vec![1, 2, 3]);
        assert_eq!(items[0], a);
        assert_eq!(items[1], updated);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_wholesale() {
        let repo = LocalRepository::new();
        let a = repo
            .create_item(ItemPayload::new("A", 1.0).with_description("desc"))
            .await
            .unwrap();
        let updated = repo.update_item(a.id, ItemPayload::new("A", 1.0)).await.unwrap();
        assert_eq!(updated.description, None);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = LocalRepository::new();
        let err = repo
            .update_item(ItemId(9), ItemPayload::new("X", 1.0))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(repo.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = LocalRepository::new();
        let a = repo.create_item(ItemPayload::new("A", 1.0)).await.unwrap();
        let removed = repo.delete_item(a.id).await.unwrap();
        assert_eq!(removed, a);
        assert!(repo.delete_item(a.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = LocalRepository::new();
        let other = repo.clone();
        repo.create_item(ItemPayload::new("A", 1.0)).await.unwrap();
        assert_eq!(ids(&other.list_items().await.unwrap()), vec![1]);
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_identities() {
        let repo = LocalRepository::new();
        let mut handles = Vec::new();
        for i in 0..32 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.create_item(ItemPayload::new(format!("item-{i}"), i as f64))
                    .await
                    .unwrap()
                    .id
            }));
        }
        let mut assigned = Vec::new();
        for handle in handles {
            assigned.push(handle.await.unwrap().value());
        }
        assigned.sort_unstable();
        assert_eq!(assigned, (1..=32).collect::<Vec<_>>());
        assert_eq!(ids(&repo.list_items().await.unwrap()), assigned);
    }
}
