//! Repository trait for item storage.

use async_trait::async_trait;

use crate::models::{Item, ItemId, ItemPayload};

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

/// Owner of the item collection and of identity assignment.
///
/// Implementations keep items in creation order and never reuse an identity, even
/// after the item holding it has been deleted.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to be shared across handlers.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All items, oldest first.
    async fn list_items(&self) -> RepositoryResult<Vec<Item>>;

    /// Fetch one item.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no item has this identity
    async fn get_item(&self, id: ItemId) -> RepositoryResult<Item>;

    /// Store a new item, assigning its identity and creation time.
    async fn create_item(&self, candidate: ItemPayload) -> RepositoryResult<Item>;

    /// Replace the client fields of an existing item.
    ///
    /// The identity, creation time and position of the item are kept.
    ///
    /// # Returns
    /// * `Ok(Item)` - The item as now stored
    /// * `Err(RepositoryError::NotFound)` - If no item has this identity
    async fn update_item(&self, id: ItemId, replacement: ItemPayload) -> RepositoryResult<Item>;

    /// Remove an item, returning it.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no item has this identity
    async fn delete_item(&self, id: ItemId) -> RepositoryResult<Item>;
}
