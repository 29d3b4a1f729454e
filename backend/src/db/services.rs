//! High-level item operations.
//!
//! Repository-agnostic functions used by the HTTP layer. They work with any
//! [`ItemRepository`] implementation, including trait objects.
//!
//! # Usage
//!
//! ```no_run
//! use items_api::db::{services, LocalRepository};
//! use items_api::models::ItemPayload;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     services::create_item(&repo, ItemPayload::new("Widget", 9.99)).await?;
//!
//!     let items = services::list_items(&repo).await?;
//!     println!("Found {} items", items.len());
//!     Ok(())
//! }
//! ```

use tracing::{debug, info};

use super::repository::{ItemRepository, RepositoryResult};
use crate::models::{Item, ItemId, ItemPayload};

// ==================== Item Operations ====================

/// List all items in creation order.
pub async fn list_items<R: ItemRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Item>> {
    let items = repo.list_items().await?;
    debug!(count = items.len(), "Listed items");
    Ok(items)
}

/// Fetch a single item.
pub async fn get_item<R: ItemRepository + ?Sized>(repo: &R, id: ItemId) -> RepositoryResult<Item> {
    repo.get_item(id).await
}

/// Store a validated payload as a new item.
pub async fn create_item<R: ItemRepository + ?Sized>(
    repo: &R,
    payload: ItemPayload,
) -> RepositoryResult<Item> {
    let item = repo.create_item(payload).await?;
    info!(item_id = %item.id, name = %item.name, "Item created");
    Ok(item)
}

/// Replace the client fields of an existing item.
pub async fn update_item<R: ItemRepository + ?Sized>(
    repo: &R,
    id: ItemId,
    payload: ItemPayload,
) -> RepositoryResult<Item> {
    let item = repo.update_item(id, payload).await?;
    info!(item_id = %item.id, "Item updated");
    Ok(item)
}

/// Delete an item, returning what was removed.
pub async fn delete_item<R: ItemRepository + ?Sized>(repo: &R, id: ItemId) -> RepositoryResult<Item> {
    let item = repo.delete_item(id).await?;
    info!(item_id = %id, "Item deleted");
    Ok(item)
}
