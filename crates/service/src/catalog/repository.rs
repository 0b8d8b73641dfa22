use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{ItemPatch, ItemView, NewItem, PlainTag, StoreView, TagView, UnlinkOutcome};
use crate::errors::ServiceError;

pub const MSG_NOT_LINKED: &str = "Tag is not currently linked to this item";
pub const MSG_STILL_LINKED: &str = "Tag is still linked to an item";
pub const MSG_UNLINKED: &str = "Tag unlinked from item";

/// Persistence for the catalog. Implementations enforce the relationship rules
/// and run every write inside a single transaction.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn list_stores(&self) -> Result<Vec<StoreView>, ServiceError>;
    async fn get_store(&self, id: Uuid) -> Result<StoreView, ServiceError>;
    async fn create_store(&self, name: &str) -> Result<StoreView, ServiceError>;
    /// Removes the store with its items, its tags and every link touching them.
    async fn delete_store(&self, id: Uuid) -> Result<(), ServiceError>;

    async fn list_items(&self) -> Result<Vec<ItemView>, ServiceError>;
    async fn get_item(&self, id: Uuid) -> Result<ItemView, ServiceError>;
    async fn create_item(&self, id: Uuid, input: NewItem) -> Result<ItemView, ServiceError>;
    /// `Ok(None)` when no item has this id.
    async fn update_item(&self, id: Uuid, patch: &ItemPatch) -> Result<Option<ItemView>, ServiceError>;
    async fn delete_item(&self, id: Uuid) -> Result<(), ServiceError>;

    async fn list_tags_in_store(&self, store_id: Uuid) -> Result<Vec<PlainTag>, ServiceError>;
    async fn list_tags_for_item(&self, item_id: Uuid) -> Result<Vec<PlainTag>, ServiceError>;
    async fn get_tag(&self, id: Uuid) -> Result<TagView, ServiceError>;
    async fn create_tag(&self, store_id: Uuid, name: &str) -> Result<TagView, ServiceError>;
    /// Fails with `InvalidState` while any item still carries the tag.
    async fn delete_tag(&self, id: Uuid) -> Result<(), ServiceError>;

    async fn link_tag(&self, item_id: Uuid, tag_id: Uuid) -> Result<TagView, ServiceError>;
    async fn unlink_tag(&self, item_id: Uuid, tag_id: Uuid) -> Result<UnlinkOutcome, ServiceError>;
}
