use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{ItemPatch, ItemView, NewItem, PlainTag, PutItemOutcome, StoreView, TagView, UnlinkOutcome};
use super::repository::CatalogRepository;
use crate::errors::ServiceError;

/// Catalog business service independent of web framework
pub struct CatalogService<R: CatalogRepository> {
    repo: Arc<R>,
}

impl<R: CatalogRepository> CatalogService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list_stores(&self) -> Result<Vec<StoreView>, ServiceError> {
        self.repo.list_stores().await
    }

    pub async fn get_store(&self, id: Uuid) -> Result<StoreView, ServiceError> {
        self.repo.get_store(id).await
    }

    #[instrument(skip(self))]
    pub async fn create_store(&self, name: &str) -> Result<StoreView, ServiceError> {
        let name = models::store::validate_name(name)?;
        let store = self.repo.create_store(&name).await?;
        info!(store_id = %store.id, name = %store.name, "store_created");
        Ok(store)
    }

    #[instrument(skip(self))]
    pub async fn delete_store(&self, id: Uuid) -> Result<(), ServiceError> {
        self.repo.delete_store(id).await?;
        info!(store_id = %id, "store_deleted");
        Ok(())
    }

    pub async fn list_items(&self) -> Result<Vec<ItemView>, ServiceError> {
        self.repo.list_items().await
    }

    pub async fn get_item(&self, id: Uuid) -> Result<ItemView, ServiceError> {
        self.repo.get_item(id).await
    }

    #[instrument(skip(self, input), fields(store_id = %input.store_id, name = %input.name))]
    pub async fn create_item(&self, input: NewItem) -> Result<ItemView, ServiceError> {
        self.create_item_with_id(Uuid::new_v4(), input).await
    }

    /// Apply `patch` to an existing item, or create the item under `id` when
    /// there is none. Creation needs `name`, `price` and `store_id`.
    #[instrument(skip(self, patch))]
    pub async fn put_item(&self, id: Uuid, patch: ItemPatch) -> Result<PutItemOutcome, ServiceError> {
        if let Some(updated) = self.repo.update_item(id, &patch).await? {
            info!(item_id = %id, "item_updated");
            return Ok(PutItemOutcome::Updated(updated));
        }
        let input = match patch {
            ItemPatch { name: Some(name), price: Some(price), store_id: Some(store_id), description } => {
                NewItem { name, price, store_id, description }
            }
            _ => {
                return Err(ServiceError::Validation(
                    "name, price and store_id are required to create an item".into(),
                ))
            }
        };
        self.create_item_with_id(id, input).await.map(PutItemOutcome::Created)
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, id: Uuid) -> Result<(), ServiceError> {
        self.repo.delete_item(id).await?;
        info!(item_id = %id, "item_deleted");
        Ok(())
    }

    pub async fn list_tags_in_store(&self, store_id: Uuid) -> Result<Vec<PlainTag>, ServiceError> {
        self.repo.list_tags_in_store(store_id).await
    }

    pub async fn list_tags_for_item(&self, item_id: Uuid) -> Result<Vec<PlainTag>, ServiceError> {
        self.repo.list_tags_for_item(item_id).await
    }

    pub async fn get_tag(&self, id: Uuid) -> Result<TagView, ServiceError> {
        self.repo.get_tag(id).await
    }

    #[instrument(skip(self))]
    pub async fn create_tag(&self, store_id: Uuid, name: &str) -> Result<TagView, ServiceError> {
        let name = models::tag::validate_name(name)?;
        let tag = self.repo.create_tag(store_id, &name).await?;
        info!(tag_id = %tag.id, store_id = %store_id, name = %tag.name, "tag_created");
        Ok(tag)
    }

    #[instrument(skip(self))]
    pub async fn delete_tag(&self, id: Uuid) -> Result<(), ServiceError> {
        self.repo.delete_tag(id).await?;
        info!(tag_id = %id, "tag_deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn link_tag(&self, item_id: Uuid, tag_id: Uuid) -> Result<TagView, ServiceError> {
        let tag = self.repo.link_tag(item_id, tag_id).await?;
        info!(item_id = %item_id, tag_id = %tag_id, "tag_linked");
        Ok(tag)
    }

    #[instrument(skip(self))]
    pub async fn unlink_tag(&self, item_id: Uuid, tag_id: Uuid) -> Result<UnlinkOutcome, ServiceError> {
        let outcome = self.repo.unlink_tag(item_id, tag_id).await?;
        info!(item_id = %item_id, tag_id = %tag_id, "tag_unlinked");
        Ok(outcome)
    }

    async fn create_item_with_id(&self, id: Uuid, input: NewItem) -> Result<ItemView, ServiceError> {
        let input = NewItem {
            name: models::item::validate_name(&input.name)?,
            price: models::item::normalize_price(input.price)?,
            description: models::item::validate_description(input.description.as_deref())?,
            store_id: input.store_id,
        };
        let item = self.repo.create_item(id, input).await?;
        info!(item_id = %item.id, store_id = %item.store_id, "item_created");
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::repo::seaorm::SeaOrmCatalogRepository;
    use crate::catalog::repository::{MSG_NOT_LINKED, MSG_STILL_LINKED, MSG_UNLINKED};
    use crate::test_support::get_db;

    async fn service() -> Result<CatalogService<SeaOrmCatalogRepository>, anyhow::Error> {
        let db = get_db().await?;
        Ok(CatalogService::new(Arc::new(SeaOrmCatalogRepository::new(db))))
    }

    fn new_item(store_id: Uuid, name: &str, price: f64) -> NewItem {
        NewItem { name: name.into(), price, store_id, description: None }
    }

    #[tokio::test]
    async fn duplicate_store_name_conflicts_without_side_effects() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        svc.create_store("Store A").await?;
        let err = svc.create_store("Store A").await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)), "got {err:?}");
        assert_eq!(svc.list_stores().await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn blank_store_name_is_validation_error() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let err = svc.create_store("   ").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        Ok(())
    }

    #[tokio::test]
    async fn item_requires_existing_store() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let err = svc.create_item(new_item(Uuid::new_v4(), "Chair", 10.0)).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(svc.list_items().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn item_view_carries_store_and_rounded_price() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let store = svc.create_store("Store A").await?;
        let item = svc.create_item(new_item(store.id, "Chair", 10.499)).await?;
        assert_eq!(item.price, 10.5);
        assert_eq!(item.store.as_ref().map(|s| s.id), Some(store.id));

        let store = svc.get_store(store.id).await?;
        assert_eq!(store.items.len(), 1);
        assert_eq!(store.items[0].id, item.id);
        Ok(())
    }

    #[tokio::test]
    async fn linked_tag_cannot_be_deleted() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let store = svc.create_store("Store A").await?;
        let item = svc.create_item(new_item(store.id, "Chair", 10.5)).await?;
        let tag = svc.create_tag(store.id, "Furniture").await?;
        svc.link_tag(item.id, tag.id).await?;

        let err = svc.delete_tag(tag.id).await.unwrap_err();
        match err {
            ServiceError::InvalidState(msg) => assert_eq!(msg, MSG_STILL_LINKED),
            other => panic!("unexpected {other:?}"),
        }
        let tag = svc.get_tag(tag.id).await?;
        assert_eq!(tag.items.len(), 1);
        assert_eq!(svc.list_tags_for_item(item.id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn unlinked_tag_deletes_then_reads_not_found() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let store = svc.create_store("Store A").await?;
        let tag = svc.create_tag(store.id, "Spare").await?;
        svc.delete_tag(tag.id).await?;
        assert!(matches!(svc.get_tag(tag.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn link_then_unlink_restores_tag_set() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let store = svc.create_store("Store A").await?;
        let item = svc.create_item(new_item(store.id, "Chair", 10.5)).await?;
        let keep = svc.create_tag(store.id, "Keep").await?;
        svc.link_tag(item.id, keep.id).await?;
        let before = svc.list_tags_for_item(item.id).await?;

        let tag = svc.create_tag(store.id, "Temp").await?;
        let linked = svc.link_tag(item.id, tag.id).await?;
        assert_eq!(linked.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![item.id]);

        let outcome = svc.unlink_tag(item.id, tag.id).await?;
        assert_eq!(outcome.message, MSG_UNLINKED);
        assert_eq!(outcome.tag.id, tag.id);
        assert_eq!(svc.list_tags_for_item(item.id).await?, before);
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_link_conflicts() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let store = svc.create_store("Store A").await?;
        let item = svc.create_item(new_item(store.id, "Chair", 1.0)).await?;
        let tag = svc.create_tag(store.id, "T").await?;
        svc.link_tag(item.id, tag.id).await?;
        assert!(matches!(svc.link_tag(item.id, tag.id).await, Err(ServiceError::Conflict(_))));
        assert_eq!(svc.list_tags_for_item(item.id).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn unlink_of_unlinked_tag_is_invalid_state() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let store = svc.create_store("Store A").await?;
        let item = svc.create_item(new_item(store.id, "Chair", 1.0)).await?;
        let tag = svc.create_tag(store.id, "Never").await?;
        match svc.unlink_tag(item.id, tag.id).await {
            Err(ServiceError::InvalidState(msg)) => assert_eq!(msg, MSG_NOT_LINKED),
            other => panic!("unexpected {other:?}"),
        }
        assert!(svc.list_tags_for_item(item.id).await?.is_empty());
        assert!(matches!(svc.unlink_tag(Uuid::new_v4(), tag.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_tag_name_in_store_conflicts() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let a = svc.create_store("A").await?;
        let b = svc.create_store("B").await?;
        svc.create_tag(a.id, "sale").await?;
        svc.create_tag(b.id, "sale").await?;
        assert!(matches!(svc.create_tag(a.id, "sale").await, Err(ServiceError::Conflict(_))));
        assert!(matches!(svc.create_tag(Uuid::new_v4(), "x").await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn put_item_updates_or_creates() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let store = svc.create_store("Store A").await?;
        let other = svc.create_store("Store B").await?;
        let id = Uuid::new_v4();

        let missing = ItemPatch { name: Some("Desk".into()), ..Default::default() };
        assert!(matches!(svc.put_item(id, missing).await, Err(ServiceError::Validation(_))));

        let create = ItemPatch { name: Some("Desk".into()), price: Some(50.0), store_id: Some(store.id), description: None };
        let created = svc.put_item(id, create).await?;
        assert!(created.is_created());
        assert_eq!(created.item().id, id);

        let patch = ItemPatch { price: Some(45.0), store_id: Some(other.id), ..Default::default() };
        let updated = svc.put_item(id, patch).await?;
        assert!(!updated.is_created());
        assert_eq!(updated.item().price, 45.0);
        assert_eq!(updated.item().name, "Desk");
        assert_eq!(updated.item().store_id, store.id);

        let unknown_store = ItemPatch { name: Some("X".into()), price: Some(1.0), store_id: Some(Uuid::new_v4()), description: None };
        assert!(matches!(svc.put_item(Uuid::new_v4(), unknown_store).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_item_removes_its_links() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let store = svc.create_store("Store A").await?;
        let item = svc.create_item(new_item(store.id, "Chair", 1.0)).await?;
        let tag = svc.create_tag(store.id, "T").await?;
        svc.link_tag(item.id, tag.id).await?;

        svc.delete_item(item.id).await?;
        assert!(matches!(svc.get_item(item.id).await, Err(ServiceError::NotFound(_))));
        assert!(svc.get_tag(tag.id).await?.items.is_empty());
        svc.delete_tag(tag.id).await?;
        assert!(matches!(svc.delete_item(item.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_store_cascades_to_items_tags_and_links() -> Result<(), anyhow::Error> {
        let svc = service().await?;
        let store = svc.create_store("Doomed").await?;
        let keep = svc.create_store("Keep").await?;
        let item = svc.create_item(new_item(store.id, "Chair", 1.0)).await?;
        let tag = svc.create_tag(store.id, "T").await?;
        let kept_item = svc.create_item(new_item(keep.id, "Lamp", 2.0)).await?;
        svc.link_tag(item.id, tag.id).await?;
        // a link from another store's item to the doomed tag goes too
        svc.link_tag(kept_item.id, tag.id).await?;

        svc.delete_store(store.id).await?;
        assert!(matches!(svc.get_store(store.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.get_item(item.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.get_tag(tag.id).await, Err(ServiceError::NotFound(_))));
        assert!(svc.get_item(kept_item.id).await?.tags.is_empty());
        assert!(matches!(svc.delete_store(store.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
