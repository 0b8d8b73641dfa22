use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use models::errors::ModelError;
use models::{item, item_tag, store, tag};

use crate::catalog::domain::{ItemPatch, ItemView, NewItem, PlainItem, PlainStore, PlainTag, StoreView, TagView, UnlinkOutcome};
use crate::catalog::repository::{CatalogRepository, MSG_NOT_LINKED, MSG_STILL_LINKED, MSG_UNLINKED};
use crate::errors::ServiceError;

pub struct SeaOrmCatalogRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

/// Model errors with a caller-specific message for unique violations.
fn model_err(e: ModelError, conflict: &str) -> ServiceError {
    match e {
        ModelError::Validation(msg) => ServiceError::Validation(msg),
        ModelError::Db(db) => ServiceError::from_db(db, conflict),
    }
}

async fn find_store<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<store::Model, ServiceError> {
    store::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("store"))
}

async fn find_item<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<item::Model, ServiceError> {
    item::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("item"))
}

async fn find_tag<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<tag::Model, ServiceError> {
    tag::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("tag"))
}

async fn store_view<C: ConnectionTrait>(db: &C, s: store::Model) -> Result<StoreView, ServiceError> {
    let items = s.find_related(item::Entity).order_by_asc(item::Column::Name).all(db).await?;
    let tags = s.find_related(tag::Entity).order_by_asc(tag::Column::Name).all(db).await?;
    Ok(StoreView {
        id: s.id,
        name: s.name,
        items: items.into_iter().map(PlainItem::from).collect(),
        tags: tags.into_iter().map(PlainTag::from).collect(),
    })
}

async fn item_view<C: ConnectionTrait>(db: &C, i: item::Model) -> Result<ItemView, ServiceError> {
    let owner = i.find_related(store::Entity).one(db).await?;
    let tags = i.find_related(tag::Entity).order_by_asc(tag::Column::Name).all(db).await?;
    Ok(ItemView {
        id: i.id,
        name: i.name,
        description: i.description,
        price: i.price,
        store_id: i.store_id,
        store: owner.map(PlainStore::from),
        tags: tags.into_iter().map(PlainTag::from).collect(),
    })
}

async fn tag_view<C: ConnectionTrait>(db: &C, t: tag::Model) -> Result<TagView, ServiceError> {
    let owner = match t.store_id {
        Some(_) => t.find_related(store::Entity).one(db).await?,
        None => None,
    };
    let items = t.find_related(item::Entity).order_by_asc(item::Column::Name).all(db).await?;
    Ok(TagView {
        id: t.id,
        name: t.name,
        store_id: t.store_id,
        store: owner.map(PlainStore::from),
        items: items.into_iter().map(PlainItem::from).collect(),
    })
}

#[async_trait::async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn list_stores(&self) -> Result<Vec<StoreView>, ServiceError> {
        let stores = store::Entity::find().order_by_asc(store::Column::Name).all(&self.db).await?;
        let mut out = Vec::with_capacity(stores.len());
        for s in stores {
            out.push(store_view(&self.db, s).await?);
        }
        Ok(out)
    }

    async fn get_store(&self, id: Uuid) -> Result<StoreView, ServiceError> {
        let s = find_store(&self.db, id).await?;
        store_view(&self.db, s).await
    }

    async fn create_store(&self, name: &str) -> Result<StoreView, ServiceError> {
        let txn = self.db.begin().await?;
        let s = store::create(&txn, name)
            .await
            .map_err(|e| model_err(e, "A store with that name already exists"))?;
        txn.commit().await?;
        Ok(StoreView { id: s.id, name: s.name, items: vec![], tags: vec![] })
    }

    async fn delete_store(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        let s = find_store(&txn, id).await?;
        let item_ids: Vec<Uuid> = s.find_related(item::Entity).all(&txn).await?.into_iter().map(|i| i.id).collect();
        let tag_ids: Vec<Uuid> = s.find_related(tag::Entity).all(&txn).await?.into_iter().map(|t| t.id).collect();

        if !item_ids.is_empty() || !tag_ids.is_empty() {
            let links = item_tag::Entity::delete_many()
                .filter(
                    Condition::any()
                        .add(item_tag::Column::ItemId.is_in(item_ids.clone()))
                        .add(item_tag::Column::TagId.is_in(tag_ids.clone())),
                )
                .exec(&txn)
                .await?;
            debug!(store_id = %id, links = links.rows_affected, "store links removed");
        }
        item::Entity::delete_many().filter(item::Column::StoreId.eq(id)).exec(&txn).await?;
        tag::Entity::delete_many().filter(tag::Column::StoreId.eq(id)).exec(&txn).await?;
        s.delete(&txn).await?;
        txn.commit().await?;
        debug!(store_id = %id, items = item_ids.len(), tags = tag_ids.len(), "store cascade deleted");
        Ok(())
    }

    async fn list_items(&self) -> Result<Vec<ItemView>, ServiceError> {
        let items = item::Entity::find().order_by_asc(item::Column::Name).all(&self.db).await?;
        let mut out = Vec::with_capacity(items.len());
        for i in items {
            out.push(item_view(&self.db, i).await?);
        }
        Ok(out)
    }

    async fn get_item(&self, id: Uuid) -> Result<ItemView, ServiceError> {
        let i = find_item(&self.db, id).await?;
        item_view(&self.db, i).await
    }

    async fn create_item(&self, id: Uuid, input: NewItem) -> Result<ItemView, ServiceError> {
        let txn = self.db.begin().await?;
        find_store(&txn, input.store_id).await?;
        let created = item::create(&txn, id, &input.name, input.description.as_deref(), input.price, input.store_id)
            .await
            .map_err(|e| model_err(e, "An item with that id already exists"))?;
        let view = item_view(&txn, created).await?;
        txn.commit().await?;
        Ok(view)
    }

    async fn update_item(&self, id: Uuid, patch: &ItemPatch) -> Result<Option<ItemView>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(existing) = item::Entity::find_by_id(id).one(&txn).await? else {
            return Ok(None);
        };
        let mut am: item::ActiveModel = existing.clone().into();
        if let Some(name) = &patch.name {
            am.name = Set(item::validate_name(name)?);
        }
        if let Some(price) = patch.price {
            am.price = Set(item::normalize_price(price)?);
        }
        if let Some(description) = &patch.description {
            am.description = Set(item::validate_description(Some(description))?);
        }
        let updated = if am.is_changed() { am.update(&txn).await? } else { existing };
        let view = item_view(&txn, updated).await?;
        txn.commit().await?;
        Ok(Some(view))
    }

    async fn delete_item(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        let i = find_item(&txn, id).await?;
        item_tag::Entity::delete_many().filter(item_tag::Column::ItemId.eq(id)).exec(&txn).await?;
        i.delete(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn list_tags_in_store(&self, store_id: Uuid) -> Result<Vec<PlainTag>, ServiceError> {
        let s = find_store(&self.db, store_id).await?;
        let tags = s.find_related(tag::Entity).order_by_asc(tag::Column::Name).all(&self.db).await?;
        Ok(tags.into_iter().map(PlainTag::from).collect())
    }

    async fn list_tags_for_item(&self, item_id: Uuid) -> Result<Vec<PlainTag>, ServiceError> {
        let i = find_item(&self.db, item_id).await?;
        let tags = i.find_related(tag::Entity).order_by_asc(tag::Column::Name).all(&self.db).await?;
        Ok(tags.into_iter().map(PlainTag::from).collect())
    }

    async fn get_tag(&self, id: Uuid) -> Result<TagView, ServiceError> {
        let t = find_tag(&self.db, id).await?;
        tag_view(&self.db, t).await
    }

    async fn create_tag(&self, store_id: Uuid, name: &str) -> Result<TagView, ServiceError> {
        let txn = self.db.begin().await?;
        let s = find_store(&txn, store_id).await?;
        let t = tag::create(&txn, name, Some(store_id))
            .await
            .map_err(|e| model_err(e, "A tag with that name already exists in this store"))?;
        txn.commit().await?;
        Ok(TagView { id: t.id, name: t.name, store_id: t.store_id, store: Some(s.into()), items: vec![] })
    }

    async fn delete_tag(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        let t = find_tag(&txn, id).await?;
        let linked = item_tag::Entity::find().filter(item_tag::Column::TagId.eq(id)).count(&txn).await?;
        if linked > 0 {
            return Err(ServiceError::InvalidState(MSG_STILL_LINKED.into()));
        }
        t.delete(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    async fn link_tag(&self, item_id: Uuid, tag_id: Uuid) -> Result<TagView, ServiceError> {
        const ALREADY_LINKED: &str = "Tag is already linked to this item";
        let txn = self.db.begin().await?;
        find_item(&txn, item_id).await?;
        let t = find_tag(&txn, tag_id).await?;
        if item_tag::find_link(&txn, item_id, tag_id).await?.is_some() {
            return Err(ServiceError::Conflict(ALREADY_LINKED.into()));
        }
        item_tag::link(&txn, item_id, tag_id).await.map_err(|e| model_err(e, ALREADY_LINKED))?;
        let view = tag_view(&txn, t).await?;
        txn.commit().await?;
        Ok(view)
    }

    async fn unlink_tag(&self, item_id: Uuid, tag_id: Uuid) -> Result<UnlinkOutcome, ServiceError> {
        let txn = self.db.begin().await?;
        let i = find_item(&txn, item_id).await?;
        let t = find_tag(&txn, tag_id).await?;
        if item_tag::unlink(&txn, item_id, tag_id).await? == 0 {
            return Err(ServiceError::InvalidState(MSG_NOT_LINKED.into()));
        }
        txn.commit().await?;
        Ok(UnlinkOutcome { message: MSG_UNLINKED.into(), item: i.into(), tag: t.into() })
    }
}
