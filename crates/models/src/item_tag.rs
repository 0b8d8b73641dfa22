//! Join rows between items and tags. Only the link/unlink operations write here.
use sea_orm::{entity::prelude::*, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::{item, tag};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item_tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub item_id: Uuid,
    pub tag_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Item,
    Tag,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Item => Entity::belongs_to(item::Entity)
                .from(Column::ItemId)
                .to(item::Column::Id)
                .into(),
            Relation::Tag => Entity::belongs_to(tag::Entity)
                .from(Column::TagId)
                .to(tag::Column::Id)
                .into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn find_link<C: ConnectionTrait>(db: &C, item_id: Uuid, tag_id: Uuid) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find()
        .filter(Column::ItemId.eq(item_id))
        .filter(Column::TagId.eq(tag_id))
        .one(db)
        .await?)
}

pub async fn link<C: ConnectionTrait>(db: &C, item_id: Uuid, tag_id: Uuid) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        item_id: Set(item_id),
        tag_id: Set(tag_id),
    };
    Ok(am.insert(db).await?)
}

/// Remove the (item, tag) association. Returns the number of rows removed.
pub async fn unlink<C: ConnectionTrait>(db: &C, item_id: Uuid, tag_id: Uuid) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::ItemId.eq(item_id))
        .filter(Column::TagId.eq(tag_id))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
