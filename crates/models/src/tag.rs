use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validate::required_text;
use crate::{item, item_tag, store};

pub const NAME_MAX_LEN: usize = 80;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tag")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub store_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Store,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Store => Entity::belongs_to(store::Entity)
                .from(Column::StoreId)
                .to(store::Column::Id)
                .into(),
        }
    }
}

impl Related<store::Entity> for Entity {
    fn to() -> RelationDef { Relation::Store.def() }
}

impl Related<item::Entity> for Entity {
    fn to() -> RelationDef { item_tag::Relation::Item.def() }
    fn via() -> Option<RelationDef> { Some(item_tag::Relation::Tag.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<String, ModelError> {
    required_text("tag name", name, NAME_MAX_LEN)
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, store_id: Option<Uuid>) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(validate_name(name)?),
        store_id: Set(store_id),
    };
    Ok(am.insert(db).await?)
}
