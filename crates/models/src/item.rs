use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validate::required_text;
use crate::{item_tag, store, tag};

pub const NAME_MAX_LEN: usize = 80;
pub const DESCRIPTION_MAX_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "item")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub store_id: Uuid,
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

// item <-> tag goes through the item_tag join table
impl Related<tag::Entity> for Entity {
    fn to() -> RelationDef { item_tag::Relation::Tag.def() }
    fn via() -> Option<RelationDef> { Some(item_tag::Relation::Item.def().rev()) }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<String, ModelError> {
    required_text("item name", name, NAME_MAX_LEN)
}

/// Blank descriptions are stored as NULL.
pub fn validate_description(description: Option<&str>) -> Result<Option<String>, ModelError> {
    match description.map(str::trim) {
        None | Some("") => Ok(None),
        Some(d) if d.chars().count() > DESCRIPTION_MAX_LEN => Err(ModelError::Validation(format!(
            "item description longer than {DESCRIPTION_MAX_LEN} characters"
        ))),
        Some(d) => Ok(Some(d.to_string())),
    }
}

/// Prices are kept to two decimal places.
pub fn normalize_price(price: f64) -> Result<f64, ModelError> {
    if !price.is_finite() {
        return Err(ModelError::Validation("price must be a finite number".into()));
    }
    if price < 0.0 {
        return Err(ModelError::Validation("price must not be negative".into()));
    }
    let rounded = (price * 100.0).round() / 100.0;
    if !rounded.is_finite() {
        return Err(ModelError::Validation("price is too large".into()));
    }
    Ok(rounded)
}

/// Insert an item with a caller-chosen id. The store is not checked here; the
/// foreign key rejects unknown stores.
pub async fn create<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
    name: &str,
    description: Option<&str>,
    price: f64,
    store_id: Uuid,
) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Set(id),
        name: Set(validate_name(name)?),
        description: Set(validate_description(description)?),
        price: Set(normalize_price(price)?),
        store_id: Set(store_id),
    };
    Ok(am.insert(db).await?)
}
