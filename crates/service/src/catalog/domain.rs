use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store without its collections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainStore {
    pub id: Uuid,
    pub name: String,
}

/// Item without its store or tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainItem {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}

/// Tag without its store or items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlainTag {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreView {
    pub id: Uuid,
    pub name: String,
    pub items: Vec<PlainItem>,
    pub tags: Vec<PlainTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub store_id: Uuid,
    pub store: Option<PlainStore>,
    pub tags: Vec<PlainTag>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagView {
    pub id: Uuid,
    pub name: String,
    pub store_id: Option<Uuid>,
    pub store: Option<PlainStore>,
    pub items: Vec<PlainItem>,
}

/// Input for a new item. The id is chosen by the caller of the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
    pub store_id: Uuid,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial item update. `store_id` is only consulted when the PUT creates the item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub store_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PutItemOutcome {
    Updated(ItemView),
    Created(ItemView),
}

impl PutItemOutcome {
    pub fn item(&self) -> &ItemView {
        match self {
            PutItemOutcome::Updated(v) | PutItemOutcome::Created(v) => v,
        }
    }

    pub fn is_created(&self) -> bool { matches!(self, PutItemOutcome::Created(_)) }
}

/// Result of removing a tag from an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlinkOutcome {
    pub message: String,
    pub item: PlainItem,
    pub tag: PlainTag,
}

impl From<models::store::Model> for PlainStore {
    fn from(m: models::store::Model) -> Self { Self { id: m.id, name: m.name } }
}

impl From<models::item::Model> for PlainItem {
    fn from(m: models::item::Model) -> Self {
        Self { id: m.id, name: m.name, description: m.description, price: m.price }
    }
}

impl From<models::tag::Model> for PlainTag {
    fn from(m: models::tag::Model) -> Self { Self { id: m.id, name: m.name } }
}
