use sea_orm::{entity::prelude::*, sea_query::OnConflict, ConnectionTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "revoked_token")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub jti: String,
    /// Unix seconds at which the revoked token would have expired anyway.
    pub expires_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Record `jti` as revoked. Revoking twice is a no-op.
pub async fn insert_ignore<C: ConnectionTrait>(db: &C, jti: &str, expires_at: i64) -> Result<(), ModelError> {
    let am = ActiveModel {
        jti: Set(jti.to_string()),
        expires_at: Set(expires_at),
    };
    Entity::insert(am)
        .on_conflict(OnConflict::column(Column::Jti).do_nothing().to_owned())
        .exec_without_returning(db)
        .await?;
    Ok(())
}

pub async fn contains<C: ConnectionTrait>(db: &C, jti: &str) -> Result<bool, ModelError> {
    Ok(Entity::find_by_id(jti.to_string()).one(db).await?.is_some())
}

/// Drop rows whose tokens have expired; returns how many were removed.
pub async fn purge_expired<C: ConnectionTrait>(db: &C, now: i64) -> Result<u64, ModelError> {
    let res = Entity::delete_many()
        .filter(Column::ExpiresAt.lt(now))
        .exec(db)
        .await?;
    Ok(res.rows_affected)
}
