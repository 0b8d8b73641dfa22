use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use sea_orm::DatabaseConnection;
use tracing::debug;

use super::errors::AuthError;

/// Set of revoked token ids. `expires_at` lets a backend forget entries once
/// the token would be rejected as expired anyway.
#[async_trait]
pub trait RevocationStore: Send + Sync {
    async fn revoke(&self, jti: &str, expires_at: i64) -> Result<(), AuthError>;
    async fn is_revoked(&self, jti: &str) -> Result<bool, AuthError>;
}

/// Process-lifetime blocklist.
#[derive(Default)]
pub struct InMemoryRevocationList {
    entries: DashMap<String, i64>,
}

impl InMemoryRevocationList {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationList {
    async fn revoke(&self, jti: &str, expires_at: i64) -> Result<(), AuthError> {
        let now = Utc::now().timestamp();
        self.entries.retain(|_, exp| *exp > now);
        self.entries.insert(jti.to_string(), expires_at);
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, AuthError> {
        Ok(self.entries.contains_key(jti))
    }
}

/// Blocklist kept in the `revoked_token` table.
pub struct SeaOrmRevocationList {
    db: DatabaseConnection,
}

impl SeaOrmRevocationList {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl RevocationStore for SeaOrmRevocationList {
    async fn revoke(&self, jti: &str, expires_at: i64) -> Result<(), AuthError> {
        models::revoked_token::insert_ignore(&self.db, jti, expires_at)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        let purged = models::revoked_token::purge_expired(&self.db, Utc::now().timestamp())
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        if purged > 0 {
            debug!(purged, "expired revocations purged");
        }
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, AuthError> {
        models::revoked_token::contains(&self.db, jti)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn memory_list_purges_expired_entries_on_write() -> Result<(), anyhow::Error> {
        let list = InMemoryRevocationList::new();
        let now = Utc::now().timestamp();
        list.revoke("old", now - 10).await?;
        list.revoke("live", now + 600).await?;
        assert_eq!(list.len(), 1);
        assert!(list.is_revoked("live").await?);
        assert!(!list.is_revoked("old").await?);
        Ok(())
    }

    #[tokio::test]
    async fn database_list_survives_new_instance() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let exp = Utc::now().timestamp() + 600;
        SeaOrmRevocationList::new(db.clone()).revoke("jti-a", exp).await?;
        SeaOrmRevocationList::new(db.clone()).revoke("jti-a", exp).await?;
        let fresh = SeaOrmRevocationList::new(db);
        assert!(fresh.is_revoked("jti-a").await?);
        assert!(!fresh.is_revoked("jti-b").await?);
        Ok(())
    }
}
