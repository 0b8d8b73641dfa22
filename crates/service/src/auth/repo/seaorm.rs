use sea_orm::{DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::auth::domain::{AuthUser, UserRecord};
use crate::auth::errors::AuthError;
use crate::auth::repository::AuthRepository;
use models::errors::ModelError;

pub struct SeaOrmAuthRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAuthRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn to_user(u: &models::user::Model) -> AuthUser {
    AuthUser { id: u.id, username: u.username.clone() }
}

#[async_trait::async_trait]
impl AuthRepository for SeaOrmAuthRepository {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
        let res = models::user::find_by_username(&self.db, username)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.map(|u| UserRecord { user: to_user(&u), password_hash: u.password_hash }))
    }

    async fn create_user(&self, username: &str, password_hash: String) -> Result<AuthUser, AuthError> {
        match models::user::create(&self.db, username, password_hash).await {
            Ok(created) => Ok(to_user(&created)),
            Err(e) if e.is_unique_violation() => Err(AuthError::Conflict),
            Err(ModelError::Validation(msg)) => Err(AuthError::Validation(msg)),
            Err(e) => Err(AuthError::Repository(e.to_string())),
        }
    }

    async fn get_user(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
        let res = models::user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))?;
        Ok(res.as_ref().map(to_user))
    }

    async fn delete_user(&self, id: Uuid) -> Result<bool, AuthError> {
        models::user::hard_delete(&self.db, id)
            .await
            .map_err(|e| AuthError::Repository(e.to_string()))
    }
}
