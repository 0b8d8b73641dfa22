use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{AuthUser, UserRecord};
use super::errors::AuthError;

/// Repository abstraction for auth-related persistence.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError>;
    /// `Conflict` when the username is taken.
    async fn create_user(&self, username: &str, password_hash: String) -> Result<AuthUser, AuthError>;
    async fn get_user(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError>;
    /// Returns false when no user had this id.
    async fn delete_user(&self, id: Uuid) -> Result<bool, AuthError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockAuthRepository {
        users: Mutex<HashMap<String, UserRecord>>, // key: username
    }

    #[async_trait]
    impl AuthRepository for MockAuthRepository {
        async fn find_user_by_username(&self, username: &str) -> Result<Option<UserRecord>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.get(username).cloned())
        }

        async fn create_user(&self, username: &str, password_hash: String) -> Result<AuthUser, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.contains_key(username) {
                return Err(AuthError::Conflict);
            }
            let user = AuthUser { id: Uuid::new_v4(), username: username.to_string() };
            users.insert(username.to_string(), UserRecord { user: user.clone(), password_hash });
            Ok(user)
        }

        async fn get_user(&self, id: Uuid) -> Result<Option<AuthUser>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|r| r.user.id == id).map(|r| r.user.clone()))
        }

        async fn delete_user(&self, id: Uuid) -> Result<bool, AuthError> {
            let mut users = self.users.lock().unwrap();
            let before = users.len();
            users.retain(|_, r| r.user.id != id);
            Ok(users.len() != before)
        }
    }
}
