use std::sync::Arc;

use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use rand::rngs::OsRng;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{AuthSession, AuthUser, Claims, LoginInput, RegisterInput, TokenKind};
use super::errors::AuthError;
use super::repository::AuthRepository;
use super::session::SessionManager;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    sessions: Arc<SessionManager>,
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, sessions: Arc<SessionManager>) -> Self { Self { repo, sessions } }

    pub fn sessions(&self) -> &Arc<SessionManager> { &self.sessions }

    /// Register a new user with a hashed password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, SessionManager, repository::mock::MockAuthRepository};
    /// use service::auth::{domain::RegisterInput, revocation::InMemoryRevocationList, tokens::TokenCodec};
    /// use std::sync::Arc;
    /// let sessions = Arc::new(SessionManager::new(TokenCodec::new("secret", 900, 3600), Arc::new(InMemoryRevocationList::new())));
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), sessions);
    /// let input = RegisterInput { username: "alice".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.username, "alice");
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterInput) -> Result<AuthUser, AuthError> {
        let username = models::user::validate_username(&input.username)
            .map_err(|e| AuthError::Validation(e.to_string()))?;
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::Validation(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }
        if let Some(existing) = self.repo.find_user_by_username(&username).await? {
            debug!("user exists: {}", existing.user.username);
            return Err(AuthError::Conflict);
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(input.password.as_bytes(), &salt)
            .map_err(|e| AuthError::HashError(e.to_string()))?
            .to_string();

        let user = self.repo.create_user(&username, hash).await?;
        info!(user_id = %user.id, username = %user.username, "user_registered");
        Ok(user)
    }

    /// Verify the password and issue a fresh access token plus a refresh token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, SessionManager, repository::mock::MockAuthRepository};
    /// use service::auth::{domain::{LoginInput, RegisterInput}, revocation::InMemoryRevocationList, tokens::TokenCodec};
    /// use std::sync::Arc;
    /// let sessions = Arc::new(SessionManager::new(TokenCodec::new("secret", 900, 3600), Arc::new(InMemoryRevocationList::new())));
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), sessions.clone());
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { username: "bob".into(), password: "Passw0rd".into() }));
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: "bob".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(session.user.username, "bob");
    /// let claims = tokio_test::block_on(sessions.authorize(Some(&session.access_token), true)).unwrap();
    /// assert!(claims.fresh);
    /// ```
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let record = self.repo
            .find_user_by_username(input.username.trim())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let parsed = PasswordHash::new(&record.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(input.password.as_bytes(), &parsed).is_err() {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.sessions.issue_token(record.user.id, TokenKind::Access, true)?;
        let refresh_token = self.sessions.issue_token(record.user.id, TokenKind::Refresh, false)?;
        info!(user_id = %record.user.id, "user_logged_in");
        Ok(AuthSession { user: record.user, access_token, refresh_token })
    }

    /// New non-fresh access token for the holder of a valid refresh token.
    #[instrument(skip(self, refresh), fields(sub = %refresh.sub))]
    pub async fn refresh(&self, refresh: &Claims) -> Result<String, AuthError> {
        let user_id = refresh.user_id().ok_or(AuthError::InvalidToken)?;
        if self.repo.get_user(user_id).await?.is_none() {
            return Err(AuthError::InvalidToken);
        }
        self.sessions.issue_token(user_id, TokenKind::Access, false)
    }

    #[instrument(skip(self, claims), fields(sub = %claims.sub))]
    pub async fn logout(&self, claims: &Claims) -> Result<(), AuthError> {
        self.sessions.revoke_token(&claims.jti, claims.exp).await?;
        info!(sub = %claims.sub, "user_logged_out");
        Ok(())
    }

    pub async fn get_user(&self, id: Uuid) -> Result<AuthUser, AuthError> {
        self.repo.get_user(id).await?.ok_or(AuthError::NotFound)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> Result<(), AuthError> {
        if !self.repo.delete_user(id).await? {
            return Err(AuthError::NotFound);
        }
        info!(user_id = %id, "user_deleted");
        Ok(())
    }
}
