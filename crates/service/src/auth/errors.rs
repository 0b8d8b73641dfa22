use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("A user with that username already exists")]
    Conflict,
    #[error("user not found")]
    NotFound,
    #[error("Invalid credentials.")]
    InvalidCredentials,
    #[error("Request does not contain an access token.")]
    MissingToken,
    #[error("Signature verification failed.")]
    InvalidToken,
    #[error("Token expired. Please log in again.")]
    TokenExpired,
    #[error("Token revoked.")]
    TokenRevoked,
    #[error("Fresh token required.")]
    FreshTokenRequired,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::NotFound => 1003,
            AuthError::InvalidCredentials => 1004,
            AuthError::MissingToken => 1005,
            AuthError::InvalidToken => 1006,
            AuthError::TokenExpired => 1007,
            AuthError::TokenRevoked => 1008,
            AuthError::FreshTokenRequired => 1009,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }

    /// Machine-readable `error` field of the HTTP error body.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Validation(_) => "validation_error",
            AuthError::Conflict => "conflict",
            AuthError::NotFound => "not_found",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::MissingToken => "authorization_required",
            AuthError::InvalidToken | AuthError::TokenExpired => "invalid_token",
            AuthError::TokenRevoked => "invalid_revoked",
            AuthError::FreshTokenRequired => "fresh_token_required",
            AuthError::HashError(_) | AuthError::TokenError(_) | AuthError::Repository(_) => "storage_error",
        }
    }

    /// True for failures that mean the caller is not authenticated.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidCredentials
                | AuthError::MissingToken
                | AuthError::InvalidToken
                | AuthError::TokenExpired
                | AuthError::TokenRevoked
                | AuthError::FreshTokenRequired
        )
    }
}
