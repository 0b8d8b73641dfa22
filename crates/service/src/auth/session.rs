use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use super::domain::{Claims, TokenKind};
use super::errors::AuthError;
use super::revocation::RevocationStore;
use super::tokens::{DecodeFailure, TokenCodec};

/// Outcome of checking a presented token.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenStatus {
    Valid(Claims),
    Expired,
    Revoked,
    Invalid,
    Missing,
}

impl TokenStatus {
    pub fn into_claims(self) -> Result<Claims, AuthError> {
        match self {
            TokenStatus::Valid(c) => Ok(c),
            TokenStatus::Expired => Err(AuthError::TokenExpired),
            TokenStatus::Revoked => Err(AuthError::TokenRevoked),
            TokenStatus::Invalid => Err(AuthError::InvalidToken),
            TokenStatus::Missing => Err(AuthError::MissingToken),
        }
    }
}

/// Issues tokens and decides whether a presented token is still acceptable.
/// Owns the revocation set; revoked ids stay rejected until their token expires.
pub struct SessionManager {
    codec: TokenCodec,
    revoked: Arc<dyn RevocationStore>,
}

impl SessionManager {
    pub fn new(codec: TokenCodec, revoked: Arc<dyn RevocationStore>) -> Self { Self { codec, revoked } }

    pub fn from_config(cfg: &configs::AuthConfig, revoked: Arc<dyn RevocationStore>) -> Self {
        let codec = TokenCodec::new(&cfg.jwt_secret, cfg.access_token_ttl_secs, cfg.refresh_token_ttl_secs);
        Self::new(codec, revoked)
    }

    pub fn issue_token(&self, user_id: Uuid, kind: TokenKind, fresh: bool) -> Result<String, AuthError> {
        let claims = self.codec.claims_for(user_id, kind, fresh);
        debug!(user_id = %user_id, jti = %claims.jti, kind = ?kind, fresh = claims.fresh, "token_issued");
        self.codec.encode(&claims)
    }

    pub async fn revoke_token(&self, jti: &str, expires_at: i64) -> Result<(), AuthError> {
        self.revoked.revoke(jti, expires_at).await?;
        info!(jti = %jti, "token_revoked");
        Ok(())
    }

    /// Signature, then expiry, then revocation.
    pub async fn validate_token(&self, token: Option<&str>) -> Result<TokenStatus, AuthError> {
        let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(TokenStatus::Missing);
        };
        let claims = match self.codec.decode(token) {
            Ok(c) => c,
            Err(DecodeFailure::Invalid) => return Ok(TokenStatus::Invalid),
            Err(DecodeFailure::Expired) => return Ok(TokenStatus::Expired),
        };
        if self.revoked.is_revoked(&claims.jti).await? {
            return Ok(TokenStatus::Revoked);
        }
        Ok(TokenStatus::Valid(claims))
    }

    /// Accept a valid access token; with `require_fresh` it must also come from a password login.
    pub async fn authorize(&self, token: Option<&str>, require_fresh: bool) -> Result<Claims, AuthError> {
        let claims = self.validate_token(token).await?.into_claims()?;
        if claims.kind != TokenKind::Access {
            return Err(AuthError::InvalidToken);
        }
        if require_fresh && !claims.fresh {
            return Err(AuthError::FreshTokenRequired);
        }
        Ok(claims)
    }

    pub async fn authorize_refresh(&self, token: Option<&str>) -> Result<Claims, AuthError> {
        let claims = self.validate_token(token).await?.into_claims()?;
        if claims.kind != TokenKind::Refresh {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }
}
