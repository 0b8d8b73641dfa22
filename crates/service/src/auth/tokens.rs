use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use super::domain::{Claims, TokenKind};
use super::errors::AuthError;

/// Why a token could not be accepted by [`TokenCodec::decode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeFailure {
    Invalid,
    Expired,
}

/// HS256 signer/verifier with the configured token lifetimes.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    access_ttl_secs: i64,
    refresh_ttl_secs: i64,
}

impl TokenCodec {
    pub fn new(secret: &str, access_ttl_secs: i64, refresh_ttl_secs: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry is checked in `decode` after the signature
        validation.validate_exp = false;
        validation.leeway = 0;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }

    /// Claims for a new token issued now.
    pub fn claims_for(&self, user_id: Uuid, kind: TokenKind, fresh: bool) -> Claims {
        let iat = Utc::now().timestamp();
        let ttl = match kind {
            TokenKind::Access => self.access_ttl_secs,
            TokenKind::Refresh => self.refresh_ttl_secs,
        };
        Claims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat,
            exp: iat + ttl,
            fresh: fresh && kind == TokenKind::Access,
            kind,
        }
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Verify the signature, then the expiry.
    pub fn decode(&self, token: &str) -> Result<Claims, DecodeFailure> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|_| DecodeFailure::Invalid)?;
        if data.claims.exp <= Utc::now().timestamp() {
            return Err(DecodeFailure::Expired);
        }
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips() {
        let codec = TokenCodec::new("secret", 60, 120);
        let claims = codec.claims_for(Uuid::new_v4(), TokenKind::Access, true);
        let token = codec.encode(&claims).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), claims);
    }

    #[test]
    fn refresh_tokens_are_never_fresh() {
        let codec = TokenCodec::new("secret", 60, 120);
        let claims = codec.claims_for(Uuid::new_v4(), TokenKind::Refresh, true);
        assert!(!claims.fresh);
        assert_eq!(claims.exp - claims.iat, 120);
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let a = TokenCodec::new("secret-a", 60, 120);
        let b = TokenCodec::new("secret-b", 60, 120);
        let token = a.encode(&a.claims_for(Uuid::new_v4(), TokenKind::Access, false)).unwrap();
        assert_eq!(b.decode(&token), Err(DecodeFailure::Invalid));
        assert_eq!(a.decode("not-a-jwt"), Err(DecodeFailure::Invalid));
    }

    #[test]
    fn past_expiry_is_expired() {
        let codec = TokenCodec::new("secret", 60, 120);
        let mut claims = codec.claims_for(Uuid::new_v4(), TokenKind::Access, false);
        claims.iat -= 600;
        claims.exp = claims.iat + 60;
        let token = codec.encode(&claims).unwrap();
        assert_eq!(codec.decode(&token), Err(DecodeFailure::Expired));
    }

    #[test]
    fn type_claim_is_serialized_as_type() {
        let codec = TokenCodec::new("secret", 60, 120);
        let claims = codec.claims_for(Uuid::new_v4(), TokenKind::Refresh, false);
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["type"], "refresh");
    }
}
