//! Request extractors.
//!
//! Token extractors read `Authorization: Bearer <jwt>` or, when that header is
//! absent, the `auth_token` cookie. `ApiJson` and `ApiPath` wrap axum's own
//! extractors so malformed bodies and ids are rejected with the JSON envelope.
use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::de::DeserializeOwned;
use service::auth::domain::Claims;
use tracing::warn;

use crate::errors::JsonApiError;
use crate::state::ServerState;

pub const AUTH_COOKIE: &str = "auth_token";

fn presented_token(parts: &Parts) -> Option<String> {
    if let Some(header) = parts.headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        let header = header.trim();
        // a value without the scheme is passed through and fails signature checks
        return Some(header.strip_prefix("Bearer ").unwrap_or(header).to_string());
    }
    CookieJar::from_headers(&parts.headers)
        .get(AUTH_COOKIE)
        .map(|c| c.value().to_string())
}

/// Any valid access token.
pub struct AccessClaims(pub Claims);

/// Access token minted directly by a password login.
pub struct FreshAccessClaims(pub Claims);

/// Valid refresh token.
pub struct RefreshClaims(pub Claims);

#[async_trait]
impl FromRequestParts<ServerState> for AccessClaims {
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let token = presented_token(parts);
        match state.sessions.authorize(token.as_deref(), false).await {
            Ok(claims) => Ok(Self(claims)),
            Err(e) => {
                warn!(path = %parts.uri.path(), error = %e, "access token rejected");
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<ServerState> for FreshAccessClaims {
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let token = presented_token(parts);
        match state.sessions.authorize(token.as_deref(), true).await {
            Ok(claims) => Ok(Self(claims)),
            Err(e) => {
                warn!(path = %parts.uri.path(), error = %e, "fresh access token rejected");
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl FromRequestParts<ServerState> for RefreshClaims {
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let token = presented_token(parts);
        match state.sessions.authorize_refresh(token.as_deref()).await {
            Ok(claims) => Ok(Self(claims)),
            Err(e) => {
                warn!(path = %parts.uri.path(), error = %e, "refresh token rejected");
                Err(e.into())
            }
        }
    }
}

/// JSON request body.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Path parameters.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}
