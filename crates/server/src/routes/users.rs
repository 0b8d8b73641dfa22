use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;
use uuid::Uuid;

use common::types::MessageResponse;
use service::auth::domain::{AuthUser, LoginInput, RegisterInput};

use crate::errors::JsonApiError;
use crate::extract::{AccessClaims, ApiJson, ApiPath, RefreshClaims, AUTH_COOKIE};
use crate::state::ServerState;

#[derive(Serialize)]
pub struct LoginOutput {
    pub user_id: Uuid,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Serialize)]
pub struct RefreshOutput {
    pub access_token: String,
}

#[utoipa::path(
    post, path = "/register", tag = "users",
    request_body = crate::openapi::CredentialsRequest,
    responses((status = 201, body = crate::openapi::UserDoc), (status = 409, description = "Username taken"), (status = 422, description = "Invalid input"))
)]
pub async fn register(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<RegisterInput>,
) -> Result<(StatusCode, Json<AuthUser>), JsonApiError> {
    let user = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    post, path = "/login", tag = "users",
    request_body = crate::openapi::CredentialsRequest,
    responses((status = 200, body = crate::openapi::LoginDoc), (status = 401, description = "Invalid credentials"))
)]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    ApiJson(input): ApiJson<LoginInput>,
) -> Result<(CookieJar, Json<LoginOutput>), JsonApiError> {
    let session = state.auth.login(input).await?;
    let mut cookie = Cookie::new(AUTH_COOKIE, session.access_token.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(false);
    cookie.set_same_site(SameSite::Lax);
    let out = LoginOutput {
        user_id: session.user.id,
        access_token: session.access_token,
        refresh_token: session.refresh_token,
    };
    Ok((jar.add(cookie), Json(out)))
}

#[utoipa::path(
    post, path = "/refresh", tag = "users",
    security(("bearer" = [])),
    responses((status = 200, body = crate::openapi::RefreshDoc), (status = 401, description = "Refresh token required"))
)]
pub async fn refresh(
    State(state): State<ServerState>,
    RefreshClaims(claims): RefreshClaims,
) -> Result<Json<RefreshOutput>, JsonApiError> {
    let access_token = state.auth.refresh(&claims).await?;
    Ok(Json(RefreshOutput { access_token }))
}

#[utoipa::path(
    post, path = "/logout", tag = "users",
    security(("bearer" = [])),
    responses((status = 200, body = crate::openapi::MessageDoc), (status = 401, description = "Access token required"))
)]
pub async fn logout(
    State(state): State<ServerState>,
    jar: CookieJar,
    AccessClaims(claims): AccessClaims,
) -> Result<(CookieJar, Json<MessageResponse>), JsonApiError> {
    state.auth.logout(&claims).await?;
    let jar = jar.remove(Cookie::build(AUTH_COOKIE).path("/"));
    Ok((jar, Json(MessageResponse::new("Successfully logged out"))))
}

#[utoipa::path(
    get, path = "/user/{user_id}", tag = "users",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses((status = 200, body = crate::openapi::UserDoc), (status = 404, description = "Unknown user"))
)]
pub async fn get_user(State(state): State<ServerState>, ApiPath(user_id): ApiPath<Uuid>) -> Result<Json<AuthUser>, JsonApiError> {
    Ok(Json(state.auth.get_user(user_id).await?))
}

#[utoipa::path(
    delete, path = "/user/{user_id}", tag = "users",
    params(("user_id" = Uuid, Path, description = "User id")),
    security(("bearer" = [])),
    responses((status = 200, body = crate::openapi::MessageDoc), (status = 401, description = "Access token required"), (status = 404, description = "Unknown user"))
)]
pub async fn delete_user(
    State(state): State<ServerState>,
    AccessClaims(_claims): AccessClaims,
    ApiPath(user_id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, JsonApiError> {
    state.auth.delete_user(user_id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}
