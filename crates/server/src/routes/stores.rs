use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use common::types::MessageResponse;
use service::catalog::domain::StoreView;

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct StoreInput {
    pub name: String,
}

#[utoipa::path(get, path = "/stores", tag = "stores", responses((status = 200, body = [crate::openapi::StoreDoc])))]
pub async fn list_stores(State(state): State<ServerState>) -> Result<Json<Vec<StoreView>>, JsonApiError> {
    Ok(Json(state.catalog.list_stores().await?))
}

#[utoipa::path(
    post, path = "/stores", tag = "stores",
    request_body = crate::openapi::StoreRequest,
    responses((status = 201, body = crate::openapi::StoreDoc), (status = 409, description = "Name taken"), (status = 422, description = "Invalid name"))
)]
pub async fn create_store(
    State(state): State<ServerState>,
    ApiJson(input): ApiJson<StoreInput>,
) -> Result<(StatusCode, Json<StoreView>), JsonApiError> {
    let store = state.catalog.create_store(&input.name).await?;
    Ok((StatusCode::CREATED, Json(store)))
}

#[utoipa::path(
    get, path = "/stores/{store_id}", tag = "stores",
    params(("store_id" = Uuid, Path, description = "Store id")),
    responses((status = 200, body = crate::openapi::StoreDoc), (status = 404, description = "Unknown store"))
)]
pub async fn get_store(State(state): State<ServerState>, ApiPath(store_id): ApiPath<Uuid>) -> Result<Json<StoreView>, JsonApiError> {
    Ok(Json(state.catalog.get_store(store_id).await?))
}

#[utoipa::path(
    delete, path = "/stores/{store_id}", tag = "stores",
    params(("store_id" = Uuid, Path, description = "Store id")),
    responses((status = 200, body = crate::openapi::MessageDoc), (status = 404, description = "Unknown store"))
)]
pub async fn delete_store(State(state): State<ServerState>, ApiPath(store_id): ApiPath<Uuid>) -> Result<Json<MessageResponse>, JsonApiError> {
    state.catalog.delete_store(store_id).await?;
    Ok(Json(MessageResponse::new(format!("Store {store_id} deleted successfully"))))
}
