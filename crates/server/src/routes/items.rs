use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use common::types::MessageResponse;
use service::catalog::domain::{ItemPatch, ItemView, NewItem};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, FreshAccessClaims};
use crate::state::ServerState;

#[utoipa::path(get, path = "/items", tag = "items", responses((status = 200, body = [crate::openapi::ItemDoc])))]
pub async fn list_items(State(state): State<ServerState>) -> Result<Json<Vec<ItemView>>, JsonApiError> {
    Ok(Json(state.catalog.list_items().await?))
}

#[utoipa::path(
    post, path = "/items", tag = "items",
    request_body = crate::openapi::ItemRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, body = crate::openapi::ItemDoc),
        (status = 401, description = "Missing, invalid or non-fresh token"),
        (status = 404, description = "Unknown store")
    )
)]
pub async fn create_item(
    State(state): State<ServerState>,
    FreshAccessClaims(_claims): FreshAccessClaims,
    ApiJson(input): ApiJson<NewItem>,
) -> Result<(StatusCode, Json<ItemView>), JsonApiError> {
    let item = state.catalog.create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

#[utoipa::path(
    get, path = "/items/{item_id}", tag = "items",
    params(("item_id" = Uuid, Path, description = "Item id")),
    responses((status = 200, body = crate::openapi::ItemDoc), (status = 404, description = "Unknown item"))
)]
pub async fn get_item(State(state): State<ServerState>, ApiPath(item_id): ApiPath<Uuid>) -> Result<Json<ItemView>, JsonApiError> {
    Ok(Json(state.catalog.get_item(item_id).await?))
}

#[utoipa::path(
    put, path = "/items/{item_id}", tag = "items",
    params(("item_id" = Uuid, Path, description = "Item id")),
    request_body = crate::openapi::ItemPatchRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ItemDoc),
        (status = 201, description = "Created under the given id", body = crate::openapi::ItemDoc),
        (status = 422, description = "Creation fields missing")
    )
)]
pub async fn put_item(
    State(state): State<ServerState>,
    ApiPath(item_id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<ItemPatch>,
) -> Result<(StatusCode, Json<ItemView>), JsonApiError> {
    let outcome = state.catalog.put_item(item_id, patch).await?;
    let status = if outcome.is_created() { StatusCode::CREATED } else { StatusCode::OK };
    Ok((status, Json(outcome.item().clone())))
}

#[utoipa::path(
    delete, path = "/items/{item_id}", tag = "items",
    params(("item_id" = Uuid, Path, description = "Item id")),
    responses((status = 200, body = crate::openapi::MessageDoc), (status = 404, description = "Unknown item"))
)]
pub async fn delete_item(State(state): State<ServerState>, ApiPath(item_id): ApiPath<Uuid>) -> Result<Json<MessageResponse>, JsonApiError> {
    state.catalog.delete_item(item_id).await?;
    Ok(Json(MessageResponse::new(format!("Item {item_id} deleted successfully"))))
}
