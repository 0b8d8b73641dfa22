use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use common::types::MessageResponse;
use service::catalog::domain::{PlainTag, TagView, UnlinkOutcome};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::ServerState;

#[derive(Debug, Deserialize)]
pub struct TagInput {
    pub name: String,
}

#[utoipa::path(
    get, path = "/stores/{store_id}/tags", tag = "tags",
    params(("store_id" = Uuid, Path, description = "Store id")),
    responses((status = 200, body = [crate::openapi::PlainTagDoc]), (status = 404, description = "Unknown store"))
)]
pub async fn list_tags_in_store(State(state): State<ServerState>, ApiPath(store_id): ApiPath<Uuid>) -> Result<Json<Vec<PlainTag>>, JsonApiError> {
    Ok(Json(state.catalog.list_tags_in_store(store_id).await?))
}

#[utoipa::path(
    post, path = "/stores/{store_id}/tags", tag = "tags",
    params(("store_id" = Uuid, Path, description = "Store id")),
    request_body = crate::openapi::TagRequest,
    responses((status = 201, body = crate::openapi::TagDoc), (status = 404, description = "Unknown store"), (status = 409, description = "Name taken in store"))
)]
pub async fn create_tag(
    State(state): State<ServerState>,
    ApiPath(store_id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<TagInput>,
) -> Result<(StatusCode, Json<TagView>), JsonApiError> {
    let tag = state.catalog.create_tag(store_id, &input.name).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

#[utoipa::path(
    get, path = "/item/{item_id}/tags", tag = "tags",
    params(("item_id" = Uuid, Path, description = "Item id")),
    responses((status = 200, body = [crate::openapi::PlainTagDoc]), (status = 404, description = "Unknown item"))
)]
pub async fn list_tags_for_item(State(state): State<ServerState>, ApiPath(item_id): ApiPath<Uuid>) -> Result<Json<Vec<PlainTag>>, JsonApiError> {
    Ok(Json(state.catalog.list_tags_for_item(item_id).await?))
}

#[utoipa::path(
    post, path = "/item/{item_id}/tags/{tag_id}", tag = "tags",
    params(("item_id" = Uuid, Path, description = "Item id"), ("tag_id" = Uuid, Path, description = "Tag id")),
    responses((status = 201, body = crate::openapi::TagDoc), (status = 404, description = "Unknown item or tag"), (status = 409, description = "Already linked"))
)]
pub async fn link_tag(
    State(state): State<ServerState>,
    ApiPath((item_id, tag_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<(StatusCode, Json<TagView>), JsonApiError> {
    let tag = state.catalog.link_tag(item_id, tag_id).await?;
    Ok((StatusCode::CREATED, Json(tag)))
}

#[utoipa::path(
    delete, path = "/item/{item_id}/tags/{tag_id}", tag = "tags",
    params(("item_id" = Uuid, Path, description = "Item id"), ("tag_id" = Uuid, Path, description = "Tag id")),
    responses((status = 200, body = crate::openapi::UnlinkDoc), (status = 400, description = "Not linked"), (status = 404, description = "Unknown item or tag"))
)]
pub async fn unlink_tag(
    State(state): State<ServerState>,
    ApiPath((item_id, tag_id)): ApiPath<(Uuid, Uuid)>,
) -> Result<Json<UnlinkOutcome>, JsonApiError> {
    Ok(Json(state.catalog.unlink_tag(item_id, tag_id).await?))
}

#[utoipa::path(
    get, path = "/tags/{tag_id}", tag = "tags",
    params(("tag_id" = Uuid, Path, description = "Tag id")),
    responses((status = 200, body = crate::openapi::TagDoc), (status = 404, description = "Unknown tag"))
)]
pub async fn get_tag(State(state): State<ServerState>, ApiPath(tag_id): ApiPath<Uuid>) -> Result<Json<TagView>, JsonApiError> {
    Ok(Json(state.catalog.get_tag(tag_id).await?))
}

#[utoipa::path(
    delete, path = "/tags/{tag_id}", tag = "tags",
    params(("tag_id" = Uuid, Path, description = "Tag id")),
    responses(
        (status = 202, description = "Deleted; no item carried the tag", body = crate::openapi::MessageDoc),
        (status = 400, description = "Tag is still linked to an item"),
        (status = 404, description = "Unknown tag")
    )
)]
pub async fn delete_tag(
    State(state): State<ServerState>,
    ApiPath(tag_id): ApiPath<Uuid>,
) -> Result<(StatusCode, Json<MessageResponse>), JsonApiError> {
    state.catalog.delete_tag(tag_id).await?;
    Ok((StatusCode::ACCEPTED, Json(MessageResponse::new(format!("Tag {tag_id} deleted successfully")))))
}
