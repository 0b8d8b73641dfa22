use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod items;
pub mod stores;
pub mod tags;
pub mod users;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service status", body = crate::openapi::HealthResponse)))]
pub async fn health(State(state): State<ServerState>) -> Json<Health> {
    match state.db.ping().await {
        Ok(()) => Json(Health { status: "ok" }),
        Err(e) => {
            warn!(error = %e, "database ping failed");
            Json(Health { status: "degraded" })
        }
    }
}

/// Build the full application router: catalog, user/session and documentation routes.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let catalog = Router::new()
        .route("/stores", get(stores::list_stores).post(stores::create_store))
        .route("/stores/:store_id", get(stores::get_store).delete(stores::delete_store))
        .route("/stores/:store_id/tags", get(tags::list_tags_in_store).post(tags::create_tag))
        .route("/items", get(items::list_items).post(items::create_item))
        .route("/items/:item_id", get(items::get_item).put(items::put_item).delete(items::delete_item))
        .route("/item/:item_id/tags", get(tags::list_tags_for_item))
        .route("/item/:item_id/tags/:tag_id", post(tags::link_tag).delete(tags::unlink_tag))
        .route("/tags/:tag_id", get(tags::get_tag).delete(tags::delete_tag));

    let users = Router::new()
        .route("/register", post(users::register))
        .route("/login", post(users::login))
        .route("/refresh", post(users::refresh))
        .route("/logout", post(users::logout))
        .route("/user/:user_id", get(users::get_user).delete(users::delete_user));

    Router::new()
        .route("/health", get(health))
        .merge(catalog)
        .merge(users)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
