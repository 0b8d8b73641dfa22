use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};
use uuid::Uuid;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct StoreRequest { pub name: String }

#[derive(ToSchema)]
pub struct TagRequest { pub name: String }

#[derive(ToSchema)]
pub struct ItemRequest {
    pub name: String,
    pub price: f64,
    pub store_id: Uuid,
    pub description: Option<String>,
}

/// All fields optional; `name`, `price` and `store_id` are required when the PUT creates the item.
#[derive(ToSchema)]
pub struct ItemPatchRequest {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
    pub store_id: Option<Uuid>,
}

#[derive(ToSchema)]
pub struct PlainStoreDoc { pub id: Uuid, pub name: String }

#[derive(ToSchema)]
pub struct PlainItemDoc { pub id: Uuid, pub name: String, pub description: Option<String>, pub price: f64 }

#[derive(ToSchema)]
pub struct PlainTagDoc { pub id: Uuid, pub name: String }

#[derive(ToSchema)]
pub struct StoreDoc {
    pub id: Uuid,
    pub name: String,
    pub items: Vec<PlainItemDoc>,
    pub tags: Vec<PlainTagDoc>,
}

#[derive(ToSchema)]
pub struct ItemDoc {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub store_id: Uuid,
    pub store: Option<PlainStoreDoc>,
    pub tags: Vec<PlainTagDoc>,
}

#[derive(ToSchema)]
pub struct TagDoc {
    pub id: Uuid,
    pub name: String,
    pub store_id: Option<Uuid>,
    pub store: Option<PlainStoreDoc>,
    pub items: Vec<PlainItemDoc>,
}

#[derive(ToSchema)]
pub struct UnlinkDoc { pub message: String, pub item: PlainItemDoc, pub tag: PlainTagDoc }

#[derive(ToSchema)]
pub struct CredentialsRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct UserDoc { pub id: Uuid, pub username: String }

#[derive(ToSchema)]
pub struct LoginDoc { pub user_id: Uuid, pub access_token: String, pub refresh_token: String }

#[derive(ToSchema)]
pub struct RefreshDoc { pub access_token: String }

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::stores::list_stores,
        crate::routes::stores::create_store,
        crate::routes::stores::get_store,
        crate::routes::stores::delete_store,
        crate::routes::items::list_items,
        crate::routes::items::create_item,
        crate::routes::items::get_item,
        crate::routes::items::put_item,
        crate::routes::items::delete_item,
        crate::routes::tags::list_tags_in_store,
        crate::routes::tags::create_tag,
        crate::routes::tags::list_tags_for_item,
        crate::routes::tags::link_tag,
        crate::routes::tags::unlink_tag,
        crate::routes::tags::get_tag,
        crate::routes::tags::delete_tag,
        crate::routes::users::register,
        crate::routes::users::login,
        crate::routes::users::refresh,
        crate::routes::users::logout,
        crate::routes::users::get_user,
        crate::routes::users::delete_user,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            StoreRequest,
            TagRequest,
            ItemRequest,
            ItemPatchRequest,
            PlainStoreDoc,
            PlainItemDoc,
            PlainTagDoc,
            StoreDoc,
            ItemDoc,
            TagDoc,
            UnlinkDoc,
            CredentialsRequest,
            UserDoc,
            LoginDoc,
            RefreshDoc,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "stores"),
        (name = "items"),
        (name = "tags"),
        (name = "users")
    )
)]
pub struct ApiDoc;
