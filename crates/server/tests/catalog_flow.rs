mod support;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;

use support::{app, call, login, send, str_field};

#[tokio::test]
async fn store_item_tag_walkthrough() -> anyhow::Result<()> {
    let app = app().await?;
    let session = login(&app, "walker").await?;
    let token = str_field(&session, "access_token").to_string();

    let store = call(&app, "POST", "/stores", None, Some(json!({"name": "Store A"}))).await?;
    assert_eq!(store.status, StatusCode::CREATED);
    let store_id = str_field(&store.body, "id").to_string();

    let dup = call(&app, "POST", "/stores", None, Some(json!({"name": "Store A"}))).await?;
    assert_eq!(dup.status, StatusCode::CONFLICT);
    assert_eq!(dup.body["error"], "conflict");

    let item = call(&app, "POST", "/items", Some(&token), Some(json!({"name": "Chair", "price": 10.5, "store_id": store_id}))).await?;
    assert_eq!(item.status, StatusCode::CREATED, "{}", item.body);
    let item_id = str_field(&item.body, "id").to_string();

    let got = call(&app, "GET", &format!("/items/{item_id}"), None, None).await?;
    assert_eq!(got.status, StatusCode::OK);
    assert_eq!(got.body["store"]["name"], "Store A");
    assert_eq!(got.body["price"], 10.5);

    let tag = call(&app, "POST", &format!("/stores/{store_id}/tags"), None, Some(json!({"name": "Furniture"}))).await?;
    assert_eq!(tag.status, StatusCode::CREATED);
    let tag_id = str_field(&tag.body, "id").to_string();

    let link = call(&app, "POST", &format!("/item/{item_id}/tags/{tag_id}"), None, None).await?;
    assert_eq!(link.status, StatusCode::CREATED);
    assert_eq!(link.body["items"][0]["id"], item_id.as_str());

    let blocked = call(&app, "DELETE", &format!("/tags/{tag_id}"), None, None).await?;
    assert_eq!(blocked.status, StatusCode::BAD_REQUEST);
    assert_eq!(blocked.body["message"], "Tag is still linked to an item");

    let unlink = call(&app, "DELETE", &format!("/item/{item_id}/tags/{tag_id}"), None, None).await?;
    assert_eq!(unlink.status, StatusCode::OK);
    assert_eq!(unlink.body["message"], "Tag unlinked from item");
    assert_eq!(unlink.body["tag"]["id"], tag_id.as_str());

    let deleted = call(&app, "DELETE", &format!("/tags/{tag_id}"), None, None).await?;
    assert_eq!(deleted.status, StatusCode::ACCEPTED);

    let gone = call(&app, "GET", &format!("/tags/{tag_id}"), None, None).await?;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["error"], "not_found");
    Ok(())
}

#[tokio::test]
async fn unlink_of_unlinked_tag_is_bad_request() -> anyhow::Result<()> {
    let app = app().await?;
    let session = login(&app, "unlinker").await?;
    let token = str_field(&session, "access_token").to_string();

    let store = call(&app, "POST", "/stores", None, Some(json!({"name": "S"}))).await?;
    let store_id = str_field(&store.body, "id").to_string();
    let item = call(&app, "POST", "/items", Some(&token), Some(json!({"name": "I", "price": 1, "store_id": store_id}))).await?;
    let item_id = str_field(&item.body, "id").to_string();
    let tag = call(&app, "POST", &format!("/stores/{store_id}/tags"), None, Some(json!({"name": "T"}))).await?;
    let tag_id = str_field(&tag.body, "id").to_string();

    let res = call(&app, "DELETE", &format!("/item/{item_id}/tags/{tag_id}"), None, None).await?;
    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.body["error"], "invalid_state");
    assert_eq!(res.body["message"], "Tag is not currently linked to this item");

    let tags = call(&app, "GET", &format!("/item/{item_id}/tags"), None, None).await?;
    assert_eq!(tags.status, StatusCode::OK);
    assert_eq!(tags.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn put_item_creates_then_updates() -> anyhow::Result<()> {
    let app = app().await?;
    let store = call(&app, "POST", "/stores", None, Some(json!({"name": "S"}))).await?;
    let store_id = str_field(&store.body, "id").to_string();
    let item_id = uuid::Uuid::new_v4();
    let uri = format!("/items/{item_id}");

    let incomplete = call(&app, "PUT", &uri, None, Some(json!({"price": 3.0}))).await?;
    assert_eq!(incomplete.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(incomplete.body["error"], "validation_error");

    let created = call(&app, "PUT", &uri, None, Some(json!({"name": "Lamp", "price": 3.0, "store_id": store_id}))).await?;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["id"], item_id.to_string());

    let updated = call(&app, "PUT", &uri, None, Some(json!({"price": 4.25}))).await?;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["price"], 4.25);
    assert_eq!(updated.body["name"], "Lamp");

    let deleted = call(&app, "DELETE", &uri, None, None).await?;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(call(&app, "GET", &uri, None, None).await?.status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn deleting_store_removes_its_items() -> anyhow::Result<()> {
    let app = app().await?;
    let store = call(&app, "POST", "/stores", None, Some(json!({"name": "Gone"}))).await?;
    let store_id = str_field(&store.body, "id").to_string();
    let item_id = uuid::Uuid::new_v4();
    let put = call(&app, "PUT", &format!("/items/{item_id}"), None, Some(json!({"name": "X", "price": 1.0, "store_id": store_id}))).await?;
    assert_eq!(put.status, StatusCode::CREATED);

    let del = call(&app, "DELETE", &format!("/stores/{store_id}"), None, None).await?;
    assert_eq!(del.status, StatusCode::OK);
    assert_eq!(call(&app, "GET", &format!("/items/{item_id}"), None, None).await?.status, StatusCode::NOT_FOUND);
    let stores = call(&app, "GET", "/stores", None, None).await?;
    assert_eq!(stores.body, json!([]));
    Ok(())
}

#[tokio::test]
async fn health_and_openapi_are_served() -> anyhow::Result<()> {
    let app = app().await?;
    let health = call(&app, "GET", "/health", None, None).await?;
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "ok");

    let doc = call(&app, "GET", "/api-docs/openapi.json", None, None).await?;
    assert_eq!(doc.status, StatusCode::OK);
    assert!(doc.body["paths"]["/stores/{store_id}"].is_object());
    Ok(())
}

#[tokio::test]
async fn malformed_requests_use_error_envelope() -> anyhow::Result<()> {
    let app = app().await?;

    let missing = call(&app, "POST", "/stores", None, Some(json!({}))).await?;
    assert_eq!(missing.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(missing.body["error"], "validation_error");
    assert!(missing.body["message"].as_str().is_some_and(|m| m.contains("name")), "{}", missing.body);

    let req = Request::builder()
        .method("POST")
        .uri("/stores")
        .header("content-type", "application/json")
        .body(Body::from("not json"))?;
    let garbled = send(&app, req).await?;
    assert_eq!(garbled.status, StatusCode::BAD_REQUEST);
    assert_eq!(garbled.body["error"], "bad_request");

    let bad_id = call(&app, "DELETE", "/stores/not-a-uuid", None, None).await?;
    assert_eq!(bad_id.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.body["error"], "bad_request");
    assert!(bad_id.body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn oversized_price_is_rejected() -> anyhow::Result<()> {
    let app = app().await?;
    let session = login(&app, "pricer").await?;
    let token = str_field(&session, "access_token").to_string();
    let store = call(&app, "POST", "/stores", None, Some(json!({"name": "Big"}))).await?;
    let store_id = str_field(&store.body, "id").to_string();

    let item = call(&app, "POST", "/items", Some(&token), Some(json!({"name": "Yacht", "price": 1.0e308, "store_id": store_id}))).await?;
    assert_eq!(item.status, StatusCode::UNPROCESSABLE_ENTITY, "{}", item.body);
    assert_eq!(item.body["error"], "validation_error");

    let items = call(&app, "GET", "/items", None, None).await?;
    assert_eq!(items.body.as_array().map(Vec::len), Some(0));
    Ok(())
}
