#![allow(dead_code)]

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use serde_json::{json, Value};
use tower::ServiceExt;

pub fn auth_config() -> configs::AuthConfig {
    configs::AuthConfig { jwt_secret: "test-secret".into(), ..Default::default() }
}

/// Router over a private in-memory database.
pub async fn app() -> anyhow::Result<Router> {
    let db = models::db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(server::startup::build_app(db, &auth_config()))
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn call(app: &Router, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> anyhow::Result<Reply> {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header("authorization", format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => req.header("content-type", "application/json").body(Body::from(serde_json::to_vec(&b)?))?,
        None => req.body(Body::empty())?,
    };
    send(app, req).await
}

pub async fn send(app: &Router, req: Request<Body>) -> anyhow::Result<Reply> {
    let resp = app.clone().oneshot(req).await?;
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok(Reply { status, headers, body })
}

/// Register `username` and log in; returns the login body.
pub async fn login(app: &Router, username: &str) -> anyhow::Result<Value> {
    let creds = json!({"username": username, "password": "Passw0rd!"});
    let reg = call(app, "POST", "/register", None, Some(creds.clone())).await?;
    assert_eq!(reg.status, StatusCode::CREATED, "register: {}", reg.body);
    let res = call(app, "POST", "/login", None, Some(creds)).await?;
    assert_eq!(res.status, StatusCode::OK, "login: {}", res.body);
    Ok(res.body)
}

pub fn str_field<'a>(v: &'a Value, key: &str) -> &'a str {
    v[key].as_str().unwrap_or_default()
}
