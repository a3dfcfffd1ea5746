#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use server::routes::{build_router, default_cors};
use server::state::AppState;
use service::storage::{memory::MemoryBackend, DocumentStore};
use service::Services;
use tower::ServiceExt;

pub const ADMIN: &str = "admin-token";
pub const BOT: &str = "Bearer bot-secret";

pub fn auth(admin: Option<&str>, bot: Option<&str>) -> configs::AuthConfig {
    configs::AuthConfig {
        admin_token: admin.map(str::to_string),
        bot_secret: bot.map(str::to_string),
        blog_salt: "integration-salt".to_string(),
    }
}

pub fn app_with(auth: configs::AuthConfig) -> Router {
    app_on(MemoryBackend::new(), auth)
}

/// Router over a backend the test keeps a handle to.
pub fn app_on(backend: Arc<MemoryBackend>, auth: configs::AuthConfig) -> Router {
    let store = DocumentStore::new(backend);
    build_router(AppState::new(Services::new(store, &auth)), default_cors())
}

pub fn app() -> Router {
    app_with(auth(Some(ADMIN), Some("bot-secret")))
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub raw: Vec<u8>,
    pub json: Value,
}

pub async fn send(app: &Router, method: Method, uri: &str, bearer: Option<&str>, body: Option<Value>) -> Reply {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(b) = bearer {
        req = req.header(header::AUTHORIZATION, b);
    }
    let req = match body {
        Some(v) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let raw = to_bytes(res.into_body(), usize::MAX).await.unwrap().to_vec();
    let json = serde_json::from_slice(&raw).unwrap_or(Value::Null);
    Reply { status, headers, raw, json }
}

pub async fn blog(app: &Router, action: &str, body: Value) -> Reply {
    send(app, Method::POST, &format!("/api/blog?action={action}"), None, Some(body)).await
}
