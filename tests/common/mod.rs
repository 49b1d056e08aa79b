#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use soccer_player_api::db::{self, SqlitePlayerStore};
use soccer_player_api::routes::{self, SharedStore};
use tower::ServiceExt;

pub const FRONTEND_ORIGIN: &str = "http://localhost:3000";

/// Fresh in-memory store. A single connection keeps every query on the same database.
pub async fn memory_store() -> SharedStore {
    let pool = db::connect("sqlite::memory:", 1).await.unwrap();
    db::init_schema(&pool).await.unwrap();
    Arc::new(SqlitePlayerStore::new(pool))
}

pub fn app(store: SharedStore) -> Router {
    routes::router(
        store,
        vec![
            HeaderValue::from_static(FRONTEND_ORIGIN),
            HeaderValue::from_static("http://localhost:3001"),
        ],
    )
}

pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn names(players: &Value) -> Vec<&str> {
    players
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect()
}
