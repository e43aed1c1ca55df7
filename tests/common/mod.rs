//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use users_api::api::{create_router, AppState};
use users_api::infra::Database;

/// Fresh in-memory SQLite database with the users table created.
///
/// A single pooled connection keeps every query on the same in-memory db.
pub async fn test_database() -> Database {
    Database::connect("sqlite::memory:", 1)
        .await
        .expect("in-memory database should open")
}

/// Router over a fresh database, without CORS.
pub async fn test_app() -> Router {
    let db = Arc::new(test_database().await);
    create_router(AppState::from_database(db), &[])
}

/// Send a request and decode the JSON body (`Value::Null` when empty or not JSON).
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}
