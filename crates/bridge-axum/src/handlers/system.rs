//! Health, index and favicon endpoints.

use axum::Json;
use axum::response::Html;
use serde_json::{Value, json};

/// `GET /health`
pub async fn health() -> Json<Value> {
    Json(json!({ "ok": true }))
}

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(concat!(
        "<!doctype html><title>speak-bridge</title>",
        "<h1>speak-bridge</h1>",
        "<p>Latest segment: <a href=\"/api/stream/latest\">/api/stream/latest</a></p>",
        "<p>Latest frame: <a href=\"/api/stream/frame/latest\">/api/stream/frame/latest</a></p>",
    ))
}

/// `GET /favicon.ico`
///
/// Empty body so browsers stop logging 404s.
pub async fn favicon() -> &'static str {
    ""
}
