use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use serde_json::Value;
use tower::ServiceExt;

use order_tracker_backend::{AppState, app, services::memory_store::InMemoryOrderStore};

/// Builds the full application router backed by the in-memory store,
/// so the suite runs without a MongoDB deployment.
pub fn test_app() -> Router {
    let state = AppState {
        store: Arc::new(InMemoryOrderStore::new()),
    };
    app(state, &front_dir())
}

fn front_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("front")
}

/// Sends one request through the router and returns status plus parsed
/// JSON body (Null when the body is empty or not JSON).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}
