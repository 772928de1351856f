// src/lib.rs

use std::{path::Path, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::services::order_store::OrderStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrderStore>,
}

pub mod entities {
    pub mod order;
}

pub mod services {
    pub mod memory_store;
    pub mod order_store;
}

pub mod models {
    pub mod order;
}

pub mod handlers {
    pub mod health;
    pub mod orders;
}

pub mod error;

/// Builds the application router: the order CRUD API, the health route,
/// and static hosting for the two frontend pages (everything else under
/// `front_dir` is served verbatim as a fallback).
pub fn app(state: AppState, front_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/api/orders",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        .route(
            "/api/orders/{id}",
            get(handlers::orders::get_order)
                .put(handlers::orders::update_order)
                .delete(handlers::orders::delete_order),
        )
        .route_service("/", ServeFile::new(front_dir.join("user.html")))
        .route_service("/admin", ServeFile::new(front_dir.join("admin.html")))
        .fallback_service(ServeDir::new(front_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
