//! Axum router wiring.
//!
//! `/` and every path without its own route go to the index page on any
//! method and are counted, so `POST /anything` behaves like `GET /`.

use axum::{
    routing::{any, get},
    Router,
};

use crate::{app_state::AppState, handlers, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(handlers::index))
        .route("/api/counter", get(handlers::api_counter))
        .route("/version", get(ops::version))
        .route("/api/version", get(ops::version))
        .route("/livez", get(ops::livez))
        .route("/api/livez", get(ops::livez))
        .route("/readyz", get(ops::readyz))
        .route("/api/readyz", get(ops::readyz))
        .route("/status", get(ops::status))
        .route("/api/status", get(ops::status))
        .route("/favicon.ico", get(ops::favicon))
        .route("/metrics", get(ops::metrics))
        .fallback(handlers::index)
        .with_state(state)
}
