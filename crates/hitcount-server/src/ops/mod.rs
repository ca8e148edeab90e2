//! Operational HTTP endpoints.
//!
//! - `/livez`   : liveness, always true once serving
//! - `/readyz`  : readiness, always true (the store is not probed)
//! - `/version` : build identifier
//! - `/status`  : hostname and process start time
//! - `/metrics` : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::app_state::AppState;

pub async fn livez(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics().http_requests.inc("livez");
    Json(json!({ "live": true }))
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics().http_requests.inc("readyz");
    Json(json!({ "ready": true }))
}

pub async fn version(State(state): State<AppState>) -> impl IntoResponse {
    state.metrics().http_requests.inc("version");
    Json(json!({ "version": crate::VERSION }))
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub hostname: String,
    pub run_timestamp_unix: i64,
    pub run_timestamp_rfc3339: String,
    pub run_timestamp_unixdate: String,
}

pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    state.metrics().http_requests.inc("status");
    let started = state.started();
    Json(StatusResponse {
        hostname: state.hostname().to_string(),
        run_timestamp_unix: started.unix(),
        run_timestamp_rfc3339: started.rfc3339(),
        run_timestamp_unixdate: started.unix_date(),
    })
}

pub async fn favicon() -> StatusCode {
    StatusCode::NOT_FOUND
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
        .into_response()
}
