//! Counting endpoints: `/` (and every unmatched path) and `/api/counter`.
//!
//! A failed count is still HTTP 200; the body carries the `-1` sentinel.
//! Bodies end with a newline so command-line clients print cleanly.

use std::time::Instant;

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::Instrument;

use hitcount_core::wire_count;

use crate::app_state::AppState;
use crate::render::{self, IndexFormat};

pub async fn index(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let count = count_for_request(&state, &method, &uri, "index").await;

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());
    let format = IndexFormat::negotiate(user_agent);
    let extra = state.cfg().server.extra_text.as_deref();
    let body = match format {
        IndexFormat::PlainText => render::plain_text(state.hostname(), count, extra),
        IndexFormat::Html => render::html(state.hostname(), count, extra),
    };

    ([(header::CONTENT_TYPE, format.content_type())], body).into_response()
}

pub async fn api_counter(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Response {
    let count = count_for_request(&state, &method, &uri, "api_counter").await;
    let body = format!("{}\n", json!({ "counter": count }));
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

/// Run one count inside a request span and record it.
async fn count_for_request(state: &AppState, method: &Method, uri: &Uri, route: &'static str) -> i64 {
    let span = tracing::info_span!(
        "request",
        hostname = %state.hostname(),
        method = %method,
        path = %uri.path(),
    );

    async {
        let started = Instant::now();
        let res = state.counter().next_count().await;
        let metrics = state.metrics();
        metrics.count_duration.observe(started.elapsed());
        metrics.http_requests.inc(route);
        match &res {
            Ok(_) => metrics.counts.inc("ok"),
            Err(e) => {
                metrics.counts.inc("failed");
                metrics.count_errors.inc(e.client_code().as_str());
            }
        }

        let count = wire_count(&res);
        tracing::info!(counter = count, "{} {}", method, uri.path());
        count
    }
    .instrument(span)
    .await
}
