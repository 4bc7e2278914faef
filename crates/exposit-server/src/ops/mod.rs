//! Operational HTTP endpoints.
//!
//! - `<metrics_path>` : Prometheus text format (default `/metrics`)
//! - `/healthz`       : liveness
//! - anything else     : 404 `not found`

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use exposit_core::CONTENT_TYPE;

use crate::app_state::AppState;

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.scrape();
    tracing::debug!(bytes = body.len(), "metrics scraped");

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, CONTENT_TYPE)],
        body,
    )
        .into_response()
}

pub async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "metrics": state.registry().len(),
        })),
    )
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not found")
}
