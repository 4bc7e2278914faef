//! Axum router wiring.
//!
//! GET-only routes: other methods on a known path get 405, unknown paths 404
//! with a plain `not found` body.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let metrics_path = state.cfg().server.metrics_path.clone();
    Router::new()
        .route(&metrics_path, get(ops::metrics))
        .route("/healthz", get(ops::healthz))
        .fallback(ops::not_found)
        .with_state(state)
}
