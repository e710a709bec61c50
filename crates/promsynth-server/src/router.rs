//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .route("/expected_metrics", get(ops::expected_metrics))
        .with_state(state)
}
