//! HTTP endpoints.
//!
//! - `/`                 : liveness
//! - `/metrics`          : Prometheus text format
//! - `/expected_metrics` : exported rows as JSON

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use promsynth_core::expo::CONTENT_TYPE;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "healthy")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.registry().render();
    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}

pub async fn expected_metrics(State(state): State<AppState>) -> Response {
    let rows = state.registry().snapshot();
    let body = match serde_json::to_string(&rows) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, rows = rows.len(), "snapshot serialization failed");
            "[]".to_string()
        }
    };
    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}
