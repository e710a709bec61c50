#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tower::ServiceExt;

use promsynth_core::{KindSelection, Registry};
use promsynth_server::app_state::AppState;
use promsynth_server::bootstrap;
use promsynth_server::config::Settings;
use promsynth_server::router::build_router;
use promsynth_server::scheduler::Scheduler;

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let ctype = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, ctype, String::from_utf8(body.to_vec()).unwrap())
}

/// Value of the first unlabelled sample line `name value`.
fn sample(text: &str, name: &str) -> f64 {
    text.lines()
        .find_map(|l| l.strip_prefix(&format!("{name} ")))
        .unwrap_or_else(|| panic!("no sample {name} in:\n{text}"))
        .parse()
        .unwrap()
}

fn state_with(settings: Settings) -> AppState {
    let registry = Registry::new();
    bootstrap::populate(&registry, &settings, &mut StdRng::seed_from_u64(1)).unwrap();
    AppState::with_registry(settings, Arc::new(registry))
}

#[tokio::test]
async fn root_is_healthy() {
    let app = build_router(state_with(Settings::default()));
    let (status, _, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "healthy");
}

#[tokio::test]
async fn metrics_change_after_ticks() {
    let settings = Settings {
        interval: Duration::from_millis(50),
        ..Settings::default()
    };
    let state = state_with(settings);
    let scheduler = Scheduler::start(state.registry(), state.settings().interval);
    let app = build_router(state);

    let (_, _, before) = get(&app, "/metrics").await;
    assert_eq!(sample(&before, "test_counter"), 0.0);
    assert_eq!(sample(&before, "test_histogram_count"), 0.0);

    tokio::time::sleep(Duration::from_millis(300)).await;

    let (status, ctype, after) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ctype.as_deref(), Some("text/plain; version=0.0.4; charset=utf-8"));
    assert!(sample(&after, "test_counter") > 0.0, "{after}");
    assert!(sample(&after, "test_gauge") > 0.0, "{after}");
    assert!(sample(&after, "test_histogram_count") > 0.0, "{after}");
    assert!(sample(&after, "test_summary_count") > 0.0, "{after}");
    assert!(after.contains("test_histogram_bucket{le=\"0.005\"}"));
    assert!(after.contains("test_summary{quantile=\"0.99\"}"));

    scheduler.shutdown().await;
}

#[tokio::test]
async fn zero_count_serves_nothing() {
    let settings = Settings {
        count: 0,
        ..Settings::default()
    };
    let state = state_with(settings);
    assert!(state.registry().is_empty());
    let app = build_router(state);

    let (status, _, body) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (_, _, json) = get(&app, "/expected_metrics").await;
    assert_eq!(json, "[]");
}

#[tokio::test]
async fn expected_metrics_lists_rows() {
    let settings = Settings {
        selection: KindSelection::One(promsynth_core::MetricKind::Histogram),
        count: 2,
        ..Settings::default()
    };
    let app = build_router(state_with(settings));

    let (status, ctype, body) = get(&app, "/expected_metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ctype.as_deref(), Some("application/json"));

    let rows: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
    // 3 buckets + count + sum per histogram
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0]["name"], "test_histogram0_bucket");
    assert_eq!(rows[0]["labels"]["le"], "0.005");
    assert!(rows[0]["timestamp"].as_f64().unwrap() > 0.0);
    assert_eq!(rows[3]["name"], "test_histogram0_count");
    assert_eq!(rows[4]["name"], "test_histogram0_sum");
}
