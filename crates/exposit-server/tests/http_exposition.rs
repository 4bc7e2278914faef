//! HTTP surface driven through the router without a socket.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use tower::ServiceExt;

use exposit_core::{ErrorCode, Registry, CONTENT_TYPE};
use exposit_server::app_state::AppState;
use exposit_server::config::ServerConfig;
use exposit_server::router::build_router;

fn app(registry: Arc<Registry>) -> Router {
    let state = AppState::new(ServerConfig::default(), registry).unwrap();
    build_router(state)
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Option<String>, String) {
    let req = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let ctype = res
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, ctype, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn metrics_endpoint_renders_registry() {
    let registry = Arc::new(Registry::new());
    let requests = registry.counter("hello_requests_total", "Total hello requests").unwrap();
    requests.inc();
    requests.inc();

    let (status, ctype, body) = send(app(Arc::clone(&registry)), Method::GET, "/metrics").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ctype.as_deref(), Some(CONTENT_TYPE));
    assert!(body.starts_with(
        "# HELP hello_requests_total Total hello requests\n\
         # TYPE hello_requests_total counter\n\
         hello_requests_total 2.0\n"
    ));
    assert!(body.contains("# TYPE hello_requests_total_created gauge\n"));
    // the scrape is counted before rendering
    assert!(body.contains("\nexposit_scrapes_total 1.0\n"));
    assert!(body.ends_with('\n'));
}

#[tokio::test]
async fn scrapes_are_counted_and_timed() {
    let registry = Arc::new(Registry::new());
    let router = app(Arc::clone(&registry));

    for _ in 0..3 {
        let (status, _, _) = send(router.clone(), Method::GET, "/metrics").await;
        assert_eq!(status, StatusCode::OK);
    }

    let snap = registry.snapshot();
    let names: Vec<&str> = snap.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["exposit_scrapes_total", "exposit_scrape_duration_seconds"]);

    let (_, _, body) = send(router, Method::GET, "/metrics").await;
    assert!(body.contains("\nexposit_scrapes_total 4.0\n"));
    assert!(body.contains("\nexposit_scrape_duration_seconds_count 3.0\n"));
}

#[tokio::test]
async fn healthz_reports_metric_count() {
    let registry = Arc::new(Registry::new());
    let (status, _, body) = send(app(registry), Method::GET, "/healthz").await;

    assert_eq!(status, StatusCode::OK);
    let v: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["status"], "ok");
    assert_eq!(v["metrics"], 2);
}

#[tokio::test]
async fn unknown_path_is_404_and_wrong_method_is_405() {
    let registry = Arc::new(Registry::new());
    let router = app(registry);

    let (status, _, body) = send(router.clone(), Method::GET, "/hello").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "not found");

    let (status, _, _) = send(router, Method::POST, "/metrics").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn custom_metrics_path() {
    let mut cfg = ServerConfig::default();
    cfg.server.metrics_path = "/internal/metrics".into();
    let state = AppState::new(cfg, Arc::new(Registry::new())).unwrap();
    let router = build_router(state);

    let (status, _, _) = send(router.clone(), Method::GET, "/internal/metrics").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _, body) = send(router, Method::GET, "/metrics").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "not found");
}

#[test]
fn state_rejects_registry_with_clashing_names() {
    let registry = Arc::new(Registry::new());
    registry.counter("exposit_scrapes_total", "taken").unwrap();

    let err = AppState::new(ServerConfig::default(), Arc::clone(&registry))
        .err()
        .expect("must fail");
    assert_eq!(err.code(), ErrorCode::DuplicateName);
    assert_eq!(registry.names(), vec!["exposit_scrapes_total"]);
}

#[test]
fn failed_state_leaves_registry_untouched() {
    let registry = Arc::new(Registry::new());
    registry.counter("exposit_scrape_duration_seconds_sum", "taken").unwrap();

    let err = AppState::new(ServerConfig::default(), Arc::clone(&registry))
        .err()
        .expect("must fail");
    assert_eq!(err.code(), ErrorCode::DuplicateName);

    assert!(!registry.contains("exposit_scrapes_total"));
    assert_eq!(registry.len(), 1);
}
