#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use monstack_app::{app_state::AppState, config, router, services::Simulator};
use monstack_core::exposition::{parse_text, MetricFamily, CONTENT_TYPE};

fn test_config(error_rate: f64, track_metrics: bool) -> config::AppConfig {
    let yaml = format!(
        r#"
version: 1
metrics:
  track_metrics_endpoint: {track_metrics}
simulation:
  data_delay_ms: {{ min: 0, max: 0 }}
  slow_delay_ms: {{ min: 0, max: 0 }}
  error_rate: {error_rate}
"#
    );
    config::load_from_str(&yaml).unwrap()
}

fn test_app(error_rate: f64) -> (AppState, Router) {
    let state = AppState::new(test_config(error_rate, false)).unwrap();
    (state.clone(), router::build_router(state))
}

async fn send(app: &Router, method: Method, uri: &str) -> (StatusCode, String) {
    let req = Request::builder().method(method).uri(uri).body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    send(app, Method::GET, uri).await
}

async fn scrape(app: &Router) -> Vec<MetricFamily> {
    let (status, body) = get(app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    parse_text(&body).unwrap()
}

fn family<'a>(fams: &'a [MetricFamily], name: &str) -> &'a MetricFamily {
    fams.iter().find(|f| f.name == name).unwrap()
}

fn request_count(fams: &[MetricFamily], endpoint: &str, status: &str) -> f64 {
    family(fams, "http_requests_total")
        .find(
            "http_requests_total",
            &[("endpoint", endpoint), ("status", status), ("method", "GET")],
        )
        .map(|s| s.value)
        .unwrap_or(0.0)
}

#[tokio::test]
async fn health_and_home() {
    let (_, app) = test_app(0.0);

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["status"], "healthy");

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["app"], "Monitoring Challenge App");
    assert!(v["endpoints"]["/metrics"].is_string());
}

#[tokio::test]
async fn data_and_slow_endpoints() {
    let (_, app) = test_app(0.0);

    let (status, body) = get(&app, "/api/data").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["data"], serde_json::json!([1, 2, 3, 4, 5]));
    assert!(v["timestamp"].as_f64().unwrap() > 0.0);

    let (status, body) = get(&app, "/api/slow").await;
    assert_eq!(status, StatusCode::OK);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["message"], "This was slow!");
}

#[tokio::test]
async fn error_endpoint_counts_failures() {
    let (_, failing) = test_app(1.0);
    for _ in 0..3 {
        let (status, body) = get(&failing, "/api/error").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Something went wrong!"));
    }
    let fams = scrape(&failing).await;
    assert_eq!(request_count(&fams, "api_error", "500"), 3.0);
    assert_eq!(request_count(&fams, "api_error", "200"), 0.0);

    let (_, healthy) = test_app(0.0);
    let (status, _) = get(&healthy, "/api/error").await;
    assert_eq!(status, StatusCode::OK);
    let fams = scrape(&healthy).await;
    assert_eq!(request_count(&fams, "api_error", "200"), 1.0);
}

#[tokio::test]
async fn metrics_endpoint_shape() {
    let (_, app) = test_app(0.0);
    get(&app, "/health").await;

    let req = Request::builder().uri("/metrics").body(Body::empty()).unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.headers()[header::CONTENT_TYPE], CONTENT_TYPE);

    let fams = scrape(&app).await;
    assert_eq!(family(&fams, "http_requests_total").help.as_deref(), Some("Total HTTP requests"));

    let hist = family(&fams, "http_request_duration_seconds");
    let buckets: Vec<&str> = hist
        .samples
        .iter()
        .filter(|s| s.name == "http_request_duration_seconds_bucket")
        .filter_map(|s| s.label("le"))
        .collect();
    assert_eq!(
        buckets,
        ["0.01", "0.025", "0.05", "0.1", "0.25", "0.5", "1", "2.5", "5", "10", "+Inf"]
    );
    let count = hist
        .find("http_request_duration_seconds_count", &[("endpoint", "health")])
        .unwrap();
    assert_eq!(count.value, 1.0);

    // The scrape in flight is the only active request.
    let active = family(&fams, "http_requests_active");
    assert_eq!(active.samples[0].value, 1.0);
}

#[tokio::test]
async fn metrics_scrapes_are_not_tracked_by_default() {
    let (state, app) = test_app(0.0);
    scrape(&app).await;
    scrape(&app).await;
    assert_eq!(
        state
            .metrics()
            .http_requests_total
            .get(&[("method", "GET"), ("status", "200"), ("endpoint", "metrics")]),
        0
    );
    assert_eq!(state.metrics().http_request_duration_seconds.count(&[("endpoint", "metrics")]), 0);
}

#[tokio::test]
async fn metrics_scrapes_tracked_when_enabled() {
    let state = AppState::new(test_config(0.0, true)).unwrap();
    let app = router::build_router(state.clone());
    scrape(&app).await;
    scrape(&app).await;
    assert_eq!(
        state
            .metrics()
            .http_requests_total
            .get(&[("method", "GET"), ("status", "200"), ("endpoint", "metrics")]),
        2
    );
}

#[tokio::test]
async fn unknown_routes_use_unknown_endpoint() {
    let (state, app) = test_app(0.0);

    let (status, body) = get(&app, "/does/not/exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let v: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(v["error"], "NOT_FOUND");

    let (status, _) = send(&app, Method::POST, "/").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let m = state.metrics();
    let count = |method: &str, status: &str, endpoint: &str| {
        m.http_requests_total
            .get(&[("method", method), ("status", status), ("endpoint", endpoint)])
    };
    assert_eq!(count("GET", "404", "unknown"), 1);
    assert_eq!(count("POST", "405", "unknown"), 1);
    assert_eq!(count("POST", "405", "home"), 0);
}

#[tokio::test]
async fn active_gauge_returns_to_zero() {
    let (state, app) = test_app(0.5);
    let mut handles = Vec::new();
    for uri in ["/", "/health", "/api/data", "/api/slow", "/api/error", "/missing"] {
        let app = app.clone();
        handles.push(tokio::spawn(async move { get(&app, uri).await }));
    }
    for h in handles {
        h.await.unwrap();
    }
    assert_eq!(state.metrics().http_requests_active.get(), 0);
}

struct SlowSimulator;

impl Simulator for SlowSimulator {
    fn delay(&self, _range: config::DelayRange) -> Duration {
        Duration::from_millis(300)
    }
    fn should_fail(&self, _error_rate: f64) -> bool {
        false
    }
}

#[tokio::test]
async fn dropped_request_releases_active_gauge() {
    let state = AppState::with_simulator(test_config(0.0, false), Arc::new(SlowSimulator)).unwrap();
    let app = router::build_router(state.clone());

    let req = Request::builder().uri("/api/slow").body(Body::empty()).unwrap();
    let pending = app.clone().oneshot(req);
    let timed_out = tokio::time::timeout(Duration::from_millis(50), pending).await;
    assert!(timed_out.is_err());

    assert_eq!(state.metrics().http_requests_active.get(), 0);
    assert_eq!(state.metrics().http_request_duration_seconds.count(&[("endpoint", "api_slow")]), 0);
}

#[tokio::test]
async fn latency_is_observed_under_endpoint() {
    let state = AppState::with_simulator(test_config(0.0, false), Arc::new(SlowSimulator)).unwrap();
    let app = router::build_router(state.clone());
    let (status, _) = get(&app, "/api/data").await;
    assert_eq!(status, StatusCode::OK);

    let fams = scrape(&app).await;
    let hist = family(&fams, "http_request_duration_seconds");
    let le_025 = hist
        .find("http_request_duration_seconds_bucket", &[("endpoint", "api_data"), ("le", "0.25")])
        .unwrap();
    let le_05 = hist
        .find("http_request_duration_seconds_bucket", &[("endpoint", "api_data"), ("le", "0.5")])
        .unwrap();
    assert_eq!(le_025.value, 0.0);
    assert_eq!(le_05.value, 1.0);
}

#[tokio::test]
async fn alert_webhooks_are_accepted_and_tracked() {
    let (state, app) = test_app(0.0);
    let payload = serde_json::json!({
        "version": "4",
        "status": "firing",
        "receiver": "critical",
        "alerts": [
            { "labels": { "alertname": "ServiceDown", "severity": "critical" } },
            { "labels": { "alertname": "HighErrorRate", "severity": "critical" } }
        ]
    });
    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/alerts")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let v: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(v["received"], 2);

    let m = state.metrics();
    let count = |status: &str, endpoint: &str| {
        m.http_requests_total
            .get(&[("method", "POST"), ("status", status), ("endpoint", endpoint)])
    };
    assert_eq!(count("200", "api_alerts"), 1);
    assert_eq!(count("405", "unknown"), 0);

    // The sink only takes POST.
    let (status, _) = get(&app, "/api/alerts").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
