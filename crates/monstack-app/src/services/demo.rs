//! Demo endpoints: a landing page, a data endpoint, a slow endpoint for
//! latency alerts, a flaky endpoint for error-rate alerts, and a sink for the
//! alert router's webhook notifications.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::app_state::AppState;

fn unix_timestamp() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or_default()
}

pub async fn home() -> impl IntoResponse {
    Json(json!({
        "app": "Monitoring Challenge App",
        "message": "Scrape /metrics to watch this app.",
        "endpoints": {
            "/": "This page",
            "/api/data": "Sample API endpoint",
            "/api/slow": "Slow endpoint (for latency testing)",
            "/api/error": "Error endpoint (for error rate testing)",
            "/api/alerts": "Alert webhook sink (POST)",
            "/health": "Health check",
            "/metrics": "Prometheus metrics"
        }
    }))
}

pub async fn api_data(State(state): State<AppState>) -> impl IntoResponse {
    let delay = state.simulator().delay(state.cfg().simulation.data_delay_ms);
    tokio::time::sleep(delay).await;
    Json(json!({
        "data": [1, 2, 3, 4, 5],
        "timestamp": unix_timestamp(),
    }))
}

pub async fn api_slow(State(state): State<AppState>) -> impl IntoResponse {
    let delay = state.simulator().delay(state.cfg().simulation.slow_delay_ms);
    tokio::time::sleep(delay).await;
    Json(json!({
        "message": "This was slow!",
        "timestamp": unix_timestamp(),
    }))
}

pub async fn api_error(State(state): State<AppState>) -> Response {
    if state.simulator().should_fail(state.cfg().simulation.error_rate) {
        tracing::warn!("simulated failure on /api/error");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Something went wrong!" })),
        )
            .into_response();
    }
    Json(json!({ "message": "Success!" })).into_response()
}

/// Accepts alert router webhook payloads and logs each alert.
pub async fn api_alerts(Json(payload): Json<Value>) -> impl IntoResponse {
    let status = payload["status"].as_str().unwrap_or("unknown");
    let alerts = payload["alerts"].as_array().map(Vec::as_slice).unwrap_or_default();
    for alert in alerts {
        tracing::info!(
            status,
            alertname = alert["labels"]["alertname"].as_str().unwrap_or(""),
            severity = alert["labels"]["severity"].as_str().unwrap_or(""),
            "alert notification"
        );
    }
    Json(json!({ "received": alerts.len() }))
}
