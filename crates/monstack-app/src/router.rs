//! Axum router wiring.
//!
//! Each route has a stable endpoint name used as the `endpoint` metric label.
//! Paths outside the table resolve to `unknown`.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{app_state::AppState, ops, services};

pub const METRICS_ENDPOINT: &str = "metrics";
pub const UNKNOWN_ENDPOINT: &str = "unknown";

/// (path, endpoint name)
pub const ROUTES: &[(&str, &str)] = &[
    ("/", "home"),
    ("/health", "health"),
    ("/api/data", "api_data"),
    ("/api/slow", "api_slow"),
    ("/api/error", "api_error"),
    ("/api/alerts", "api_alerts"),
    ("/metrics", METRICS_ENDPOINT),
];

/// Endpoint label for a request path (exact match).
pub fn endpoint_name(path: &str) -> &'static str {
    ROUTES
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_ENDPOINT)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(services::home))
        .route("/health", get(ops::health))
        .route("/api/data", get(services::api_data))
        .route("/api/slow", get(services::api_slow))
        .route("/api/error", get(services::api_error))
        .route("/api/alerts", post(services::api_alerts))
        .route("/metrics", get(ops::metrics))
        .fallback(ops::not_found)
        .layer(middleware::from_fn_with_state(state.clone(), ops::track::track_requests))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
