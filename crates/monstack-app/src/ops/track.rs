//! Request tracking middleware.
//!
//! Before the handler: `http_requests_active` +1 and a start timestamp.
//! After the handler: latency and request count under the endpoint label,
//! except for scrapes of `/metrics` unless `track_metrics_endpoint` is set.
//! The active gauge is released by a guard so dropped requests still
//! decrement it.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use tokio::time::Instant;

use crate::app_state::AppState;
use crate::obs::Gauge;
use crate::router::{endpoint_name, METRICS_ENDPOINT, UNKNOWN_ENDPOINT};

struct ActiveGuard<'a>(&'a Gauge);

impl<'a> ActiveGuard<'a> {
    fn enter(gauge: &'a Gauge) -> Self {
        gauge.inc();
        Self(gauge)
    }
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        self.0.dec();
    }
}

pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let metrics = state.metrics();
    let _active = ActiveGuard::enter(&metrics.http_requests_active);

    let method = req.method().clone();
    let path_endpoint = endpoint_name(req.uri().path());
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    // Routing failures carry no endpoint.
    let endpoint = if status == StatusCode::METHOD_NOT_ALLOWED {
        UNKNOWN_ENDPOINT
    } else {
        path_endpoint
    };

    if endpoint != METRICS_ENDPOINT || state.cfg().metrics.track_metrics_endpoint {
        let latency = start.elapsed();
        metrics
            .http_request_duration_seconds
            .observe(&[("endpoint", endpoint)], latency);
        metrics.http_requests_total.inc(&[
            ("method", method.as_str()),
            ("status", status.as_str()),
            ("endpoint", endpoint),
        ]);
        tracing::debug!(
            %method,
            status = status.as_u16(),
            endpoint,
            latency_ms = latency.as_millis() as u64,
            "request tracked"
        );
    }

    response
}
