//! Operational HTTP endpoints.
//!
//! - `/health`  : liveness
//! - `/metrics` : Prometheus text format
//! - fallback   : JSON 404

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use monstack_core::error::MonstackError;
use monstack_core::exposition::CONTENT_TYPE;

use crate::app_state::AppState;
use crate::error::ApiError;

pub mod track;

pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "healthy" }))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.metrics().render();
    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}

pub async fn not_found(uri: Uri) -> ApiError {
    MonstackError::NotFound(format!("no route for {}", uri.path())).into()
}
