//! HTTP mapping for `MonstackError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use monstack_core::error::{ErrorCode, MonstackError};

/// Handler error wrapper (JSON body with a stable code).
#[derive(Debug)]
pub struct ApiError(pub MonstackError);

impl From<MonstackError> for ApiError {
    fn from(e: MonstackError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let status = match code {
            ErrorCode::BadRequest | ErrorCode::Parse => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::UnsupportedVersion | ErrorCode::Io | ErrorCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = Json(json!({
            "error": code.as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
