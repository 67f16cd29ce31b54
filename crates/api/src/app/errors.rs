//! Error responses.
//!
//! Every failure a handler does not turn into a normal response ends up as an
//! [`ApiError`], and this is the only place failures are mapped to status
//! codes.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;
use thiserror::Error;

use marquee_infra::{ServiceError, StoreError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The request body was not a JSON object.
    #[error("malformed request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("malformed query string: {0}")]
    Query(#[from] QueryRejection),

    #[error("malformed path: {0}")]
    Path(#[from] PathRejection),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let response = match &self {
            ApiError::Service(ServiceError::ValidationFailure(errors)) => (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({
                    "error": "validation_failed",
                    "message": errors.join(", "),
                    "errors": errors,
                })),
            )
                .into_response(),
            ApiError::Service(ServiceError::Store(err)) => store_error_to_response(err),
            ApiError::Body(_) | ApiError::Query(_) | ApiError::Path(_) => {
                json_error(StatusCode::BAD_REQUEST, "invalid_body", "could not parse data")
            }
        };

        if response.status().is_server_error() {
            tracing::error!(error = %self, status = %response.status(), "request failed");
        } else {
            tracing::debug!(error = %self, status = %response.status(), "request rejected");
        }
        response
    }
}

pub fn store_error_to_response(err: &StoreError) -> axum::response::Response {
    match err {
        StoreError::Format(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", "could not parse data")
        }
        StoreError::Validation(_) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_data", "invalid data")
        }
        StoreError::Unavailable(_) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "database_error",
            "database error",
        ),
        StoreError::Other(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg.clone())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Non-error status with a bare `{ "message": .. }` body (e.g. not-found).
pub fn message(status: StatusCode, message: &'static str) -> axum::response::Response {
    (status, axum::Json(json!({ "message": message }))).into_response()
}
