//! Error types for onboard-api
//!
//! Every error response carries `{"success": false, "error": "..."}`.
//! Server-side failures answer with a fixed message; the detail only goes
//! to the log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::db::PersistenceFailure;

/// Message returned for every server-side failure
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred on the server.";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Record store rejected or could not execute the write (500)
    #[error("Persistence failure: {0}")]
    Persistence(#[from] PersistenceFailure),

    /// onboard-common error, e.g. an upload that could not be written (500)
    #[error("Common error: {0}")]
    Common(#[from] onboard_common::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Persistence(_) | ApiError::Common(_) => {
                error!("SERVER ERROR: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    GENERIC_FAILURE_MESSAGE.to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
