//! The single error-to-HTTP boundary.
//!
//! Every failure raised in the pipeline is classified here exactly
//! once. Error bodies are plain text, not JSON — the success path is
//! the only JSON response this API produces.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use memo_core::provider_errors::{is_internal_message, message_for_code, GENERIC_STORE_MESSAGE};
use memo_core::Error;

/// HTTP-facing classification of a pipeline failure.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Internal(String),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        // Diagnostics first: the raw error is logged before any
        // classification collapses it into a user-safe message.
        match &err {
            Error::Internal(_) | Error::Storage { .. } => error!(error = %err, "request failed"),
            _ => warn!(error = %err, "request rejected"),
        }

        match err {
            Error::Validation(msg) => ApiError::BadRequest(msg),
            Error::UnsupportedQuery(msg) => ApiError::BadRequest(msg),
            Error::Unauthorized(msg) => ApiError::Unauthorized(msg),
            Error::Storage { code } => {
                let message = message_for_code(&code);
                if is_internal_message(message) {
                    ApiError::Internal(message.to_string())
                } else {
                    ApiError::BadRequest(message.to_string())
                }
            }
            Error::Internal(_) => ApiError::Internal(GENERIC_STORE_MESSAGE.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, message).into_response()
    }
}
