//! Axum-specific error types and mappings.
//!
//! Every failure is answered with `{ "success": false, "message", "error"? }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use imgvault_archive::ArchiveError;
use imgvault_core::CoreError;
use serde::Serialize;
use thiserror::Error;

/// Message for any failure before the archive body starts.
pub const ZIP_FAILED_MESSAGE: &str = "Error creating zip file";

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (invalid input). The message goes out verbatim.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Upstream or internal failure, answered with 500.
    #[error("{message}: {error}")]
    Internal {
        /// Route-level description.
        message: String,
        /// Underlying cause.
        error: String,
    },
}

impl HttpError {
    /// Map a core error, labelling non-validation failures with `message`.
    pub fn context(message: &'static str) -> impl Fn(CoreError) -> Self {
        move |err| match err {
            CoreError::Validation(msg) => Self::BadRequest(msg),
            CoreError::Media(e) => Self::Internal {
                message: message.to_string(),
                error: e.to_string(),
            },
            CoreError::Internal(msg) => Self::Internal {
                message: message.to_string(),
                error: msg,
            },
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            Self::Internal { message, error } => {
                tracing::error!(message = %message, error = %error, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(error))
            }
        };

        let body = ErrorBody {
            success: false,
            message,
            error,
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ArchiveError> for HttpError {
    fn from(err: ArchiveError) -> Self {
        Self::Internal {
            message: ZIP_FAILED_MESSAGE.to_string(),
            error: err.to_string(),
        }
    }
}
