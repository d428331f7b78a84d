//! Mapping of resolve failures to the JSON error shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::resolver::ResolveError;

pub const INVALID_URL_MESSAGE: &str = "Invalid TikTok URL";
pub const NOT_FOUND_MESSAGE: &str = "Video URL not found. TikTok markup may have changed.";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch TikTok page";
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Status + fixed public message. Internal details never reach the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl From<&ResolveError> for ApiError {
    fn from(err: &ResolveError) -> Self {
        let (status, message) = match err {
            ResolveError::InvalidInput => (StatusCode::BAD_REQUEST, INVALID_URL_MESSAGE),
            ResolveError::FetchFailed(_) => (StatusCode::BAD_GATEWAY, FETCH_FAILED_MESSAGE),
            ResolveError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE),
            ResolveError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, SERVER_ERROR_MESSAGE)
            }
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}
