//! `POST /api/get-video`

use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState};
use crate::resolver::ResolveError;

/// Request body. `url` is optional so a missing field maps to 400, not a parse error.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetVideoRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// `{ "video": "<asset URL>" }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetVideoResponse {
    pub video: String,
}

pub(super) async fn get_video(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<GetVideoResponse>, ApiError> {
    let request = parse_body(&headers, &body);
    let input = request.url.as_deref();

    match state.lookup.lookup(input).await {
        Ok(asset) => Ok(Json(GetVideoResponse {
            video: asset.into_string(),
        })),
        Err(err) => {
            log_failure(&err, input);
            Err(ApiError::from(&err))
        }
    }
}

/// JSON or urlencoded form, chosen by Content-Type. Anything unparseable is an empty request.
fn parse_body(headers: &HeaderMap, body: &[u8]) -> GetVideoRequest {
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let parsed = if content_type.starts_with("application/x-www-form-urlencoded") {
        serde_urlencoded::from_bytes(body).ok()
    } else if content_type.contains("json") {
        serde_json::from_slice(body).ok()
    } else {
        None
    };
    parsed.unwrap_or_default()
}

fn log_failure(err: &ResolveError, input: Option<&str>) {
    let url = input.unwrap_or_default();
    match err {
        ResolveError::InvalidInput => tracing::debug!(url, "rejected source URL"),
        ResolveError::FetchFailed(cause) => {
            tracing::warn!(url, "source page fetch failed: {}", cause)
        }
        ResolveError::NotFound => {
            tracing::warn!(url, "no extraction rule matched; page markup may have changed")
        }
        ResolveError::Internal(cause) => tracing::error!(url, "lookup failed: {:#}", cause),
    }
}
