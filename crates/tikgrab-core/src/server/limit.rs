//! Admission middleware: fixed-window limit per client IP.

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use std::time::Duration;

use super::AppState;
use crate::rate_limit::Admission;

pub const TOO_MANY_REQUESTS_MESSAGE: &str = "Too many requests, please try again later.";

const RATE_LIMIT_LIMIT: &str = "x-ratelimit-limit";
const RATE_LIMIT_REMAINING: &str = "x-ratelimit-remaining";

pub(super) async fn admit(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    let limit = state.limiter.limit();
    match state.limiter.check(addr.ip()) {
        Admission::Allowed { remaining, .. } => {
            let mut response = next.run(request).await;
            set_limit_headers(response.headers_mut(), limit, remaining);
            response
        }
        Admission::Limited { retry_after } => {
            tracing::warn!(client = %addr.ip(), "rate limit exceeded");
            let mut response =
                (StatusCode::TOO_MANY_REQUESTS, TOO_MANY_REQUESTS_MESSAGE).into_response();
            let headers = response.headers_mut();
            set_limit_headers(headers, limit, 0);
            headers.insert(RETRY_AFTER, HeaderValue::from(retry_after_secs(retry_after)));
            response
        }
    }
}

fn set_limit_headers(headers: &mut HeaderMap, limit: u32, remaining: u32) {
    headers.insert(HeaderName::from_static(RATE_LIMIT_LIMIT), HeaderValue::from(limit));
    headers.insert(
        HeaderName::from_static(RATE_LIMIT_REMAINING),
        HeaderValue::from(remaining),
    );
}

/// Whole seconds, rounded up, at least 1.
fn retry_after_secs(retry_after: Duration) -> u64 {
    let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
    secs.max(1)
}
