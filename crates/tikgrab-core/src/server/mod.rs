//! HTTP API: `POST /api/get-video` behind per-IP admission control, plus static files.

mod error;
mod handler;
mod limit;

pub use error::{ApiError, ErrorBody};
pub use handler::{GetVideoRequest, GetVideoResponse};
pub use limit::TOO_MANY_REQUESTS_MESSAGE;

use anyhow::{Context, Result};
use axum::routing::post;
use axum::{middleware, Router};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::TikgrabConfig;
use crate::rate_limit::FixedWindowLimiter;
use crate::resolver::VideoLookup;

/// Route path of the single API endpoint.
pub const GET_VIDEO_PATH: &str = "/api/get-video";

/// Shared, read-only state handed to every request.
#[derive(Clone)]
pub struct AppState {
    lookup: Arc<VideoLookup>,
    limiter: Arc<FixedWindowLimiter>,
}

impl AppState {
    pub fn new(lookup: Arc<VideoLookup>, limiter: Arc<FixedWindowLimiter>) -> Self {
        Self { lookup, limiter }
    }
}

/// Builds the application router.
///
/// The limiter only guards the API route; static files (when `static_dir` is
/// given) are served for every other path without counting against it.
pub fn router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = Router::new()
        .route(GET_VIDEO_PATH, post(handler::get_video))
        .route_layer(middleware::from_fn_with_state(state.clone(), limit::admit))
        .with_state(state);

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(TraceLayer::new_for_http())
}

/// Runs the server until the process is stopped.
pub async fn serve(cfg: &TikgrabConfig) -> Result<()> {
    let lookup = VideoLookup::from_config(cfg)?;
    let limiter = Arc::new(FixedWindowLimiter::from_config(&cfg.rate_limit));
    let _sweeper = limiter.spawn_sweeper();

    if !cfg.static_dir.is_dir() {
        tracing::warn!(
            "static dir {} not found; only the API route is served",
            cfg.static_dir.display()
        );
    }

    let app = router(
        AppState::new(Arc::new(lookup), limiter),
        Some(&cfg.static_dir),
    );

    let addr = cfg.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;

    tracing::info!(
        allowed_hosts = ?cfg.allowed_hosts,
        max_requests = cfg.rate_limit.max_requests,
        window_secs = cfg.rate_limit.window_secs,
        "Server running on port {}",
        cfg.port
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("HTTP server failed")?;

    Ok(())
}
