//! Source page fetch.
//!
//! Uses the curl crate (libcurl) for one GET per request with the configured
//! browser-like header set. Redirects are followed so short links resolve to
//! the full video page. The whole body is collected into a [`PageDocument`].

mod error;

pub use error::FetchError;

use async_trait::async_trait;
use curl::easy::{Easy, List};

use crate::config::FetchConfig;
use crate::resolver::PageFetcher;
use crate::validator::SourceUrl;

/// Upper bound on redirect hops for one fetch.
const MAX_REDIRECTS: u32 = 20;

/// Raw text of a fetched page. Lives for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageDocument(String);

impl PageDocument {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    /// Decodes as UTF-8, replacing invalid sequences.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Performs the GET and returns the body on a 2xx final status.
///
/// Runs in the current thread; use [`fetch_page`] from async code.
pub fn fetch_page_blocking(url: &str, cfg: &FetchConfig) -> Result<PageDocument, FetchError> {
    let mut body: Vec<u8> = Vec::new();

    let mut easy = Easy::new();
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(MAX_REDIRECTS)?;
    easy.connect_timeout(cfg.connect_timeout())?;
    easy.timeout(cfg.timeout())?;
    // Empty string: advertise every encoding libcurl can decode.
    easy.accept_encoding("")?;

    let mut list = List::new();
    list.append(&format!("User-Agent: {}", cfg.user_agent.trim()))?;
    list.append(&format!("Accept-Language: {}", cfg.accept_language.trim()))?;
    easy.http_headers(list)?;

    let outcome = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()
    };

    // 0 means no status line was ever received.
    let status = easy.response_code()?;
    if let Err(source) = outcome {
        if status == 0 {
            return Err(FetchError::Transport(source));
        }
        return Err(FetchError::Interrupted { status, source });
    }
    if !(200..300).contains(&status) {
        return Err(FetchError::Status { status });
    }

    tracing::debug!(url, status, bytes = body.len(), "fetched source page");
    Ok(PageDocument::from_bytes(&body))
}

/// Async wrapper: runs the blocking fetch on tokio's blocking pool.
pub async fn fetch_page(url: &str, cfg: &FetchConfig) -> Result<PageDocument, FetchError> {
    let url = url.to_owned();
    let cfg = cfg.clone();
    tokio::task::spawn_blocking(move || fetch_page_blocking(&url, &cfg)).await?
}

/// [`PageFetcher`] backed by libcurl.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    config: FetchConfig,
}

impl CurlFetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PageFetcher for CurlFetcher {
    async fn fetch(&self, url: &SourceUrl) -> Result<PageDocument, FetchError> {
        fetch_page(url.as_str(), &self.config).await
    }
}
