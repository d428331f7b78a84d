//! Asset resolution: fetch a validated source page and run the extraction ladder.
//!
//! The resolver only depends on the [`PageFetcher`] trait; the libcurl
//! implementation lives in `fetch_page` and tests substitute their own.

mod error;
mod lookup;

pub use error::ResolveError;
pub use lookup::VideoLookup;

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::extract::Extractor;
use crate::fetch_page::{FetchError, PageDocument};
use crate::validator::SourceUrl;

/// Retrieves the page behind a validated source URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &SourceUrl) -> Result<PageDocument, FetchError>;
}

/// Direct video asset URL as embedded in the page. Not checked for reachability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrl(String);

impl AssetUrl {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for AssetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fetch + extraction ladder. Holds only immutable, shared parts.
#[derive(Clone)]
pub struct AssetResolver {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<Extractor>,
}

impl AssetResolver {
    pub fn new(fetcher: Arc<dyn PageFetcher>, extractor: Arc<Extractor>) -> Self {
        Self { fetcher, extractor }
    }

    /// One fetch, then the ladder. Every failure is terminal.
    pub async fn resolve(&self, url: &SourceUrl) -> Result<AssetUrl, ResolveError> {
        let page = self.fetcher.fetch(url).await?;
        self.resolve_document(&page)
    }

    /// Runs the ladder over an already fetched page. Pure in `page`.
    pub fn resolve_document(&self, page: &PageDocument) -> Result<AssetUrl, ResolveError> {
        let found = self
            .extractor
            .extract(page.as_str())
            .ok_or(ResolveError::NotFound)?;
        tracing::debug!(rule = found.rule, "extraction rule matched");
        Ok(AssetUrl(found.url))
    }
}
