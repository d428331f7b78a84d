//! Resolve error taxonomy.

use crate::fetch_page::FetchError;

/// Terminal outcome of a failed lookup. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// URL missing or its host is not allow-listed.
    #[error("URL is missing or not an allow-listed source")]
    InvalidInput,
    /// Upstream answered with a non-success status or the body read broke off.
    #[error("failed to fetch source page: {0}")]
    FetchFailed(#[source] FetchError),
    /// Page fetched but no extraction rule matched (likely markup drift).
    #[error("no extraction rule matched the source page")]
    NotFound,
    /// Anything else: network-layer failure, task failure, setup error.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<FetchError> for ResolveError {
    fn from(err: FetchError) -> Self {
        if err.is_upstream_failure() {
            ResolveError::FetchFailed(err)
        } else {
            ResolveError::Internal(anyhow::Error::new(err).context("page fetch failed"))
        }
    }
}
