//! Page fetch error type.

/// Error returned by a page fetch.
///
/// `Status` and `Interrupted` mean the upstream answered; `Transport` and
/// `Join` mean no usable answer was obtained at all.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Final response had a non-2xx status.
    #[error("upstream returned HTTP {status}")]
    Status { status: u32 },
    /// Upstream sent a status line, then the body transfer failed.
    #[error("body read failed after HTTP {status}: {source}")]
    Interrupted {
        status: u32,
        #[source]
        source: curl::Error,
    },
    /// Curl failed before any response (DNS, connect, TLS, bad URL).
    #[error("request failed: {0}")]
    Transport(#[from] curl::Error),
    /// The blocking fetch task panicked or was cancelled.
    #[error("fetch task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl FetchError {
    /// True when the upstream answered but the page could not be used.
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, FetchError::Status { .. } | FetchError::Interrupted { .. })
    }
}
