//! Source URL validation against a host allow-list.
//!
//! A URL is in scope when it parses and its host equals an allow-listed
//! domain or is a subdomain of one (`www.tiktok.com`, `m.tiktok.com`,
//! `vm.tiktok.com` all match `tiktok.com`). Matching is case-insensitive.

use std::fmt;
use url::Url;

/// Hosts accepted when the config file does not name any.
pub const DEFAULT_ALLOWED_HOSTS: &[&str] = &["tiktok.com", "vm.tiktok.com"];

/// A URL that passed the allow-list check. Only [`HostAllowList::source_url`]
/// constructs one, so holding a `SourceUrl` means validation already happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl(Url);

impl SourceUrl {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Immutable set of allow-listed host patterns, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostAllowList {
    patterns: Vec<String>,
}

impl HostAllowList {
    /// Normalizes patterns: trimmed, lowercased, no leading/trailing dots. Empty ones are dropped.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                p.as_ref()
                    .trim()
                    .trim_matches('.')
                    .to_ascii_lowercase()
            })
            .filter(|p| !p.is_empty())
            .collect();
        Self { patterns }
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// True if `host` equals a pattern or is a subdomain of one.
    pub fn is_allowed_host(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.patterns.iter().any(|pattern| {
            host == *pattern
                || host
                    .strip_suffix(pattern.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Parses `input` and checks its host. Never panics; malformed input is `None`.
    pub fn source_url(&self, input: &str) -> Option<SourceUrl> {
        let url = Url::parse(input.trim()).ok()?;
        let host = url.host_str()?;
        if self.is_allowed_host(host) {
            Some(SourceUrl(url))
        } else {
            None
        }
    }

    /// Boolean form of [`source_url`](Self::source_url).
    pub fn validate(&self, input: &str) -> bool {
        self.source_url(input).is_some()
    }
}

impl Default for HostAllowList {
    fn default() -> Self {
        Self::new(DEFAULT_ALLOWED_HOSTS)
    }
}
