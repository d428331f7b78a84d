//! Validator → resolver composition used by the HTTP route and the CLI.

use anyhow::Context;
use std::sync::Arc;

use super::{AssetResolver, AssetUrl, ResolveError};
use crate::config::TikgrabConfig;
use crate::extract::Extractor;
use crate::fetch_page::CurlFetcher;
use crate::validator::HostAllowList;

/// Validates raw input, then resolves it. Unvalidated input never reaches the fetcher.
#[derive(Clone)]
pub struct VideoLookup {
    allow_list: HostAllowList,
    resolver: AssetResolver,
}

impl VideoLookup {
    pub fn new(allow_list: HostAllowList, resolver: AssetResolver) -> Self {
        Self {
            allow_list,
            resolver,
        }
    }

    /// Production wiring: configured allow-list, libcurl fetcher, standard ladder.
    pub fn from_config(cfg: &TikgrabConfig) -> anyhow::Result<Self> {
        let extractor = Extractor::standard().context("build extraction rules")?;
        let fetcher = CurlFetcher::new(cfg.fetch.clone());
        Ok(Self::new(
            HostAllowList::new(&cfg.allowed_hosts),
            AssetResolver::new(Arc::new(fetcher), Arc::new(extractor)),
        ))
    }

    pub fn allow_list(&self) -> &HostAllowList {
        &self.allow_list
    }

    /// `None` (field absent) and rejected URLs are both `InvalidInput`.
    pub async fn lookup(&self, input: Option<&str>) -> Result<AssetUrl, ResolveError> {
        let source = input
            .and_then(|raw| self.allow_list.source_url(raw))
            .ok_or(ResolveError::InvalidInput)?;
        self.resolver.resolve(&source).await
    }
}
