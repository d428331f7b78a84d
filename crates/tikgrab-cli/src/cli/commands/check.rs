//! `tikgrab check <url>` – allow-list check only.

use anyhow::Result;
use tikgrab_core::config::TikgrabConfig;
use tikgrab_core::validator::HostAllowList;

pub fn run_check(cfg: &TikgrabConfig, url: &str) -> Result<()> {
    let allow_list = HostAllowList::new(&cfg.allowed_hosts);
    match allow_list.source_url(url) {
        Some(source) => {
            println!("accepted: {} (host {})", source, source.host());
            Ok(())
        }
        None => anyhow::bail!("rejected: {url} is not a URL on {:?}", allow_list.patterns()),
    }
}
