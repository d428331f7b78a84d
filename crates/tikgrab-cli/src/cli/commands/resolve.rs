//! `tikgrab resolve <url>` – one-shot lookup, prints the video URL.

use anyhow::Result;
use tikgrab_core::config::TikgrabConfig;
use tikgrab_core::resolver::VideoLookup;

pub async fn run_resolve(cfg: &TikgrabConfig, url: &str) -> Result<()> {
    let lookup = VideoLookup::from_config(cfg)?;
    let asset = lookup.lookup(Some(url)).await?;
    println!("{asset}");
    Ok(())
}
