//! `tikgrab serve` – run the HTTP server.

use anyhow::Result;
use std::path::PathBuf;
use tikgrab_core::config::TikgrabConfig;
use tikgrab_core::server;

/// Command-line values that win over the config file and environment.
#[derive(Debug, Default)]
pub struct ServeOverrides {
    pub port: Option<u16>,
    pub bind: Option<String>,
    pub static_dir: Option<PathBuf>,
}

impl ServeOverrides {
    fn apply(self, cfg: &mut TikgrabConfig) {
        if let Some(port) = self.port {
            cfg.port = port;
        }
        if let Some(bind) = self.bind {
            cfg.bind_address = bind;
        }
        if let Some(dir) = self.static_dir {
            cfg.static_dir = dir;
        }
    }
}

pub async fn run_serve(mut cfg: TikgrabConfig, overrides: ServeOverrides) -> Result<()> {
    overrides.apply(&mut cfg);
    server::serve(&cfg).await
}
