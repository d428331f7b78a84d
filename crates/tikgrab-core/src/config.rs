use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::validator::DEFAULT_ALLOWED_HOSTS;

/// Environment variable that selects the listening port.
pub const PORT_ENV: &str = "PORT";

/// Port used when neither the config file nor `PORT` sets one.
pub const DEFAULT_PORT: u16 = 3000;

/// Outbound page fetch parameters (optional `[fetch]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Desktop browser User-Agent sent with every page fetch.
    pub user_agent: String,
    /// Accept-Language sent with every page fetch.
    pub accept_language: String,
    /// Total time allowed for one fetch (connect + redirects + body).
    pub timeout_secs: u64,
    /// Time allowed to establish the TCP/TLS connection.
    pub connect_timeout_secs: u64,
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string(),
            accept_language: "en-US,en;q=0.9".to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

/// Fixed-window admission control for the API route (optional `[rate_limit]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Requests admitted per client IP within one window.
    pub max_requests: u32,
    /// Window length in seconds.
    pub window_secs: u64,
}

impl RateLimitConfig {
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 30,
            window_secs: 60,
        }
    }
}

/// Global configuration loaded from `~/.config/tikgrab/config.toml`.
///
/// Every key is optional; a missing file means all defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TikgrabConfig {
    /// Listening port. `PORT` in the environment wins over this value.
    pub port: u16,
    /// Address the HTTP server binds to.
    pub bind_address: String,
    /// Directory of front-end files served for every non-API path.
    pub static_dir: PathBuf,
    /// Host patterns accepted by the URL validator (domain or subdomain match).
    pub allowed_hosts: Vec<String>,
    pub fetch: FetchConfig,
    pub rate_limit: RateLimitConfig,
}

impl Default for TikgrabConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_address: "0.0.0.0".to_string(),
            static_dir: PathBuf::from("public"),
            allowed_hosts: DEFAULT_ALLOWED_HOSTS.iter().map(|h| h.to_string()).collect(),
            fetch: FetchConfig::default(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

impl TikgrabConfig {
    /// Applies a `PORT` value. Empty or absent values leave the port unchanged.
    pub fn apply_port_override(&mut self, value: Option<&str>) -> Result<()> {
        let raw = match value.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Ok(()),
        };
        self.port = raw
            .parse()
            .with_context(|| format!("invalid {PORT_ENV} value: {raw}"))?;
        Ok(())
    }

    /// Address the server listens on.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let addr = format!("{}:{}", self.bind_address, self.port);
        addr.parse()
            .with_context(|| format!("invalid bind address: {addr}"))
    }
}

/// Default config file location under the XDG config home.
pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("tikgrab")?;
    Ok(xdg_dirs.get_config_home().join("config.toml"))
}

/// Parse a config file.
pub fn load_from(path: &Path) -> Result<TikgrabConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: TikgrabConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration, then apply the `PORT` override.
///
/// An explicit path must exist. Without one, the XDG location is used if the
/// file is there, otherwise built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<TikgrabConfig> {
    let mut cfg = match explicit {
        Some(path) => load_from(path)?,
        None => {
            let path = config_path()?;
            if path.exists() {
                load_from(&path)?
            } else {
                tracing::debug!("no config at {}, using defaults", path.display());
                TikgrabConfig::default()
            }
        }
    };
    cfg.apply_port_override(std::env::var(PORT_ENV).ok().as_deref())?;
    Ok(cfg)
}
