//! CLI for tikgrab.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tikgrab_core::config;

use commands::{run_check, run_resolve, run_serve, ServeOverrides};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "tikgrab")]
#[command(about = "tikgrab: resolve TikTok video pages to direct video URLs", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.config/tikgrab/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log to stderr instead of the state-dir log file.
    #[arg(long, global = true)]
    pub log_stderr: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the HTTP server (POST /api/get-video plus static files).
    Serve {
        /// Listening port (overrides config and PORT).
        #[arg(long)]
        port: Option<u16>,
        /// Bind address.
        #[arg(long, value_name = "ADDR")]
        bind: Option<String>,
        /// Directory of front-end files.
        #[arg(long, value_name = "DIR")]
        static_dir: Option<PathBuf>,
    },

    /// Resolve one video page URL and print the direct video URL.
    Resolve {
        /// TikTok video page URL.
        url: String,
    },

    /// Check whether a URL passes the host allow-list (no network access).
    Check {
        /// URL to check.
        url: String,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let cfg = config::load(self.config.as_deref())?;
        tracing::debug!("loaded config: {:?}", cfg);

        match self.command {
            CliCommand::Serve {
                port,
                bind,
                static_dir,
            } => {
                let overrides = ServeOverrides {
                    port,
                    bind,
                    static_dir,
                };
                run_serve(cfg, overrides).await?
            }
            CliCommand::Resolve { url } => run_resolve(&cfg, &url).await?,
            CliCommand::Check { url } => run_check(&cfg, &url)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
