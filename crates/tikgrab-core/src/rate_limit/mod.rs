//! Fixed-window admission control keyed by client IP.
//!
//! Each client gets a window that starts with its first request and lasts
//! `window`. Up to `max_requests` are admitted inside it; the rest are
//! limited until the window expires, after which the count starts over.

use dashmap::DashMap;
use std::net::IpAddr;
use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use crate::config::RateLimitConfig;

/// Decision for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed { remaining: u32, reset_in: Duration },
    Limited { retry_after: Duration },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    hits: u32,
}

/// Per-IP fixed-window counter. Shared across requests behind an `Arc`.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    max_requests: u32,
    window: Duration,
    windows: DashMap<IpAddr, Window>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            windows: DashMap::new(),
        }
    }

    pub fn from_config(cfg: &RateLimitConfig) -> Self {
        Self::new(cfg.max_requests, cfg.window())
    }

    pub fn limit(&self) -> u32 {
        self.max_requests
    }

    pub fn check(&self, ip: IpAddr) -> Admission {
        self.check_at(ip, Instant::now())
    }

    /// Counts one request from `ip` at `now`.
    pub fn check_at(&self, ip: IpAddr, now: Instant) -> Admission {
        let mut entry = self.windows.entry(ip).or_insert(Window {
            started: now,
            hits: 0,
        });
        let window = &mut *entry;
        if now.saturating_duration_since(window.started) >= self.window {
            *window = Window {
                started: now,
                hits: 0,
            };
        }
        let reset_in = self
            .window
            .saturating_sub(now.saturating_duration_since(window.started));

        if window.hits >= self.max_requests {
            return Admission::Limited {
                retry_after: reset_in,
            };
        }
        window.hits += 1;
        Admission::Allowed {
            remaining: self.max_requests - window.hits,
            reset_in,
        }
    }

    /// Drops windows that expired before `now`. Returns how many were removed.
    pub fn sweep_at(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.started) < self.window);
        before.saturating_sub(self.windows.len())
    }

    /// Number of clients with a live window.
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    /// Sweeps expired windows once per window length. Stops when the limiter is dropped.
    pub fn spawn_sweeper(self: &Arc<Self>) -> tokio::task::JoinHandle<()> {
        let limiter: Weak<Self> = Arc::downgrade(self);
        let period = self.window.max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                let Some(limiter) = limiter.upgrade() else {
                    break;
                };
                let removed = limiter.sweep_at(Instant::now());
                if removed > 0 {
                    tracing::trace!(removed, "swept expired rate limit windows");
                }
            }
        })
    }
}
