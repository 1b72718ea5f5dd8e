//! Fixed-window request limiter for the public auth routes.
//!
//! Clients are keyed by peer IP. Requests without connection info (for
//! example in-process tests) share a single bucket.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use super::{ApiError, AppState};
use crate::config::RateLimitConfig;

/// Windows are pruned once the table grows past this many clients.
const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug)]
pub struct RateLimiter {
    enabled: bool,
    window: Duration,
    max_requests: u32,
    clients: Mutex<HashMap<IpAddr, Window>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            enabled: config.enabled,
            window: Duration::from_secs(config.window_seconds.max(1)),
            max_requests: config.max_requests,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Counts one request from `client`. Returns the time until the window
    /// resets when the client is over its budget.
    pub async fn check(&self, client: IpAddr) -> Result<(), Duration> {
        self.check_at(client, Instant::now()).await
    }

    async fn check_at(&self, client: IpAddr, now: Instant) -> Result<(), Duration> {
        if !self.enabled {
            return Ok(());
        }

        let mut clients = self.clients.lock().await;

        if clients.len() > PRUNE_THRESHOLD {
            let window = self.window;
            clients.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = clients.entry(client).or_insert(Window {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }

        if entry.count >= self.max_requests {
            let elapsed = now.duration_since(entry.started);
            return Err(self.window.saturating_sub(elapsed));
        }

        entry.count += 1;
        Ok(())
    }
}

pub async fn rate_limit_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let client = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED), |ConnectInfo(addr)| addr.ip());

    if let Err(retry_after) = state.rate_limiter.check(client).await {
        tracing::warn!(%client, path = %request.uri().path(), "Rate limit exceeded");
        return Err(ApiError::TooManyRequests {
            retry_after_secs: retry_after.as_secs().max(1),
        });
    }

    Ok(next.run(request).await)
}
