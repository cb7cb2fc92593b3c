//! Sliding-window rate limiter for the credential endpoints.
//!
//! State is per process. Each client key keeps the instants of its
//! admitted requests inside the trailing window; a request is admitted
//! while fewer than `max_requests` remain after pruning.

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::warn;

use zabaan_core::config::RateLimitConfig;
use zabaan_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Key used when no peer address is known.
pub const UNKNOWN_CLIENT: &str = "unknown";

/// In-memory sliding-window limiter keyed by client.
#[derive(Debug, Clone)]
pub struct SlidingWindowRateLimiter {
    /// Client key → admitted request instants, oldest first.
    entries: Arc<Mutex<HashMap<String, Vec<Instant>>>>,
    window: Duration,
    max_requests: usize,
}

impl SlidingWindowRateLimiter {
    /// Creates a limiter admitting `max_requests` per `window` per key.
    pub fn new(window: Duration, max_requests: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            window,
            max_requests,
        }
    }

    /// Creates a limiter from configuration.
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.window(), config.max_requests)
    }

    /// Records an attempt for `key` and reports whether it is admitted.
    ///
    /// Denied attempts are not recorded. When the key has no live
    /// timestamps, every other idle key is dropped as well.
    pub async fn allow(&self, key: &str) -> bool {
        let now = Instant::now();
        let cutoff = now.checked_sub(self.window);
        let live = |t: &Instant| match cutoff {
            Some(cutoff) => *t > cutoff,
            None => true,
        };

        let mut entries = self.entries.lock().await;

        let mut stamps = entries.remove(key).unwrap_or_default();
        stamps.retain(live);

        if stamps.is_empty() {
            entries.retain(|_, other| {
                other.retain(live);
                !other.is_empty()
            });
        }

        if stamps.len() >= self.max_requests {
            if !stamps.is_empty() {
                entries.insert(key.to_string(), stamps);
            }
            return false;
        }

        stamps.push(now);
        entries.insert(key.to_string(), stamps);
        true
    }

    /// Number of keys currently tracked.
    pub async fn tracked_keys(&self) -> usize {
        self.entries.lock().await.len()
    }
}

/// Derives the rate-limit key for a request.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientKeyResolver {
    trust_proxy: bool,
}

impl ClientKeyResolver {
    /// Creates a resolver. Forwarding headers are honoured only when
    /// `trust_proxy` is set.
    pub fn new(trust_proxy: bool) -> Self {
        Self { trust_proxy }
    }

    /// Returns the client IP as a string, or [`UNKNOWN_CLIENT`].
    pub fn resolve(&self, headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
        if self.trust_proxy {
            if let Some(ip) = header_ip(headers, "x-real-ip", |v| v.trim()) {
                return ip.to_string();
            }
            if let Some(ip) = header_ip(headers, "x-forwarded-for", |v| {
                v.split(',').next().unwrap_or_default().trim()
            }) {
                return ip.to_string();
            }
        }

        peer.map(|addr| addr.ip().to_string())
            .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
    }
}

fn header_ip(headers: &HeaderMap, name: &str, pick: impl Fn(&str) -> &str) -> Option<IpAddr> {
    let value = headers.get(name)?.to_str().ok()?;
    pick(value).parse().ok()
}

/// Rejects the request with 429 when the client is over its budget.
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = state.client_keys.resolve(request.headers(), peer);

    if !state.rate_limiter.allow(&key).await {
        warn!(client = %key, path = %request.uri().path(), "Rate limit exceeded");
        return ApiError::from(AppError::rate_limited("too many requests, try again later"))
            .into_response();
    }

    next.run(request).await
}
