//! Rate limiting configuration for the credential endpoints.

use serde::{Deserialize, Serialize};

/// Sliding-window limiter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Window length in seconds.
    #[serde(default = "default_window")]
    pub window_seconds: u64,
    /// Requests admitted per client within one window.
    #[serde(default = "default_max_requests")]
    pub max_requests: usize,
    /// Derive the client key from `X-Real-IP` / `X-Forwarded-For`.
    /// Enable only behind a proxy that overwrites those headers.
    #[serde(default)]
    pub trust_proxy: bool,
}

impl RateLimitConfig {
    /// Window length as a std duration.
    pub fn window(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.window_seconds)
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_seconds: default_window(),
            max_requests: default_max_requests(),
            trust_proxy: false,
        }
    }
}

fn default_window() -> u64 {
    60
}

fn default_max_requests() -> usize {
    10
}
