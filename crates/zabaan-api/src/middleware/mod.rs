//! Axum middleware stack.

pub mod logging;
pub mod rate_limit;

pub use rate_limit::{ClientKeyResolver, SlidingWindowRateLimiter};
