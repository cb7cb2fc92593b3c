//! HTTP-level tests against the full router over the in-memory store.

mod helpers;

mod auth_test;
mod health_test;
mod rate_limit_test;
mod user_test;
