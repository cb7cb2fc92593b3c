//! # zabaan-api
//!
//! HTTP API layer for Zabaan built on Axum.
//!
//! Provides the credential endpoints (`/signup`, `/login`, `/getToken`),
//! the authenticated user endpoints, health and info routes, the
//! sliding-window rate limiter in front of credential routes, request
//! logging, extractors, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
