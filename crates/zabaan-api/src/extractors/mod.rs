//! Custom Axum extractors.

pub mod auth;
pub mod json;
pub mod path;

pub use auth::{AuthUser, CredentialBearer};
pub use json::JsonBody;
pub use path::parse_user_id;
