//! Token lifecycle: issuance, revocation-aware validation, and bulk revocation.

pub mod lifecycle;
pub mod revocation;

pub use lifecycle::{TokenLifecycle, TokenLifecycleService};
pub use revocation::is_revoked;
