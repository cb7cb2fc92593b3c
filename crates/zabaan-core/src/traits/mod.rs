//! Capability traits defined in `zabaan-core` and implemented by other crates.

pub mod hasher;
pub mod store;

pub use hasher::CredentialHasher;
pub use store::{RevocationStore, UserStore};
