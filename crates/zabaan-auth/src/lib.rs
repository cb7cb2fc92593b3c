//! # zabaan-auth
//!
//! Bearer token lifecycle and credential handling for the Zabaan API.
//!
//! ## Modules
//!
//! - `jwt` - HS256 claims signing and verification
//! - `token` - issuance, revocation-aware validation, bulk revocation
//! - `password` - Argon2id hashing and credential policy
//! - `account` - sign-up and login over a user store

pub mod account;
pub mod jwt;
pub mod password;
pub mod token;

pub use account::{AccountManager, SignUp};
pub use jwt::{Claims, TokenCodec};
pub use password::{Argon2Hasher, PasswordPolicy};
pub use token::{TokenLifecycle, TokenLifecycleService};
