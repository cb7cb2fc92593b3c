//! # zabaan-core
//!
//! Core crate for the Zabaan API. Contains the capability traits the
//! auth core consumes (user lookup, revocation marks, password hashing),
//! configuration schemas, typed identifiers, the user model, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other Zabaan crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
