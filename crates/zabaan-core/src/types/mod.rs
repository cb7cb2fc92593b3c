//! Core type definitions used across the Zabaan workspace.

pub mod id;
pub mod user;

pub use id::{ParseUserIdError, UserId};
pub use user::{NewUser, User, UserCredentials};
