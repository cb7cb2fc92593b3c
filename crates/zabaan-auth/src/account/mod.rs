//! Account creation and credential login.

pub mod manager;

pub use manager::{AccountManager, SignUp};
