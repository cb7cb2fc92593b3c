//! # zabaan-database
//!
//! PostgreSQL connection management, the migration runner, and the two
//! implementations of the user and revocation store capabilities: the
//! sqlx-backed [`UserRepository`] and the in-process [`MemoryUserStore`].

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use memory::MemoryUserStore;
pub use repositories::UserRepository;
