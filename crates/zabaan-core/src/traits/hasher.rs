//! One-way password hashing capability.

use crate::result::AppResult;

/// Hashes and verifies passwords.
///
/// Hashing is CPU-bound and synchronous; callers on the async runtime keep
/// calls short or move them to a blocking task.
pub trait CredentialHasher: Send + Sync + 'static {
    /// Produce an encoded hash (salt included) for `password`.
    fn hash(&self, password: &str) -> AppResult<String>;

    /// Check `password` against an encoded hash.
    ///
    /// `Ok(false)` on mismatch; `Err` only when the hash cannot be parsed.
    fn verify(&self, password: &str, hash: &str) -> AppResult<bool>;
}
