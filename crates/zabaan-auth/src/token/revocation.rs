//! The revocation rule.
//!
//! Both instants are truncated to whole seconds before comparing, since
//! `iat` only carries second precision. A token is revoked when its
//! issue time plus the tolerance lies strictly before the mark.

use chrono::{DateTime, Duration, Utc};

/// Whether a token issued at `issued_at` is revoked by `valid_after`.
pub fn is_revoked(issued_at: DateTime<Utc>, valid_after: DateTime<Utc>, tolerance: Duration) -> bool {
    issued_at
        .timestamp()
        .saturating_add(tolerance.num_seconds())
        < valid_after.timestamp()
}
