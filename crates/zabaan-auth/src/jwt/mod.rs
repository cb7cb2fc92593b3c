//! JWT claims and HS256 signing/verification.

pub mod claims;
pub mod codec;

pub use claims::Claims;
pub use codec::TokenCodec;
