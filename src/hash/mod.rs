//! Digest computation and integrity verification module
//!
//! Provides streaming MD5, SHA-1, SHA-256 and SHA-512 digests of files,
//! case-insensitive digest comparison, and cooperative cancellation.

mod cancel;
mod compare;
mod integrity;

pub use cancel::*;
pub use compare::*;
pub use integrity::*;
