//! # digestcheck - Streaming File Digests and Integrity Verification
//!
//! digestcheck computes MD5, SHA-1, SHA-256 or SHA-512 digests of files by
//! streaming them through the hash in fixed-size chunks, and compares the
//! result against a reference digest.
//!
//! ## Features
//!
//! - **Bounded memory**: files are read in chunks (4 KiB by default), never
//!   loaded whole
//! - **Chunk-size independent**: the same bytes always give the same digest
//! - **Typed errors**: not-found, permission, unsupported-algorithm, I/O and
//!   cancellation failures are distinct [`DigestError`] variants
//! - **Cancellation**: a shared flag checked between chunk reads
//!
//! ## Quick Start
//!
//! ```no_run
//! use digestcheck::hash::{compare_digests, compute_digest};
//! use digestcheck::config::HashAlgorithm;
//!
//! let digest = compute_digest("image.iso", HashAlgorithm::Sha256).unwrap();
//! println!("{}", digest);
//!
//! let reference = "E3B0C44298FC1C149AFBF4C8996FB92427AE41E4649B934CA495991B7852B855";
//! if compare_digests(&digest, reference).is_match() {
//!     println!("Integrity verified");
//! }
//! ```
//!
//! ## Engine Configuration
//!
//! ```no_run
//! use digestcheck::hash::{DigestEngine, DigestRequest};
//! use digestcheck::config::HashAlgorithm;
//! use digestcheck::progress::ProgressReporter;
//! use std::time::Duration;
//!
//! let engine = DigestEngine::new()
//!     .with_chunk_size(1024 * 1024)
//!     .with_progress(ProgressReporter::new());
//!
//! // Give up after ten minutes
//! engine.cancellation_token().cancel_after(Duration::from_secs(600));
//!
//! let request = DigestRequest::new("/data/archive.tar", HashAlgorithm::Sha512);
//! match engine.compute(&request) {
//!     Ok(digest) => println!("{}", digest),
//!     Err(e) if e.is_cancelled() => eprintln!("timed out"),
//!     Err(e) => eprintln!("{}", e),
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod hash;
pub mod progress;

// Re-export commonly used types
pub use config::{DigestConfig, HashAlgorithm};
pub use error::{DigestError, DigestErrorKind, Result};
pub use hash::{compare_digests, compute_digest, ComparisonResult, Digest, DigestEngine};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    //! Convenient re-exports for common usage
    //!
    //! ```no_run
    //! use digestcheck::prelude::*;
    //! ```

    pub use crate::config::{DigestConfig, HashAlgorithm};
    pub use crate::error::{DigestError, DigestErrorKind, Result};
    pub use crate::hash::{
        compare_digests, compute_digest, hash_bytes, verify_file, CancellationToken,
        ComparisonResult, Digest, DigestEngine, DigestRequest, VerificationResult,
    };
    pub use crate::progress::ProgressReporter;
}
