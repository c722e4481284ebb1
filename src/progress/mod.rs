//! Progress reporting module
//!
//! Provides a byte-level progress bar for long-running digest computations.

mod reporter;

pub use reporter::*;
