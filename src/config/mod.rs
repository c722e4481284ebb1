//! Configuration module for digestcheck
//!
//! Provides CLI arguments, the hash algorithm set, and runtime settings.

mod settings;

pub use settings::*;
