//! Configuration settings for digestcheck
//!
//! Defines the CLI arguments, the supported hash algorithms, and the
//! runtime configuration derived from them.

use crate::error::DigestError;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Read chunk size used when none is configured
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024;

/// Upper bound for the configurable chunk size
pub const MAX_CHUNK_SIZE: usize = 64 * 1024 * 1024;

/// digestcheck - compute file digests and verify integrity
#[derive(Parser, Debug, Clone)]
#[command(name = "digestcheck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compute file digests and verify them against a reference")]
#[command(long_about = r#"
digestcheck streams a file through MD5, SHA-1, SHA-256 or SHA-512 and prints
the lowercase hexadecimal digest, or compares it against a reference digest.

Examples:
  digestcheck hash image.iso                        # SHA-256 of a file
  digestcheck -a md5 hash image.iso                 # MD5 instead
  digestcheck verify image.iso 9F86D081...          # case-insensitive check
  digestcheck --format json verify image.iso abc... # machine-readable report
"#)]
pub struct CliArgs {
    /// Hash algorithm
    #[arg(short = 'a', long, value_enum, default_value = "sha256", value_name = "ALGO", global = true)]
    pub algorithm: HashAlgorithm,

    /// Read chunk size (e.g., 4K, 1M)
    #[arg(short = 'b', long, default_value = "4K", value_name = "SIZE", global = true)]
    pub chunk_size: String,

    /// Output format for results
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Show a progress bar while hashing
    #[arg(short = 'p', long, global = true)]
    pub progress: bool,

    /// Cancel hashing after this many seconds
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (print only the digest or the result)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compute and print the digest of a file
    #[command(name = "hash")]
    Hash {
        /// File to hash
        file: PathBuf,
    },

    /// Compute the digest of a file and compare it with a reference digest
    #[command(name = "verify")]
    Verify {
        /// File to hash
        file: PathBuf,
        /// Reference digest (hex, any letter case)
        expected: String,
    },

    /// List supported algorithms
    #[command(name = "algorithms")]
    Algorithms,
}

/// Hash algorithm for digest computation
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5 (128-bit, legacy)
    #[value(name = "md5")]
    Md5,
    /// SHA-1 (160-bit, legacy)
    #[value(name = "sha1")]
    Sha1,
    /// SHA-256 (256-bit)
    #[default]
    #[value(name = "sha256")]
    Sha256,
    /// SHA-512 (512-bit)
    #[value(name = "sha512")]
    Sha512,
}

impl HashAlgorithm {
    /// Every supported algorithm, in menu order
    pub const ALL: [HashAlgorithm; 4] = [Self::Md5, Self::Sha1, Self::Sha256, Self::Sha512];

    /// Get the output size in bytes
    pub fn output_size(&self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }

    /// Get the length of the hex rendering
    pub fn hex_len(&self) -> usize {
        self.output_size() * 2
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA-1",
            Self::Sha256 => "SHA-256",
            Self::Sha512 => "SHA-512",
        }
    }

    /// Get the canonical lowercase identifier
    pub fn id(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for HashAlgorithm {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            _ => Err(DigestError::UnsupportedAlgorithm(s.trim().to_string())),
        }
    }
}

/// Output format for results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Hash algorithm
    pub algorithm: HashAlgorithm,
    /// Read chunk size in bytes
    pub chunk_size: usize,
    /// Output format
    pub format: OutputFormat,
    /// Show progress bar
    pub progress: bool,
    /// Cancel after this many seconds
    pub timeout: Option<u64>,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Sha256,
            chunk_size: DEFAULT_CHUNK_SIZE,
            format: OutputFormat::Text,
            progress: false,
            timeout: None,
            quiet: false,
        }
    }
}

impl DigestConfig {
    /// Create config from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self, String> {
        let chunk_size = parse_size(&args.chunk_size)
            .map_err(|e| format!("Invalid chunk size: {}", e))?;
        let chunk_size = validate_chunk_size(chunk_size)?;

        if args.timeout == Some(0) {
            return Err("Timeout must be at least 1 second".to_string());
        }

        Ok(Self {
            algorithm: args.algorithm,
            chunk_size,
            format: args.format,
            progress: args.progress && !args.quiet,
            timeout: args.timeout,
            quiet: args.quiet,
        })
    }
}

fn validate_chunk_size(size: u64) -> Result<usize, String> {
    if size == 0 {
        return Err("Chunk size must be greater than zero".to_string());
    }
    if size > MAX_CHUNK_SIZE as u64 {
        return Err(format!(
            "Chunk size {} exceeds maximum of {} bytes",
            size, MAX_CHUNK_SIZE
        ));
    }
    Ok(size as usize)
}

/// Parse human-readable size string to bytes
pub fn parse_size(size: &str) -> Result<u64, String> {
    let size = size.trim().to_uppercase();

    if size.is_empty() {
        return Err("Empty size string".to_string());
    }

    let (num_str, multiplier) = if size.ends_with("GB") || size.ends_with('G') {
        (size.trim_end_matches(['G', 'B']), 1024u64 * 1024 * 1024)
    } else if size.ends_with("MB") || size.ends_with('M') {
        (size.trim_end_matches(['M', 'B']), 1024u64 * 1024)
    } else if size.ends_with("KB") || size.ends_with('K') {
        (size.trim_end_matches(['K', 'B']), 1024u64)
    } else if size.ends_with('B') {
        (size.trim_end_matches('B'), 1u64)
    } else {
        // Assume bytes if no suffix
        (size.as_str(), 1u64)
    };

    let num: f64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: {}", num_str))?;

    if !num.is_finite() || num < 0.0 {
        return Err(format!("Invalid size: {}", size));
    }

    Ok((num * multiplier as f64) as u64)
}
