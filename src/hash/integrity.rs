//! Streaming file digests using MD5, SHA-1, SHA-256 and SHA-512
//!
//! Files are read sequentially in fixed-size chunks so that memory use is
//! bounded by the chunk size, not the file size. The resulting digest does
//! not depend on the chunk size.

use crate::config::{HashAlgorithm, DEFAULT_CHUNK_SIZE};
use crate::error::{DigestError, IoResultExt, Result};
use crate::hash::{compare_digests, normalize_digest, CancellationToken, ComparisonResult};
use crate::progress::ProgressReporter;
use serde::Serialize;
use sha2::Digest as _;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

/// Computed digest, rendered as lowercase hex
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Digest {
    algorithm: HashAlgorithm,
    hex: String,
    #[serde(skip)]
    bytes: Vec<u8>,
    size: u64,
}

impl Digest {
    fn new(algorithm: HashAlgorithm, bytes: Vec<u8>, size: u64) -> Self {
        debug_assert_eq!(bytes.len(), algorithm.output_size());
        Self {
            algorithm,
            hex: hex::encode(&bytes),
            bytes,
            size,
        }
    }

    /// The algorithm that produced this digest
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Lowercase hex rendering
    pub fn as_hex(&self) -> &str {
        &self.hex
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of input bytes that were hashed
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Compare against a reference digest (case-insensitive)
    pub fn compare(&self, reference: &str) -> ComparisonResult {
        compare_digests(self, reference)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.hex
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hex)
    }
}

/// Unified hasher that supports all algorithms
pub enum Hasher {
    /// MD5
    Md5(md5::Md5),
    /// SHA-1
    Sha1(sha1::Sha1),
    /// SHA-256
    Sha256(sha2::Sha256),
    /// SHA-512
    Sha512(sha2::Sha512),
}

impl Hasher {
    /// Create a new hasher for the given algorithm
    pub fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Md5 => Self::Md5(md5::Md5::new()),
            HashAlgorithm::Sha1 => Self::Sha1(sha1::Sha1::new()),
            HashAlgorithm::Sha256 => Self::Sha256(sha2::Sha256::new()),
            HashAlgorithm::Sha512 => Self::Sha512(sha2::Sha512::new()),
        }
    }

    /// Get the algorithm this hasher uses
    pub fn algorithm(&self) -> HashAlgorithm {
        match self {
            Self::Md5(_) => HashAlgorithm::Md5,
            Self::Sha1(_) => HashAlgorithm::Sha1,
            Self::Sha256(_) => HashAlgorithm::Sha256,
            Self::Sha512(_) => HashAlgorithm::Sha512,
        }
    }

    /// Update the hasher with more data
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Md5(h) => h.update(data),
            Self::Sha1(h) => h.update(data),
            Self::Sha256(h) => h.update(data),
            Self::Sha512(h) => h.update(data),
        }
    }

    /// Finalize and get the raw digest bytes
    pub fn finalize(self) -> Vec<u8> {
        match self {
            Self::Md5(h) => h.finalize().to_vec(),
            Self::Sha1(h) => h.finalize().to_vec(),
            Self::Sha256(h) => h.finalize().to_vec(),
            Self::Sha512(h) => h.finalize().to_vec(),
        }
    }
}

/// Streaming accumulator that tracks how many bytes it has seen
pub struct StreamingHasher {
    hasher: Hasher,
    bytes_processed: u64,
}

impl StreamingHasher {
    /// Create a new streaming hasher
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            hasher: Hasher::new(algorithm),
            bytes_processed: 0,
        }
    }

    /// Process a chunk of data
    pub fn update(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.bytes_processed += data.len() as u64;
    }

    /// Get bytes processed so far
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_processed
    }

    /// Finalize and get the digest
    pub fn finalize(self) -> Digest {
        let algorithm = self.hasher.algorithm();
        Digest::new(algorithm, self.hasher.finalize(), self.bytes_processed)
    }
}

/// A single digest computation: which file, which algorithm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestRequest {
    path: PathBuf,
    algorithm: HashAlgorithm,
}

impl DigestRequest {
    /// Create a request
    pub fn new(path: impl Into<PathBuf>, algorithm: HashAlgorithm) -> Self {
        Self {
            path: path.into(),
            algorithm,
        }
    }

    /// Create a request from an algorithm name such as `"sha256"`
    pub fn named(path: impl Into<PathBuf>, algorithm: &str) -> Result<Self> {
        Ok(Self::new(path, algorithm.parse()?))
    }

    /// Path of the file to hash
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Algorithm to hash with
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

/// Result of verifying a file against a reference digest
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    /// Digest computed from the file
    pub digest: Digest,
    /// Reference digest, normalized
    pub expected: String,
    /// Whether they match
    pub result: ComparisonResult,
}

impl VerificationResult {
    /// Check if the file matched the reference
    pub fn is_match(&self) -> bool {
        self.result.is_match()
    }
}

/// Digest engine
///
/// Holds the read chunk size, an optional progress reporter, and a
/// cancellation token. Every computation opens its own file handle and owns
/// its own accumulator, so one engine can serve sequential calls and
/// independent engines can run concurrently.
pub struct DigestEngine {
    chunk_size: usize,
    progress: Option<ProgressReporter>,
    cancel: CancellationToken,
}

impl DigestEngine {
    /// Create an engine with the default chunk size
    pub fn new() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            progress: None,
            cancel: CancellationToken::new(),
        }
    }

    /// Set the read chunk size (clamped to at least one byte)
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Set progress reporter
    pub fn with_progress(mut self, progress: ProgressReporter) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Use an existing cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Get the read chunk size
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Get the progress reporter, if any
    pub fn progress(&self) -> Option<&ProgressReporter> {
        self.progress.as_ref()
    }

    /// Get cancellation token for external control
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancel any running or future computation on this engine
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Compute the digest of the requested file
    pub fn compute(&self, request: &DigestRequest) -> Result<Digest> {
        let path = request.path();
        let algorithm = request.algorithm();

        // Opening a FIFO with no writer blocks; stat before open
        let metadata = std::fs::metadata(path).map_err(|e| DigestError::open(path, e))?;
        if !metadata.is_file() {
            return Err(not_regular_file(path));
        }

        let file = File::open(path).map_err(|e| DigestError::open(path, e))?;
        let metadata = file.metadata().with_path(path)?;
        if !metadata.is_file() {
            return Err(not_regular_file(path));
        }

        tracing::debug!(
            "Hashing {:?} with {} ({} bytes, {} byte chunks)",
            path,
            algorithm.name(),
            metadata.len(),
            self.chunk_size
        );

        if let Some(progress) = &self.progress {
            progress.set_total_bytes(metadata.len());
        }

        let digest = self.stream(file, algorithm, path)?;
        tracing::debug!("{} {:?} = {}", algorithm.name(), path, digest);
        Ok(digest)
    }

    /// Compute the digest of everything readable from `reader`
    pub fn digest_reader<R: Read>(&self, reader: R, algorithm: HashAlgorithm) -> Result<Digest> {
        if let Some(progress) = &self.progress {
            progress.set_total_bytes(0);
        }
        self.stream(reader, algorithm, Path::new("<reader>"))
    }

    /// Compute the digest of a file and compare it with `expected`
    pub fn verify(&self, request: &DigestRequest, expected: &str) -> Result<VerificationResult> {
        let expected = normalize_digest(expected);
        if expected.is_empty() {
            return Err(DigestError::InvalidInput(
                "reference digest is empty".to_string(),
            ));
        }
        if expected.len() != request.algorithm().hex_len() {
            tracing::warn!(
                "Reference digest has {} characters, {} digests have {}",
                expected.len(),
                request.algorithm().name(),
                request.algorithm().hex_len()
            );
        }

        let digest = self.compute(request)?;
        let result = compare_digests(&digest, &expected);

        Ok(VerificationResult {
            digest,
            expected,
            result,
        })
    }

    fn stream<R: Read>(&self, mut reader: R, algorithm: HashAlgorithm, origin: &Path) -> Result<Digest> {
        let mut hasher = StreamingHasher::new(algorithm);
        let mut buffer = vec![0u8; self.chunk_size];

        loop {
            if self.cancel.is_cancelled() {
                tracing::warn!(
                    "Hashing {:?} cancelled after {} bytes",
                    origin,
                    hasher.bytes_processed()
                );
                self.abandon_progress();
                return Err(DigestError::Cancelled);
            }

            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.abandon_progress();
                    return Err(DigestError::io(origin, e));
                }
            };

            hasher.update(&buffer[..bytes_read]);
            if let Some(progress) = &self.progress {
                progress.increment_bytes(bytes_read as u64);
            }
        }

        if let Some(progress) = &self.progress {
            progress.finish();
        }
        Ok(hasher.finalize())
    }

    fn abandon_progress(&self) {
        if let Some(progress) = &self.progress {
            progress.abandon();
        }
    }
}

fn not_regular_file(path: &Path) -> DigestError {
    DigestError::io(
        path,
        std::io::Error::new(ErrorKind::InvalidInput, "not a regular file"),
    )
}

impl Default for DigestEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the digest of a file
pub fn compute_digest(path: impl AsRef<Path>, algorithm: HashAlgorithm) -> Result<Digest> {
    DigestEngine::new().compute(&DigestRequest::new(path.as_ref(), algorithm))
}

/// Compute the digest of a file, selecting the algorithm by name
pub fn compute_digest_named(path: impl AsRef<Path>, algorithm: &str) -> Result<Digest> {
    DigestEngine::new().compute(&DigestRequest::named(path.as_ref(), algorithm)?)
}

/// Compute the digest of data in memory
pub fn hash_bytes(data: &[u8], algorithm: HashAlgorithm) -> Digest {
    let mut hasher = StreamingHasher::new(algorithm);
    hasher.update(data);
    hasher.finalize()
}

/// Verify a file against a reference digest
pub fn verify_file(
    path: impl AsRef<Path>,
    algorithm: HashAlgorithm,
    expected: &str,
) -> Result<VerificationResult> {
    DigestEngine::new().verify(&DigestRequest::new(path.as_ref(), algorithm), expected)
}
