//! Error types for digestcheck
//!
//! Every failure of the digest engine is reported as a [`DigestError`] value.
//! The engine never returns a partial digest alongside an error.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for digest operations
#[derive(Error, Debug)]
pub enum DigestError {
    /// File does not exist (or a path component is missing) at open time
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// File exists but cannot be read
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Hash algorithm not in the supported set
    #[error("Unsupported hash algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Any other I/O failure while opening or reading
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Hashing aborted through the cancellation flag
    #[error("Operation cancelled")]
    Cancelled,

    /// Caller supplied an unusable value (empty reference digest, etc.)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Discriminant of [`DigestError`], for presentation layers that map
/// error kinds to their own messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigestErrorKind {
    /// See [`DigestError::NotFound`]
    NotFound,
    /// See [`DigestError::PermissionDenied`]
    PermissionDenied,
    /// See [`DigestError::UnsupportedAlgorithm`]
    UnsupportedAlgorithm,
    /// See [`DigestError::Io`]
    IoFailure,
    /// See [`DigestError::Cancelled`]
    Cancelled,
    /// See [`DigestError::InvalidInput`]
    InvalidInput,
    /// See [`DigestError::ConfigError`]
    Config,
}

impl DigestError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Classify an error raised while opening `path`
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            _ => Self::Io { path, source },
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// Get the kind of this error
    pub fn kind(&self) -> DigestErrorKind {
        match self {
            Self::NotFound(_) => DigestErrorKind::NotFound,
            Self::PermissionDenied(_) => DigestErrorKind::PermissionDenied,
            Self::UnsupportedAlgorithm(_) => DigestErrorKind::UnsupportedAlgorithm,
            Self::Io { .. } => DigestErrorKind::IoFailure,
            Self::Cancelled => DigestErrorKind::Cancelled,
            Self::InvalidInput(_) => DigestErrorKind::InvalidInput,
            Self::ConfigError(_) => DigestErrorKind::Config,
        }
    }

    /// Check if the operation was cancelled
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::NotFound(path) | Self::PermissionDenied(path) | Self::Io { path, .. } => {
                Some(path)
            }
            _ => None,
        }
    }
}

/// Result type alias for digest operations
pub type Result<T> = std::result::Result<T, DigestError>;

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| DigestError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_open_error_classification() {
        let err = DigestError::open("/missing", Error::new(ErrorKind::NotFound, "gone"));
        assert_eq!(err.kind(), DigestErrorKind::NotFound);
        assert_eq!(err.path().unwrap(), &PathBuf::from("/missing"));

        let err = DigestError::open("/locked", Error::new(ErrorKind::PermissionDenied, "no"));
        assert_eq!(err.kind(), DigestErrorKind::PermissionDenied);

        let err = DigestError::open("/dev/odd", Error::new(ErrorKind::Other, "device error"));
        assert_eq!(err.kind(), DigestErrorKind::IoFailure);
        assert!(err.to_string().contains("device error"));
    }

    #[test]
    fn test_with_path() {
        let result: std::io::Result<()> = Err(Error::new(ErrorKind::UnexpectedEof, "short"));
        let err = result.with_path("/data/file.bin").unwrap_err();
        assert_eq!(err.kind(), DigestErrorKind::IoFailure);
        assert_eq!(err.path().unwrap(), &PathBuf::from("/data/file.bin"));
    }

    #[test]
    fn test_kinds_without_path() {
        assert!(DigestError::Cancelled.is_cancelled());
        assert!(DigestError::Cancelled.path().is_none());
        assert_eq!(
            DigestError::UnsupportedAlgorithm("sha3".into()).kind(),
            DigestErrorKind::UnsupportedAlgorithm
        );
        assert_eq!(DigestError::config("bad").kind(), DigestErrorKind::Config);
    }
}
