//! Digest comparison
//!
//! Case-insensitive equality of hex digests. This is an integrity check for
//! display purposes and is not constant-time.

use serde::{Deserialize, Serialize};

/// Outcome of comparing two digests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonResult {
    /// Digests are equal after normalization
    Match,
    /// Digests differ
    Mismatch,
}

impl ComparisonResult {
    /// Check if the digests matched
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

impl From<bool> for ComparisonResult {
    fn from(matches: bool) -> Self {
        if matches {
            Self::Match
        } else {
            Self::Mismatch
        }
    }
}

impl std::fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => f.write_str("match"),
            Self::Mismatch => f.write_str("mismatch"),
        }
    }
}

/// Normalize digest text: trim surrounding whitespace and lowercase
pub fn normalize_digest(digest: &str) -> String {
    digest.trim().to_lowercase()
}

/// Compare two digests case-insensitively, ignoring surrounding whitespace
pub fn compare_digests(a: impl AsRef<str>, b: impl AsRef<str>) -> ComparisonResult {
    ComparisonResult::from(normalize_digest(a.as_ref()) == normalize_digest(b.as_ref()))
}
