//! Progress reporter implementation
//!
//! Uses indicatif for a byte progress bar with throughput and ETA.
//! The digest engine feeds it one increment per chunk read.

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Progress reporter for digest computations
pub struct ProgressReporter {
    /// Byte progress bar
    bytes_bar: ProgressBar,
    /// Start of the current run
    start_time: Mutex<Instant>,
    /// Total bytes to hash
    total_bytes: AtomicU64,
    /// Bytes hashed so far
    bytes_hashed: AtomicU64,
    /// Is progress enabled
    enabled: AtomicBool,
}

impl ProgressReporter {
    /// Create a new progress reporter drawing to stderr
    pub fn new() -> Self {
        let bytes_bar = ProgressBar::new(0);
        bytes_bar.set_style(
            ProgressStyle::default_bar()
                .template("{prefix:.bold.dim} [{bar:40.green/white}] {bytes}/{total_bytes} ({bytes_per_sec}, ETA {eta})")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );
        bytes_bar.set_prefix("Hashing");

        Self {
            bytes_bar,
            start_time: Mutex::new(Instant::now()),
            total_bytes: AtomicU64::new(0),
            bytes_hashed: AtomicU64::new(0),
            enabled: AtomicBool::new(true),
        }
    }

    /// Create a disabled progress reporter (for quiet mode and tests)
    pub fn disabled() -> Self {
        let reporter = Self::new();
        reporter.enabled.store(false, Ordering::SeqCst);
        reporter.bytes_bar.set_draw_target(ProgressDrawTarget::hidden());
        reporter
    }

    /// Start a new run of `total` bytes, clearing counts from any earlier run
    pub fn set_total_bytes(&self, total: u64) {
        self.total_bytes.store(total, Ordering::Relaxed);
        self.bytes_hashed.store(0, Ordering::Relaxed);
        if let Ok(mut start) = self.start_time.lock() {
            *start = Instant::now();
        }
        self.bytes_bar.reset();
        self.bytes_bar.set_length(total);
    }

    /// Increment bytes hashed
    pub fn increment_bytes(&self, bytes: u64) {
        self.bytes_hashed.fetch_add(bytes, Ordering::Relaxed);
        self.bytes_bar.inc(bytes);
    }

    /// Bytes hashed so far
    pub fn bytes_hashed(&self) -> u64 {
        self.bytes_hashed.load(Ordering::Relaxed)
    }

    /// Get elapsed time
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .lock()
            .map(|start| start.elapsed())
            .unwrap_or_default()
    }

    /// Get current throughput in bytes/second
    pub fn throughput(&self) -> f64 {
        let bytes = self.bytes_hashed();
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            bytes as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Finish progress after a successful digest
    pub fn finish(&self) {
        self.bytes_bar.finish_and_clear();
    }

    /// Leave the bar in place after an error or cancellation
    pub fn abandon(&self) {
        self.bytes_bar.abandon();
    }

    /// Check if progress is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Get progress summary
    pub fn summary(&self) -> ProgressSummary {
        ProgressSummary {
            total_bytes: self.total_bytes.load(Ordering::Relaxed),
            bytes_hashed: self.bytes_hashed(),
            elapsed: self.elapsed(),
            throughput: self.throughput(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Progress summary
#[derive(Debug, Clone)]
pub struct ProgressSummary {
    /// Total bytes to hash
    pub total_bytes: u64,
    /// Bytes hashed so far
    pub bytes_hashed: u64,
    /// Elapsed time
    pub elapsed: Duration,
    /// Throughput in bytes/second
    pub throughput: f64,
}

impl ProgressSummary {
    /// Get completion percentage
    pub fn percentage(&self) -> f64 {
        if self.total_bytes == 0 {
            0.0
        } else {
            (self.bytes_hashed as f64 / self.total_bytes as f64) * 100.0
        }
    }

    /// Print summary to stderr
    pub fn print(&self) {
        eprintln!(
            "Hashed {} in {:.2?} ({}/s)",
            humansize::format_size(self.bytes_hashed, humansize::BINARY),
            self.elapsed,
            humansize::format_size(self.throughput as u64, humansize::BINARY)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_reporter_counts() {
        let progress = ProgressReporter::disabled();
        assert!(!progress.is_enabled());

        progress.set_total_bytes(200);
        progress.increment_bytes(50);
        progress.increment_bytes(50);

        let summary = progress.summary();
        assert_eq!(summary.total_bytes, 200);
        assert_eq!(summary.bytes_hashed, 100);
        assert!((summary.percentage() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_new_total_resets_counts() {
        let progress = ProgressReporter::disabled();
        progress.set_total_bytes(1000);
        progress.increment_bytes(1000);
        progress.finish();

        progress.set_total_bytes(1000);
        assert_eq!(progress.bytes_hashed(), 0);
        progress.increment_bytes(1000);

        let summary = progress.summary();
        assert_eq!(summary.bytes_hashed, 1000);
        assert!((summary.percentage() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_total_percentage() {
        let progress = ProgressReporter::disabled();
        assert_eq!(progress.summary().percentage(), 0.0);
    }
}
