//! Cooperative cancellation for long-running digests

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared cancellation flag
///
/// Clones share the same flag. The digest engine checks it before every
/// chunk read and aborts with [`DigestError::Cancelled`](crate::error::DigestError::Cancelled)
/// once it is set. A cancelled token stays cancelled.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Cancel this token after `timeout` from a detached watchdog thread
    pub fn cancel_after(&self, timeout: Duration) {
        let token = self.clone();
        std::thread::spawn(move || {
            std::thread::sleep(timeout);
            if !token.is_cancelled() {
                tracing::debug!("Deadline of {:?} reached, cancelling", timeout);
                token.cancel();
            }
        });
    }

    /// Get the underlying flag for external control
    pub fn flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }
}
