//! Session shutdown signal.

use tokio::sync::watch;
use tracing::{debug, instrument};

/// One-shot signal raised when the user quits.
///
/// Raising it does not stop anything by itself; whoever owns the session
/// awaits [`ShutdownSignal::wait`] and tears things down.
#[derive(Debug)]
pub struct ShutdownSignal {
    tx: watch::Sender<bool>,
}

impl ShutdownSignal {
    /// Creates a signal that has not been raised.
    #[instrument]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Raises the signal. Raising it again is a no-op.
    #[instrument(skip(self))]
    pub fn trigger(&self) {
        let already = self.tx.send_replace(true);
        debug!(already, "Shutdown requested");
    }

    /// Returns `true` once the signal has been raised.
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolves once the signal has been raised.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so the channel cannot close while we wait.
        let _ = rx.wait_for(|raised| *raised).await;
    }
}

impl Default for ShutdownSignal {
    fn default() -> Self {
        Self::new()
    }
}
