//! Shutdown coordination.

use tokio::sync::broadcast;

/// Coordinator for graceful shutdown.
///
/// Hands out [`ShutdownHandle`]s that long-running tasks can await; a
/// single `trigger` resolves all of them.
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    /// Create a handle that resolves when shutdown is triggered.
    pub fn handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            rx: self.tx.subscribe(),
        }
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        let _ = self.tx.send(());
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// One subscriber to the shutdown signal.
pub struct ShutdownHandle {
    rx: broadcast::Receiver<()>,
}

impl ShutdownHandle {
    /// Resolve when shutdown is triggered.
    ///
    /// Also resolves if the coordinator is dropped, so a handle can never
    /// wait forever on a dead process.
    pub async fn wait(mut self) {
        let _ = self.rx.recv().await;
    }
}
