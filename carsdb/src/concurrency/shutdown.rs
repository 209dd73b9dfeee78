//! Broadcast based shutdown signaling.
//!
//! A single shutdown signal terminates every subscribed worker. The channel
//! carries no payload; subscribers wait on a change notification and complete
//! their current cycle before terminating.

use std::sync::Arc;

use tokio::sync::watch;

/// Receiver side of the shutdown channel.
pub type ShutdownRx = watch::Receiver<()>;

/// Transmitter side of the shutdown channel.
#[derive(Debug, Clone)]
pub struct ShutdownTx(Arc<watch::Sender<()>>);

impl ShutdownTx {
    /// Signals shutdown to all subscribers.
    ///
    /// Fails when no subscriber is alive anymore, which callers may treat as
    /// already shut down.
    pub fn shutdown(&self) -> Result<(), watch::error::SendError<()>> {
        self.0.send(())
    }

    /// Creates a new receiver subscribed to this channel.
    pub fn subscribe(&self) -> ShutdownRx {
        self.0.subscribe()
    }
}

/// Creates a new shutdown channel pair.
pub fn create_shutdown_channel() -> (ShutdownTx, ShutdownRx) {
    let (tx, rx) = watch::channel(());

    (ShutdownTx(Arc::new(tx)), rx)
}
