//! Publication point for the active snapshot.
//!
//! The active snapshot reference is the single shared resource between the
//! refresh path and the query path. It is replaced, never edited, so readers
//! observe either the fully old or the fully new snapshot. The store wraps a
//! watch channel: the refresh coordinator is the only writer, query side
//! components hold receivers and read the reference exactly once per
//! operation.

use std::sync::Arc;

use tokio::sync::watch;

use crate::snapshot::Snapshot;

/// Receiver side of the snapshot store.
///
/// Cloning a [`SnapshotRx`] is cheap; each query operation should call
/// [`watch::Receiver::borrow`] once and clone the inner [`Arc`] out of it.
pub type SnapshotRx = watch::Receiver<Arc<Snapshot>>;

/// Owner of the active snapshot reference.
///
/// Created with an empty snapshot so queries are answerable before the first
/// ingestion pass completes.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    tx: Arc<watch::Sender<Arc<Snapshot>>>,
}

impl SnapshotStore {
    /// Creates a store publishing the empty snapshot.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(Snapshot::empty()));

        Self { tx: Arc::new(tx) }
    }

    /// Atomically replaces the active snapshot.
    ///
    /// The previous snapshot stays alive for as long as in-flight operations
    /// hold their [`Arc`] to it and is dropped afterwards.
    pub fn publish(&self, snapshot: Snapshot) {
        self.tx.send_replace(Arc::new(snapshot));
    }

    /// Returns the currently published snapshot.
    pub fn current(&self) -> Arc<Snapshot> {
        self.tx.borrow().clone()
    }

    /// Creates a new receiver handle for the query side.
    pub fn subscribe(&self) -> SnapshotRx {
        self.tx.subscribe()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
