//! Periodic rebuild of the dictionary and publication of new snapshots.
//!
//! The refresh path is a timer driven state machine per process:
//!
//! `Idle -> Locking -> (Updating)? -> Loading -> Indexing -> Published -> Idle`
//!
//! Only the raw data retrieval is coordinated across processes, through a
//! leased, auto expiring lock. Everything else runs independently per process
//! against the local dataset file.

pub mod coordinator;
pub mod lease;
pub mod source;
pub mod worker;

pub use coordinator::{CycleReport, RefreshCoordinator, RefreshPhase};
pub use lease::{ProcessLease, RefreshLease};
pub use source::{DatasetSource, HttpDatasetSource};
pub use worker::{RefreshWorker, RefreshWorkerHandle};
