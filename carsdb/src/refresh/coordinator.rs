//! The refresh cycle state machine.

use std::fmt;

use config::shared::{DatasetConfig, RefreshConfig};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

use crate::carsdb_error;
use crate::error::{CarsDbResult, ErrorKind};
use crate::ingest::dedup::Deduplicator;
use crate::ingest::parser::ColumnMap;
use crate::refresh::lease::RefreshLease;
use crate::refresh::source::DatasetSource;
use crate::snapshot::Snapshot;
use crate::store::SnapshotStore;

/// Phases of one refresh cycle, in transition order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPhase {
    Idle,
    Locking,
    Updating,
    Loading,
    Indexing,
    Published,
}

impl fmt::Display for RefreshPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RefreshPhase::Idle => "idle",
            RefreshPhase::Locking => "locking",
            RefreshPhase::Updating => "updating",
            RefreshPhase::Loading => "loading",
            RefreshPhase::Indexing => "indexing",
            RefreshPhase::Published => "published",
        };

        write!(f, "{name}")
    }
}

/// Outcome of one refresh cycle.
///
/// The report makes every transition of the cycle observable, so each branch
/// of the state machine can be asserted on with fake lease and source
/// outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Whether this process held the refresh lease for the cycle.
    pub leader: bool,
    /// Whether the raw dataset file was refreshed from the remote source.
    pub refreshed: bool,
    /// Number of canonical records in the published snapshot.
    pub records: usize,
}

/// Owner of the ingest, dedup and index pipeline.
///
/// Runs the pipeline once per cycle and atomically publishes the resulting
/// snapshot. Never patches a published snapshot: every cycle builds a brand
/// new one from the local dataset file.
#[derive(Debug)]
pub struct RefreshCoordinator<L, S> {
    dataset: DatasetConfig,
    refresh: RefreshConfig,
    lease: L,
    source: S,
    store: SnapshotStore,
    first_cycle: bool,
}

impl<L, S> RefreshCoordinator<L, S>
where
    L: RefreshLease,
    S: DatasetSource,
{
    /// Creates a coordinator publishing into the given store.
    pub fn new(
        dataset: DatasetConfig,
        refresh: RefreshConfig,
        lease: L,
        source: S,
        store: SnapshotStore,
    ) -> Self {
        Self {
            dataset,
            refresh,
            lease,
            source,
            store,
            first_cycle: true,
        }
    }

    /// Returns the configured interval between cycles.
    pub fn update_interval(&self) -> std::time::Duration {
        self.refresh.update_interval()
    }

    /// Runs one full refresh cycle.
    ///
    /// A failed raw data retrieval is logged and the cycle continues from the
    /// existing local file. A missing or unreadable local file fails the
    /// cycle; the caller keeps the previously published snapshot and retries
    /// on the next tick.
    pub async fn run_cycle(&mut self) -> CarsDbResult<CycleReport> {
        debug!(phase = %RefreshPhase::Locking, "attempting to acquire the refresh lease");

        // A failing lease backend must not stop the rebuild: we degrade to a
        // non leader cycle and rebuild from the local file.
        let leader = match self.lease.try_acquire(self.refresh.lease_ttl()).await {
            Ok(leader) => leader,
            Err(err) => {
                warn!("refresh lease backend failed, proceeding without the lease: {err}");

                false
            }
        };

        let refreshed = if leader {
            self.update_raw_data().await
        } else {
            debug!("refresh lease is held elsewhere, loading the existing local file");

            false
        };
        self.first_cycle = false;

        debug!(phase = %RefreshPhase::Loading, file = %self.dataset.file.display(), "loading dataset");
        let snapshot = self.load_snapshot().await?;
        let records = snapshot.records().len();

        debug!(phase = %RefreshPhase::Published, records, "publishing snapshot");
        self.store.publish(snapshot);

        Ok(CycleReport {
            leader,
            refreshed,
            records,
        })
    }

    /// Refreshes the raw dataset file while holding the lease.
    ///
    /// On the first cycle the file is only fetched when missing, matching a
    /// process that restarts with a dataset already on disk. Afterwards every
    /// leader cycle re-fetches. Returns whether the file was refreshed.
    async fn update_raw_data(&self) -> bool {
        let exists = tokio::fs::try_exists(&self.dataset.file)
            .await
            .unwrap_or(false);
        if self.first_cycle && exists {
            return false;
        }

        debug!(phase = %RefreshPhase::Updating, url = %self.dataset.url, "updating raw dataset");

        match self.source.refresh(&self.dataset.file).await {
            Ok(()) => {
                info!("raw dataset updated from '{}'", self.dataset.url);

                true
            }
            Err(err) => {
                // The published snapshot stays untouched; the cycle continues
                // from whatever file exists locally.
                warn!("raw dataset update failed: {err}");

                false
            }
        }
    }

    /// Streams the dataset file through the ingestion pipeline into a fresh
    /// snapshot.
    async fn load_snapshot(&self) -> CarsDbResult<Snapshot> {
        let file = tokio::fs::File::open(&self.dataset.file)
            .await
            .map_err(|err| {
                carsdb_error!(
                    ErrorKind::DatasetIoError,
                    "Failed to open the dataset file",
                    self.dataset.file.display(),
                    source: err
                )
            })?;

        let mut lines = BufReader::new(file).lines();

        let header = lines.next_line().await.map_err(|err| {
            carsdb_error!(
                ErrorKind::DatasetIoError,
                "Failed to read the dataset header",
                source: err
            )
        })?;
        let Some(header) = header else {
            // An empty file carries no records; it builds an empty snapshot
            // rather than failing the cycle.
            warn!("dataset file is empty");

            return Ok(Snapshot::empty());
        };

        let columns = ColumnMap::from_header(&header);
        if !columns.is_complete() {
            warn!("dataset header does not carry all consumed columns, rows will be dropped");
        }

        let mut dedup = Deduplicator::new();
        let mut rejected: usize = 0;
        let mut read: usize = 0;

        loop {
            let line = lines.next_line().await.map_err(|err| {
                carsdb_error!(
                    ErrorKind::DatasetIoError,
                    "Failed to read a dataset line",
                    source: err
                )
            })?;
            let Some(line) = line else {
                break;
            };

            read += 1;
            match columns.parse_row(&line) {
                Some(row) => dedup.fold(row),
                None => rejected += 1,
            }
        }

        debug!(phase = %RefreshPhase::Indexing, records = dedup.len(), "indexing records");
        info!(
            "loaded dataset: {read} rows read, {rejected} rejected, {} canonical records",
            dedup.len()
        );

        Ok(Snapshot::build(dedup.into_records()))
    }
}
