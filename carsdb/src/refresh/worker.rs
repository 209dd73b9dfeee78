//! Background worker driving refresh cycles on a timer.

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::carsdb_error;
use crate::concurrency::shutdown::ShutdownRx;
use crate::error::{CarsDbResult, ErrorKind};
use crate::refresh::coordinator::RefreshCoordinator;
use crate::refresh::lease::RefreshLease;
use crate::refresh::source::DatasetSource;

/// Timer driven wrapper around a [`RefreshCoordinator`].
///
/// The worker runs one cycle immediately on start, then one per configured
/// interval. Cycles are not cancellable mid flight but are self terminating;
/// a failed cycle is logged and never prevents the next scheduled attempt.
#[derive(Debug)]
pub struct RefreshWorker<L, S> {
    coordinator: RefreshCoordinator<L, S>,
    shutdown_rx: ShutdownRx,
}

impl<L, S> RefreshWorker<L, S>
where
    L: RefreshLease + Send + Sync + 'static,
    S: DatasetSource + Send + Sync + 'static,
{
    /// Creates a worker driving the given coordinator.
    pub fn new(coordinator: RefreshCoordinator<L, S>, shutdown_rx: ShutdownRx) -> Self {
        Self {
            coordinator,
            shutdown_rx,
        }
    }

    /// Starts the worker and returns a handle for awaiting its termination.
    pub fn start(self) -> RefreshWorkerHandle {
        let Self {
            mut coordinator,
            mut shutdown_rx,
        } = self;

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(coordinator.update_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = shutdown_rx.changed() => {
                        info!("refresh worker received shutdown signal");

                        break;
                    }
                    _ = ticker.tick() => {
                        match coordinator.run_cycle().await {
                            Ok(report) => info!(
                                leader = report.leader,
                                refreshed = report.refreshed,
                                records = report.records,
                                "refresh cycle completed"
                            ),
                            // The previously published snapshot stays
                            // authoritative until a later cycle succeeds.
                            Err(err) => error!("refresh cycle failed: {err}"),
                        }
                    }
                }
            }
        });

        RefreshWorkerHandle { handle }
    }
}

/// Handle for awaiting a running [`RefreshWorker`].
#[derive(Debug)]
pub struct RefreshWorkerHandle {
    handle: JoinHandle<()>,
}

impl RefreshWorkerHandle {
    /// Waits for the worker to terminate.
    ///
    /// Returns an error only when the worker task panicked.
    pub async fn wait(self) -> CarsDbResult<()> {
        self.handle.await.map_err(|err| {
            carsdb_error!(
                ErrorKind::RefreshWorkerPanic,
                "The refresh worker task terminated abnormally",
                source: err
            )
        })
    }
}
