//! Shared fixtures for the integration tests.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use carsdb::carsdb_error;
use carsdb::error::{CarsDbResult, ErrorKind};
use carsdb::refresh::{DatasetSource, RefreshLease};
use config::shared::{DatasetConfig, RefreshConfig};

/// Builds a dataset in the on disk format, with ignored columns around the
/// consumed ones.
pub fn vehicles_csv(rows: &[(&str, &str, &str, &str)]) -> String {
    let mut out = String::from("barrels08,make,model,VClass,year,trany\n");
    for (make, model, class, year) in rows {
        out.push_str(&format!("14.2,{make},{model},{class},{year},Manual\n"));
    }

    out
}

/// Returns a dataset config pointing at the given local file.
pub fn dataset_config(file: impl Into<PathBuf>) -> DatasetConfig {
    DatasetConfig {
        url: "https://example.com/vehicles.csv".to_owned(),
        file: file.into(),
    }
}

/// Returns a refresh config with timings suitable for tests.
pub fn refresh_config() -> RefreshConfig {
    RefreshConfig {
        update_interval_secs: 1,
        lease_ttl_secs: 30,
    }
}

/// Lease that is always held elsewhere.
#[derive(Debug, Clone)]
pub struct DeniedLease;

impl RefreshLease for DeniedLease {
    async fn try_acquire(&self, _ttl: Duration) -> CarsDbResult<bool> {
        Ok(false)
    }
}

/// Lease that is always granted.
#[derive(Debug, Clone)]
pub struct GrantedLease;

impl RefreshLease for GrantedLease {
    async fn try_acquire(&self, _ttl: Duration) -> CarsDbResult<bool> {
        Ok(true)
    }
}

/// Dataset source that writes fixed content and counts its invocations.
#[derive(Debug, Clone)]
pub struct StaticDatasetSource {
    content: String,
    calls: Arc<AtomicUsize>,
}

impl StaticDatasetSource {
    pub fn new(content: String) -> Self {
        Self {
            content,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of completed retrievals.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DatasetSource for StaticDatasetSource {
    async fn refresh(&self, target: &Path) -> CarsDbResult<()> {
        tokio::fs::write(target, &self.content).await.map_err(|err| {
            carsdb_error!(
                ErrorKind::DatasetIoError,
                "Failed to write the test dataset",
                source: err
            )
        })?;
        self.calls.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}

/// Dataset source whose retrieval always fails.
#[derive(Debug, Clone)]
pub struct FailingDatasetSource;

impl DatasetSource for FailingDatasetSource {
    async fn refresh(&self, _target: &Path) -> CarsDbResult<()> {
        Err(carsdb_error!(
            ErrorKind::FetchFailed,
            "Simulated retrieval failure"
        ))
    }
}
