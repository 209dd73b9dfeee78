//! Retrieval of the raw dataset file.

use std::future::Future;
use std::path::Path;

use crate::error::{CarsDbResult, ErrorKind};
use crate::{bail, carsdb_error};

/// Produces or replaces the local dataset file.
///
/// Retrieval mechanics are opaque to the refresh cycle: the only contract is
/// that a successful call leaves a readable dataset file at the target path,
/// and that a failed call leaves whatever file existed before untouched.
pub trait DatasetSource {
    /// Retrieves the dataset into the target path, replacing any prior copy.
    fn refresh(&self, target: &Path) -> impl Future<Output = CarsDbResult<()>> + Send;
}

/// Dataset source downloading the delimited file over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDatasetSource {
    url: String,
    client: reqwest::Client,
}

impl HttpDatasetSource {
    /// Creates a source downloading from the given location.
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

impl DatasetSource for HttpDatasetSource {
    async fn refresh(&self, target: &Path) -> CarsDbResult<()> {
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|err| {
                carsdb_error!(
                    ErrorKind::DatasetIoError,
                    "Failed to create the dataset directory",
                    source: err
                )
            })?;
        }

        let response = self.client.get(&self.url).send().await.map_err(|err| {
            carsdb_error!(
                ErrorKind::FetchFailed,
                "Failed to download the dataset",
                self.url.clone(),
                source: err
            )
        })?;

        if !response.status().is_success() {
            bail!(
                ErrorKind::FetchFailed,
                "Dataset download returned an error status",
                response.status()
            );
        }

        let body = response.bytes().await.map_err(|err| {
            carsdb_error!(
                ErrorKind::FetchFailed,
                "Failed to read the dataset response body",
                source: err
            )
        })?;

        // The write is not atomic with respect to concurrent readers of the
        // file; the refresh cycle reads it only after this call returns.
        tokio::fs::write(target, &body).await.map_err(|err| {
            carsdb_error!(
                ErrorKind::DatasetIoError,
                "Failed to write the dataset file",
                source: err
            )
        })?;

        Ok(())
    }
}
