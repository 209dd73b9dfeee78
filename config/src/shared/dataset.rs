use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Configuration for the raw vehicles dataset.
///
/// The dataset is a delimited text file retrieved from a remote location and
/// stored at a known local path. Retrieval mechanics are deployment concerns;
/// the core only consumes the local file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DatasetConfig {
    /// Remote location the dataset is retrieved from.
    pub url: String,
    /// Local path of the delimited dataset file.
    pub file: PathBuf,
}

impl DatasetConfig {
    /// Validates the [`DatasetConfig`].
    ///
    /// Both the retrieval location and the local file path must be non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::MissingDatasetUrl);
        }

        if self.file.as_os_str().is_empty() {
            return Err(ValidationError::MissingDatasetFile);
        }

        Ok(())
    }
}
