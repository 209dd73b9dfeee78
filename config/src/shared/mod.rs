mod api;
mod dataset;
mod refresh;
mod service;

pub use api::*;
pub use dataset::*;
pub use refresh::*;
pub use service::*;

use thiserror::Error;

/// Errors raised when validating configuration values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("the dataset url must not be empty")]
    MissingDatasetUrl,

    #[error("the dataset file path must not be empty")]
    MissingDatasetFile,

    #[error("the refresh interval must be greater than zero")]
    ZeroUpdateInterval,

    #[error("the lease ttl must be greater than zero")]
    ZeroLeaseTtl,
}
