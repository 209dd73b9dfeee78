use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::shared::ValidationError;

/// Configuration for the periodic refresh cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RefreshConfig {
    /// Seconds between two refresh cycles.
    pub update_interval_secs: u64,
    /// Seconds the raw data refresh lease is held before it expires.
    ///
    /// Must exceed the expected duration of a dataset retrieval, otherwise a
    /// second process may start a concurrent retrieval of the same file.
    pub lease_ttl_secs: u64,
}

impl RefreshConfig {
    /// Returns the interval between refresh cycles.
    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_secs)
    }

    /// Returns the lease time-to-live.
    pub fn lease_ttl(&self) -> Duration {
        Duration::from_secs(self.lease_ttl_secs)
    }

    /// Validates the [`RefreshConfig`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.update_interval_secs == 0 {
            return Err(ValidationError::ZeroUpdateInterval);
        }

        if self.lease_ttl_secs == 0 {
            return Err(ValidationError::ZeroLeaseTtl);
        }

        Ok(())
    }
}
