use serde::{Deserialize, Serialize};

use crate::shared::{ApiConfig, DatasetConfig, RefreshConfig, ValidationError};

/// Top level configuration of the cars dictionary service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ServiceConfig {
    /// Raw dataset location and local file path.
    pub dataset: DatasetConfig,
    /// Refresh cycle timing.
    pub refresh: RefreshConfig,
    /// HTTP surface binding.
    pub api: ApiConfig,
}

impl ServiceConfig {
    /// Validates the whole [`ServiceConfig`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.dataset.validate()?;
        self.refresh.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ServiceConfig {
        ServiceConfig {
            dataset: DatasetConfig {
                url: "https://example.com/vehicles.csv".to_owned(),
                file: "data/vehicles.csv".into(),
            },
            refresh: RefreshConfig {
                update_interval_secs: 3600,
                lease_ttl_secs: 30,
            },
            api: ApiConfig {
                host: "127.0.0.1".to_owned(),
                port: 8080,
            },
        }
    }

    #[test]
    fn valid_config_passes_validation() {
        assert_eq!(valid_config().validate(), Ok(()));
    }

    #[test]
    fn empty_dataset_url_is_rejected() {
        let mut config = valid_config();
        config.dataset.url.clear();

        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingDatasetUrl)
        );
    }

    #[test]
    fn zero_update_interval_is_rejected() {
        let mut config = valid_config();
        config.refresh.update_interval_secs = 0;

        assert_eq!(
            config.validate(),
            Err(ValidationError::ZeroUpdateInterval)
        );
    }
}
