use std::path::PathBuf;

use config::environment::Environment;
use config::shared::ServiceConfig;
use rust_cli_config::{Config, File};

/// Env variable overriding the directory configuration files are read from.
const CONFIG_DIR_ENV_NAME: &str = "APP_CONFIG_DIR";

/// Default directory holding the configuration files.
const DEFAULT_CONFIG_DIR: &str = "configuration";

/// Loads the layered service configuration.
///
/// `base.yaml` is always read, the environment specific overlay
/// (`dev.yaml`/`prod.yaml`) is optional, and `APP_`-prefixed environment
/// variables override both (e.g. `APP_API__PORT=9090`).
pub fn load_service_config() -> anyhow::Result<ServiceConfig> {
    let environment = Environment::load()?;
    let config_dir = std::env::var(CONFIG_DIR_ENV_NAME)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

    let settings = Config::builder()
        .add_source(File::from(config_dir.join("base.yaml")))
        .add_source(File::from(config_dir.join(format!("{environment}.yaml"))).required(false))
        .add_source(
            rust_cli_config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    let config: ServiceConfig = settings.try_deserialize()?;
    config.validate()?;

    Ok(config)
}
