//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use memecoin_core::MemeCoinError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Environment variable prefix for overrides, e.g. `MEMECOIN_SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "MEMECOIN";

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `MEMECOIN_` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, MemeCoinError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let config_dir = config_dir.into();
        let environment =
            std::env::var("MEMECOIN_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        let config = load_config(&config_dir, &environment)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, MemeCoinError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), MemeCoinError> {
        let environment = self.config.read().await.app.environment.clone();
        let new_config = load_config(&self.config_dir, &environment)?;
        *self.config.write().await = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Gets a specific configuration value by dotted key path.
    pub async fn get_value<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let config = self.config.read().await;
        let json = serde_json::to_value(&*config).ok()?;

        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }

        serde_json::from_value(current.clone()).ok()
    }
}

/// Loads and validates configuration from `config_dir` for `environment`.
pub fn load_config(config_dir: &str, environment: &str) -> Result<AppConfig, MemeCoinError> {
    info!("Loading configuration for environment: {}", environment);

    let mut builder = Config::builder()
        .set_default("app.environment", environment)
        .map_err(config_error)?;

    for name in ["default", environment, "local"] {
        let path = format!("{config_dir}/{name}.toml");
        if Path::new(&path).exists() {
            debug!("Loading config from: {}", path);
            builder = builder.add_source(File::with_name(&path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("server.cors_origins")
            .try_parsing(true),
    );

    let app_config: AppConfig = builder
        .build()
        .and_then(Config::try_deserialize)
        .map_err(config_error)?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Validates the configuration, reporting every problem in one error.
pub fn validate_config(config: &AppConfig) -> Result<(), MemeCoinError> {
    ConfigValidator::validate(config)
        .map_err(|errors| MemeCoinError::Configuration(format_validation_errors(&errors)))
}

fn config_error(err: ConfigError) -> MemeCoinError {
    MemeCoinError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LogFormat;
    use std::fs;

    #[test]
    fn test_load_without_files_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path().to_str().unwrap(), "test").unwrap();
        assert_eq!(config.app.environment, "test");
        assert_eq!(config.cache.ttl_secs, 900);
    }

    #[test]
    fn test_environment_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[server]\nport = 8081\n\n[cache]\nttl_secs = 60\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("staging.toml"),
            "[server]\nport = 8082\n\n[observability]\nlog_format = \"json\"\n",
        )
        .unwrap();

        let config = load_config(dir.path().to_str().unwrap(), "staging").unwrap();
        assert_eq!(config.server.port, 8082);
        assert_eq!(config.cache.ttl_secs, 60);
        assert_eq!(config.observability.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[cache]\nttl_secs = 0\n").unwrap();

        let err = load_config(dir.path().to_str().unwrap(), "development").unwrap_err();
        match err {
            MemeCoinError::Configuration(msg) => assert!(msg.contains("cache.ttl_secs")),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_value_by_path() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ConfigLoader::new(dir.path().to_str().unwrap()).unwrap();

        let port: Option<u16> = loader.get_value("server.port").await;
        assert_eq!(port, Some(8080));
        let missing: Option<u16> = loader.get_value("server.nope").await;
        assert!(missing.is_none());
    }
}
