//! Configuration loader with layered sources.

use crate::{AppConfig, DEFAULT_JWT_SECRET};
use config::{Config, ConfigError, Environment, File};
use seatbook_core::SeatbookError;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Environment variable selecting the `config/{environment}.toml` layer.
pub const ENVIRONMENT_VAR: &str = "SEATBOOK_ENVIRONMENT";

/// Prefix of environment variable overrides, e.g. `SEATBOOK__CACHE__BACKEND`.
pub const ENV_PREFIX: &str = "SEATBOOK";

/// Configuration loader with layered sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    environment: Option<String>,
}

impl ConfigLoader {
    /// Creates a new configuration loader reading from `config_dir`.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides, not committed
    /// 4. Environment variables with `SEATBOOK__` prefix
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            environment: None,
        }
    }

    /// Loader for the default location (`./config`).
    #[must_use]
    pub fn from_default_location() -> Self {
        Self::new("./config")
    }

    /// Pins the environment layer instead of reading `SEATBOOK_ENVIRONMENT`.
    #[must_use]
    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(environment.into());
        self
    }

    /// Loads, merges, and validates the configuration.
    pub fn load(&self) -> Result<AppConfig, SeatbookError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = self.environment.clone().unwrap_or_else(|| {
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string())
        });

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for layer in ["default", environment.as_str(), "local"] {
            let path = self.config_dir.join(format!("{layer}.toml"));
            if Path::new(&path).exists() {
                debug!("Loading config layer from: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("app.environment", environment.as_str())
            .map_err(config_error_to_seatbook_error)?;

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error_to_seatbook_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

/// Validates the configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), SeatbookError> {
    if config.app.is_production() && config.security.jwt_secret == DEFAULT_JWT_SECRET {
        warn!("Using default JWT secret in production! This is a security risk.");
    }

    if config.database.url.is_empty() {
        return Err(SeatbookError::Configuration(
            "Database URL is required".to_string(),
        ));
    }

    if config.cache.default_ttl_secs == 0 {
        return Err(SeatbookError::Configuration(
            "cache.default_ttl_secs must be positive".to_string(),
        ));
    }

    if config.cache.operation_timeout_ms == 0 {
        return Err(SeatbookError::Configuration(
            "cache.operation_timeout_ms must be positive".to_string(),
        ));
    }

    if config.security.jwt_secret.is_empty() {
        return Err(SeatbookError::Configuration(
            "security.jwt_secret must not be empty".to_string(),
        ));
    }

    Ok(())
}

fn config_error_to_seatbook_error(err: ConfigError) -> SeatbookError {
    SeatbookError::Configuration(err.to_string())
}
