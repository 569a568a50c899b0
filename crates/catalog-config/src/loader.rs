//! Configuration loader with layered sources.

use crate::{AppConfig, ConfigValidator};
use catalog_core::CatalogError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info, warn};

/// Conventional deployment variables and the configuration keys they set.
const CONVENTIONAL_OVERRIDES: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("DATABASE_URL", "database.url"),
    ("REDIS_URL", "redis.url"),
];

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `CATALOG_` prefix (`CATALOG_SERVER__PORT`)
    /// 5. `PORT`, `DATABASE_URL` and `REDIS_URL`
    pub fn new(config_dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let env: HashMap<String, String> = std::env::vars().collect();
        let config = Self::load_config(config_dir.as_ref(), &env)?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, CatalogError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// Loads configuration from `config_dir`, reading variables from `env`.
    pub fn load_config(
        config_dir: &Path,
        env: &HashMap<String, String>,
    ) -> Result<AppConfig, CatalogError> {
        let environment = env
            .get("CATALOG_ENVIRONMENT")
            .cloned()
            .unwrap_or_else(|| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!("Loading config from: {}", path.display());
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("CATALOG")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(Some(env.clone().into_iter().collect())),
        );

        builder = Self::apply_conventional_overrides(builder, env).map_err(config_error)?;

        let mut app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error)?;
        app_config.app.environment = environment;

        if let Err(errors) = ConfigValidator::validate(&app_config) {
            for error in &errors {
                warn!("Invalid configuration: {}", error);
            }
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(CatalogError::Configuration(message));
        }

        Ok(app_config)
    }

    fn apply_conventional_overrides(
        mut builder: ConfigBuilder<DefaultState>,
        env: &HashMap<String, String>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        for (var, key) in CONVENTIONAL_OVERRIDES {
            let value = env.get(*var).filter(|v| !v.trim().is_empty()).cloned();
            if value.is_some() {
                debug!("Applying {} to {}", var, key);
            }
            builder = builder.set_override_option(*key, value)?;
        }
        Ok(builder)
    }
}

fn config_error(err: ConfigError) -> CatalogError {
    CatalogError::Configuration(err.to_string())
}
