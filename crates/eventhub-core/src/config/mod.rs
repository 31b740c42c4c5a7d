//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a default so an empty file is a valid config.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod registration;
pub mod store;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::registration::RegistrationConfig;
pub use self::store::{StoreBackend, StoreConfig};

use crate::error::AppError;

/// Prefix for environment variable overrides, e.g. `EVENTHUB__DATABASE__URL`.
pub const ENV_PREFIX: &str = "EVENTHUB";

/// Root application configuration.
///
/// Top-level deserialization target for the merged configuration sources
/// (base file + environment overlay + environment variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Which store backs the ledger and registry.
    #[serde(default)]
    pub store: StoreConfig,
    /// Verified identity settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Registration retry settings.
    #[serde(default)]
    pub registration: RegistrationConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration.
    ///
    /// Merges the base file at `path`, an optional `config/{env}` overlay
    /// and environment variables prefixed with `EVENTHUB__`.
    pub fn load(path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an inline TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
            .map_err(AppError::from)
    }
}
