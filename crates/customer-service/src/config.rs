//! customer-service configuration.

use serde::Deserialize;
use storefront::config::{self, ConfigError, HttpConfig, LogConfig, StorageConfig};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "CUSTOMER_SERVICE_CONFIG";

/// Configuration file read when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "customer-service.toml";

/// Service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage")]
    pub storage: StorageConfig,
    /// Optional read-only HTTP surface.
    pub http: Option<HttpConfig>,
    #[serde(default)]
    pub log: LogConfig,
    /// The `[customer]` table.
    #[serde(default)]
    pub customer: CustomerSection,
}

/// The `[customer]` table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerSection {
    #[serde(default)]
    pub params: CustomerConfigParam,
}

/// Settings bound from `[customer.params]`. Loaded and logged, never acted on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerConfigParam {
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub y: i32,
}

fn default_storage() -> StorageConfig {
    StorageConfig::sqlite("customer-service.db")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            http: None,
            log: LogConfig::default(),
            customer: CustomerSection::default(),
        }
    }
}

impl Config {
    /// Load from a TOML file.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        config::load(path)
    }

    /// Load from the file named by [`CONFIG_ENV`], falling back to
    /// [`DEFAULT_CONFIG_FILE`] and then to built-in defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        config::load_from_env(CONFIG_ENV, DEFAULT_CONFIG_FILE)
    }
}
