//! Shared configuration sections and loading.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use super::defaults::{default_database_path, default_http_address};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load a configuration from a TOML file.
pub fn load<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load the configuration named by `env_var`, or `default_file` when the
/// variable is unset.
///
/// An explicitly named file must exist. A missing default file yields the
/// built-in defaults.
pub fn load_from_env<T: DeserializeOwned + Default>(
    env_var: &str,
    default_file: &str,
) -> Result<T, ConfigError> {
    match std::env::var(env_var) {
        Ok(path) => load(path),
        Err(_) if Path::new(default_file).exists() => load(default_file),
        Err(_) => Ok(T::default()),
    }
}

/// Which store backs a service's repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite via SQLx (file or `:memory:`).
    #[default]
    Sqlite,
    /// Process-local store, lost on exit.
    Memory,
}

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Path to SQLite database file, or `:memory:`.
    #[serde(default = "default_database_path")]
    pub path: String,
}

impl StorageConfig {
    /// SQLite storage at `path`.
    pub fn sqlite(path: impl Into<String>) -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            path: path.into(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::sqlite(default_database_path())
    }
}

/// Read-only HTTP surface configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Address to bind to (e.g., "127.0.0.1:8080").
    #[serde(default = "default_http_address")]
    pub address: SocketAddr,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration. Filtering comes from `RUST_LOG`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[derive(Debug, Default, Deserialize)]
    struct Sample {
        #[serde(default)]
        storage: StorageConfig,
        http: Option<HttpConfig>,
        #[serde(default)]
        log: LogConfig,
    }

    #[test]
    fn storage_defaults_to_sqlite_file() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::Sqlite);
        assert_eq!(config.path, "storefront.db");
    }

    #[test]
    fn empty_document_uses_defaults() {
        let sample: Sample = toml::from_str("").unwrap();
        assert_eq!(sample.storage.backend, StorageBackend::Sqlite);
        assert!(sample.http.is_none());
        assert_eq!(sample.log.format, LogFormat::Pretty);
    }

    #[test]
    fn parses_all_sections() {
        let sample: Sample = toml::from_str(
            r#"
            [storage]
            backend = "memory"

            [http]
            address = "0.0.0.0:9000"

            [log]
            format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(sample.storage.backend, StorageBackend::Memory);
        assert_eq!(sample.storage.path, "storefront.db");
        assert_eq!(sample.http.unwrap().address.port(), 9000);
        assert_eq!(sample.log.format, LogFormat::Json);
    }

    #[test]
    fn http_section_without_address_uses_default() {
        let sample: Sample = toml::from_str("[http]\n").unwrap();
        assert_eq!(sample.http.unwrap().address, default_http_address());
    }

    #[test]
    fn unknown_backend_is_a_parse_error() {
        let result: Result<Sample, _> = toml::from_str("[storage]\nbackend = \"oracle\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\npath = \"/tmp/x.db\"").unwrap();
        let sample: Sample = load(file.path()).unwrap();
        assert_eq!(sample.storage.path, "/tmp/x.db");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let result: Result<Sample, _> = load("/nonexistent/storefront.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn load_from_env_falls_back_to_defaults() {
        let sample: Sample = load_from_env(
            "STOREFRONT_TEST_CONFIG_NEVER_SET",
            "/nonexistent/storefront.toml",
        )
        .unwrap();
        assert_eq!(sample.storage.path, "storefront.db");
    }

    #[test]
    fn load_from_env_reads_existing_default_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[log]\nformat = \"json\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();
        let sample: Sample = load_from_env("STOREFRONT_TEST_CONFIG_NEVER_SET", &path).unwrap();
        assert_eq!(sample.log.format, LogFormat::Json);
    }
}
