//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: shared config sections (StorageConfig, HttpConfig, LogConfig) and loading
//! - [`defaults`]: serde default functions
//! - [`validation`]: startup checks over the shared sections

mod defaults;
mod types;
mod validation;

pub use types::{
    ConfigError, HttpConfig, LogConfig, LogFormat, StorageBackend, StorageConfig, load,
    load_from_env,
};
pub use validation::{ValidationError, validate};
