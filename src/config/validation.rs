//! Configuration validation.
//!
//! Validates the shared sections at startup to catch common errors early.

use super::{StorageBackend, StorageConfig};
use crate::db::MEMORY_PATH;
use std::path::Path;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("storage.path is required for the sqlite backend")]
    MissingDatabasePath,
    #[error("storage.path points at a directory: {0}")]
    DatabasePathIsDirectory(String),
}

/// Validate the storage section, returning all errors found.
pub fn validate(storage: &StorageConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if storage.backend == StorageBackend::Sqlite {
        let path = storage.path.trim();
        if path.is_empty() {
            errors.push(ValidationError::MissingDatabasePath);
        } else if path != MEMORY_PATH && Path::new(path).is_dir() {
            errors.push(ValidationError::DatabasePathIsDirectory(storage.path.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
