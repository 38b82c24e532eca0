//! storefront - shared plumbing for the storefront microservices.
//!
//! Each service owns one entity, a repository over it and a bootstrap seed.
//! This crate holds the parts they share: the SQLite handle, the repository
//! traits, the seed runner, configuration, tracing and the HTTP surface.

pub mod config;
pub mod db;
pub mod error;
pub mod http;
pub mod repository;
pub mod seed;
pub mod storage;
pub mod telemetry;

pub use db::Database;
pub use error::{ApiError, SeedError, StorageError};
pub use repository::{Entity, MemoryRepository, Repository};
pub use storage::Storage;
