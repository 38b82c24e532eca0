//! inventory-service - stores products, seeds three on startup and prints
//! the stored set.

pub mod app;
pub mod config;
pub mod entity;
pub mod repository;
pub mod seed;

pub use config::Config;
pub use entity::Product;
pub use repository::SqliteProductRepository;

use sqlx::migrate::Migrator;

/// Embedded schema migrations for the product store.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
