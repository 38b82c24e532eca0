//! customer-service - stores customers and seeds three on startup.

pub mod app;
pub mod config;
pub mod entity;
pub mod repository;
pub mod seed;

pub use config::{Config, CustomerConfigParam};
pub use entity::Customer;
pub use repository::SqliteCustomerRepository;

use sqlx::migrate::Migrator;

/// Embedded schema migrations for the customer store.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
