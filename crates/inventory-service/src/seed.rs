//! Startup seed for the product store.

use crate::entity::Product;
use std::io::Write;
use storefront::seed::{report_all, seed_all};
use storefront::{Repository, SeedError};
use tracing::Instrument;

/// The literal products inserted at startup, each with a fresh random id.
pub fn records() -> Vec<Product> {
    vec![
        Product::with_random_id("Laptop", 1000.0, 299),
        Product::with_random_id("Smartphone", 500.0, 450),
        Product::with_random_id("Headphones", 150.0, 120),
    ]
}

/// Save the seed products, then write every stored product to `out`, one
/// per line, in store order.
pub async fn run<W: Write>(
    repo: &dyn Repository<Product>,
    out: &mut W,
) -> Result<Vec<Product>, SeedError> {
    seed_and_report(repo, out)
        .instrument(storefront::telemetry::spans::seed("product"))
        .await
}

async fn seed_and_report<W: Write>(
    repo: &dyn Repository<Product>,
    out: &mut W,
) -> Result<Vec<Product>, SeedError> {
    let saved = seed_all(repo, records()).await?;
    report_all(repo, out).await?;
    Ok(saved)
}
