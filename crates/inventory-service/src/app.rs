//! Service lifecycle: open storage, seed and report, serve, release.

use crate::MIGRATOR;
use crate::config::Config;
use crate::entity::Product;
use crate::repository::SqliteProductRepository;
use crate::seed;
use std::io::Write;
use storefront::config::validate;
use storefront::telemetry::spans;
use storefront::{SeedError, Storage, http};
use tracing::{Instrument, debug, error, info};

/// Validate the configuration, open storage, seed the products and write
/// the stored products to `out`.
///
/// On a seed failure the store is released before the error is returned.
pub async fn bootstrap<W: Write>(
    config: &Config,
    out: &mut W,
) -> anyhow::Result<Storage<Product>> {
    open_and_seed(config, out)
        .instrument(spans::startup("inventory-service"))
        .await
}

async fn open_and_seed<W: Write>(
    config: &Config,
    out: &mut W,
) -> anyhow::Result<Storage<Product>> {
    if let Err(errors) = validate(&config.storage) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("invalid configuration ({} errors)", errors.len());
    }
    debug!(?config, "Configuration loaded");

    let storage =
        Storage::<Product>::open(&config.storage, &MIGRATOR, SqliteProductRepository::new)
            .await?;
    let repo = storage.repository();

    match seed::run(repo.as_ref(), out).await {
        Ok(saved) => {
            info!(count = saved.len(), "Products seeded");
            Ok(storage)
        }
        Err(e) => {
            match &e {
                SeedError::Storage(inner) => {
                    error!(error = %inner, code = inner.error_code(), "Product seed failed")
                }
                SeedError::Report(_) => error!(error = %e, "Product seed report failed"),
            }
            storage.close().await;
            Err(e.into())
        }
    }
}

/// Run the service until shutdown. The seed report goes to stdout.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let storage = bootstrap(&config, &mut std::io::stdout()).await?;

    let app = http::router("products", storage.repository());
    let served = http::serve_or_idle(config.http.as_ref(), app).await;

    storage.close().await;
    served?;
    info!("inventory-service stopped");
    Ok(())
}
