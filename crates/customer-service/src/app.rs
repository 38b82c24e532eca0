//! Service lifecycle: open storage, seed, serve, release.

use crate::MIGRATOR;
use crate::config::Config;
use crate::entity::Customer;
use crate::repository::SqliteCustomerRepository;
use crate::seed;
use storefront::config::validate;
use storefront::telemetry::spans;
use storefront::{Storage, http};
use tracing::{Instrument, debug, error, info};

/// Validate the configuration, open storage and run the startup seed.
///
/// On a seed failure the store is released before the error is returned.
pub async fn bootstrap(config: &Config) -> anyhow::Result<Storage<Customer>> {
    open_and_seed(config)
        .instrument(spans::startup("customer-service"))
        .await
}

async fn open_and_seed(config: &Config) -> anyhow::Result<Storage<Customer>> {
    if let Err(errors) = validate(&config.storage) {
        for e in &errors {
            error!(error = %e, "Invalid configuration");
        }
        anyhow::bail!("invalid configuration ({} errors)", errors.len());
    }
    debug!(?config, "Configuration loaded");

    let storage =
        Storage::<Customer>::open(&config.storage, &MIGRATOR, SqliteCustomerRepository::new)
            .await?;
    let repo = storage.repository();

    match seed::run(repo.as_ref()).await {
        Ok(saved) => {
            info!(count = saved.len(), "Customers seeded");
            Ok(storage)
        }
        Err(e) => {
            error!(error = %e, code = e.error_code(), "Customer seed failed");
            storage.close().await;
            Err(e.into())
        }
    }
}

/// Run the service until shutdown.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let storage = bootstrap(&config).await?;

    let app = http::router("customers", storage.repository());
    let served = http::serve_or_idle(config.http.as_ref(), app).await;

    storage.close().await;
    served?;
    info!("customer-service stopped");
    Ok(())
}
