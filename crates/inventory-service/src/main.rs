//! inventory-service entry point.

use inventory_service::{Config, app};
use tracing::error;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    storefront::telemetry::init(&config.log);

    app::run(config).await.map_err(|e| {
        error!(error = %e, "inventory-service failed");
        e
    })
}
