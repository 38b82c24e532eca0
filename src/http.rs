//! Read-only HTTP surface.
//!
//! Serves `/health` plus list and lookup routes for one entity collection.
//! Runs until the shutdown signal, then returns so storage can be released.

use crate::config::HttpConfig;
use crate::error::ApiError;
use crate::repository::{Entity, Repository};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};

type SharedRepository<T> = State<Arc<dyn Repository<T>>>;

/// Body of GET /health.
#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub records: u64,
}

/// Build the router for one collection, e.g. `products` serves
/// `/products` and `/products/:id`.
pub fn router<T>(collection: &str, repo: Arc<dyn Repository<T>>) -> Router
where
    T: Entity + Serialize,
    T::Id: DeserializeOwned,
{
    Router::new()
        .route("/health", get(health::<T>))
        .route(&format!("/{collection}"), get(list::<T>))
        .route(&format!("/{collection}/:id"), get(find::<T>))
        .with_state(repo)
}

/// Handler for GET /health - reports the stored record count.
async fn health<T: Entity>(State(repo): SharedRepository<T>) -> Result<Json<Health>, ApiError> {
    let records = repo.count().await?;
    Ok(Json(Health {
        status: "ok",
        records,
    }))
}

async fn list<T: Entity + Serialize>(
    State(repo): SharedRepository<T>,
) -> Result<Json<Vec<T>>, ApiError> {
    Ok(Json(repo.find_all().await?))
}

async fn find<T>(
    State(repo): SharedRepository<T>,
    Path(id): Path<T::Id>,
) -> Result<Json<T>, ApiError>
where
    T: Entity + Serialize,
    T::Id: DeserializeOwned,
{
    repo.find_by_id(&id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("record {id}")))
}

/// Serve `app` on `address` until `shutdown` resolves.
pub async fn serve<F>(address: SocketAddr, app: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!(address = %listener.local_addr()?, "HTTP server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Serve `app` when an HTTP section is configured, otherwise idle. Either
/// way, return once the process is asked to stop.
pub async fn serve_or_idle(http: Option<&HttpConfig>, app: Router) -> std::io::Result<()> {
    match http {
        Some(http) => serve(http.address, app, shutdown_signal()).await,
        None => {
            info!("No HTTP surface configured, idling until shutdown");
            shutdown_signal().await;
            Ok(())
        }
    }
}

/// Resolves on Ctrl-C.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    info!("Shutdown signal received");
}
