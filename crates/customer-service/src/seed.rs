//! Startup seed for the customer store.

use crate::entity::Customer;
use storefront::seed::seed_all;
use storefront::{Repository, StorageError};
use tracing::Instrument;

/// The literal customers inserted at startup, in insertion order.
pub fn records() -> Vec<Customer> {
    vec![
        Customer::new("yassin", "yassin@gmail.com"),
        Customer::new("mohamed", "mohamed@gmail.com"),
        Customer::new("said", "said@gmail.com"),
    ]
}

/// Save the seed customers. Not idempotent: a second run inserts them again.
pub async fn run(repo: &dyn Repository<Customer>) -> Result<Vec<Customer>, StorageError> {
    seed_all(repo, records())
        .instrument(storefront::telemetry::spans::seed("customer"))
        .await
}
