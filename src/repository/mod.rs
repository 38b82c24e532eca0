//! Repository abstraction.
//!
//! A repository saves and retrieves one entity type. Services implement it
//! over SQLite; [`MemoryRepository`] keeps everything in process.

use crate::error::StorageError;
use async_trait::async_trait;
use std::fmt;

pub mod memory;

pub use memory::MemoryRepository;

/// A record type persisted in a store.
pub trait Entity: Clone + fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Identifier type, either caller-supplied or a storage-assigned surrogate key.
    type Id: Clone + Eq + fmt::Debug + fmt::Display + Send + Sync + 'static;

    /// Current identifier, `None` until storage has assigned one.
    fn id(&self) -> Option<&Self::Id>;

    /// Store a storage-assigned surrogate key. Caller-keyed entities ignore it.
    fn assign_surrogate_id(&mut self, _id: i64) {}

    /// The identifier as a surrogate key, for entities keyed that way.
    fn surrogate_id(&self) -> Option<i64> {
        None
    }
}

#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Persist one entity and return the stored record, identifier included.
    async fn save(&self, entity: T) -> Result<T, StorageError>;

    /// All stored entities in storage order.
    async fn find_all(&self) -> Result<Vec<T>, StorageError>;

    /// Lookup by identifier.
    async fn find_by_id(&self, id: &T::Id) -> Result<Option<T>, StorageError>;

    /// Number of stored entities.
    async fn count(&self) -> Result<u64, StorageError>;
}
