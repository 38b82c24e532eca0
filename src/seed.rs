//! Bootstrap seeding.
//!
//! Inserts a fixed list of records once at startup, strictly in order.
//! A failed save aborts the run; records saved before it stay stored.

use crate::error::{SeedError, StorageError};
use crate::repository::{Entity, Repository};
use std::io::Write;
use std::time::Instant;
use tracing::{debug, info};

/// Save every record in order and return the stored versions.
pub async fn seed_all<T: Entity>(
    repo: &dyn Repository<T>,
    records: Vec<T>,
) -> Result<Vec<T>, StorageError> {
    let start = Instant::now();
    let mut saved = Vec::with_capacity(records.len());

    for record in records {
        let stored = repo.save(record).await?;
        debug!(record = %stored, "Seed record saved");
        saved.push(stored);
    }

    info!(
        count = saved.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Seed data inserted"
    );
    Ok(saved)
}

/// Write every stored record's display form to `out`, one per line, in
/// storage order. Returns the number of lines written.
pub async fn report_all<T: Entity, W: Write>(
    repo: &dyn Repository<T>,
    out: &mut W,
) -> Result<usize, SeedError> {
    let records = repo.find_all().await?;
    for record in &records {
        writeln!(out, "{record}")?;
    }
    out.flush()?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MemoryRepository;
    use crate::repository::memory::tests::Note;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails every save after the first `budget` ones.
    struct FlakyRepository {
        inner: MemoryRepository<Note>,
        budget: usize,
        attempts: AtomicUsize,
    }

    #[async_trait]
    impl Repository<Note> for FlakyRepository {
        async fn save(&self, entity: Note) -> Result<Note, StorageError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if attempt >= self.budget {
                return Err(StorageError::Unavailable("connection refused".to_string()));
            }
            self.inner.save(entity).await
        }

        async fn find_all(&self) -> Result<Vec<Note>, StorageError> {
            self.inner.find_all().await
        }

        async fn find_by_id(&self, id: &i64) -> Result<Option<Note>, StorageError> {
            self.inner.find_by_id(id).await
        }

        async fn count(&self) -> Result<u64, StorageError> {
            self.inner.count().await
        }
    }

    fn notes() -> Vec<Note> {
        vec![Note::new("a"), Note::new("b"), Note::new("c")]
    }

    #[tokio::test]
    async fn seed_all_saves_in_order() {
        let repo: MemoryRepository<Note> = MemoryRepository::new();
        let saved = seed_all(&repo, notes()).await.unwrap();
        assert_eq!(saved.len(), 3);
        assert_eq!(repo.find_all().await.unwrap(), saved);
        assert_eq!(saved[2].id, Some(3));
    }

    #[tokio::test]
    async fn seed_all_stops_at_first_failure() {
        let repo = FlakyRepository {
            inner: MemoryRepository::new(),
            budget: 1,
            attempts: AtomicUsize::new(0),
        };

        let err = seed_all(&repo, notes()).await.unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        // Second save failed, third was never attempted.
        assert_eq!(repo.attempts.load(Ordering::SeqCst), 2);
        let kept = repo.find_all().await.unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text, "a");
    }

    #[tokio::test]
    async fn seed_all_on_unreachable_store_inserts_nothing() {
        let repo = FlakyRepository {
            inner: MemoryRepository::new(),
            budget: 0,
            attempts: AtomicUsize::new(0),
        };

        assert!(seed_all(&repo, notes()).await.is_err());
        assert_eq!(repo.attempts.load(Ordering::SeqCst), 1);
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn report_all_writes_one_line_per_record() {
        let repo: MemoryRepository<Note> = MemoryRepository::new();
        seed_all(&repo, notes()).await.unwrap();

        let mut out = Vec::<u8>::new();
        let written = report_all(&repo, &mut out).await.unwrap();
        assert_eq!(written, 3);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Note(id=1, text=a)\nNote(id=2, text=b)\nNote(id=3, text=c)\n"
        );
    }

    #[tokio::test]
    async fn report_all_propagates_storage_failure() {
        let repo: MemoryRepository<Note> = MemoryRepository::new();
        repo.close();
        let mut out = Vec::<u8>::new();
        let err = report_all(&repo, &mut out).await.unwrap_err();
        assert!(matches!(err, SeedError::Storage(StorageError::Unavailable(_))));
        assert!(out.is_empty());
    }
}
