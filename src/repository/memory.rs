//! In-process repository.
//!
//! Keeps entities in insertion order behind a mutex. Selected by the
//! `memory` storage backend and used as the fake store in tests.

use super::{Entity, Repository};
use crate::error::StorageError;
use async_trait::async_trait;
use parking_lot::Mutex;

struct State<T> {
    rows: Vec<T>,
    next_surrogate: i64,
    closed: bool,
}

/// Repository holding every entity in memory.
pub struct MemoryRepository<T> {
    state: Mutex<State<T>>,
}

impl<T: Entity> MemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                rows: Vec::new(),
                next_surrogate: 1,
                closed: false,
            }),
        }
    }

    /// Reject every later operation with [`StorageError::Unavailable`].
    pub fn close(&self) {
        self.state.lock().closed = true;
    }

    fn check_open(state: &State<T>) -> Result<(), StorageError> {
        if state.closed {
            return Err(StorageError::Unavailable(
                "memory store is closed".to_string(),
            ));
        }
        Ok(())
    }
}

impl<T: Entity> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for MemoryRepository<T> {
    async fn save(&self, mut entity: T) -> Result<T, StorageError> {
        let mut state = self.state.lock();
        Self::check_open(&state)?;

        if entity.id().is_none() {
            let id = state.next_surrogate;
            state.next_surrogate += 1;
            entity.assign_surrogate_id(id);
        }

        if let Some(id) = entity.id()
            && state.rows.iter().any(|row| row.id() == Some(id))
        {
            return Err(StorageError::Constraint(format!("duplicate id {id}")));
        }

        // Like AUTOINCREMENT, later keys step past any explicitly stored one.
        if let Some(key) = entity.surrogate_id() {
            state.next_surrogate = state.next_surrogate.max(key.saturating_add(1));
        }

        state.rows.push(entity.clone());
        Ok(entity)
    }

    async fn find_all(&self) -> Result<Vec<T>, StorageError> {
        let state = self.state.lock();
        Self::check_open(&state)?;
        Ok(state.rows.clone())
    }

    async fn find_by_id(&self, id: &T::Id) -> Result<Option<T>, StorageError> {
        let state = self.state.lock();
        Self::check_open(&state)?;
        Ok(state.rows.iter().find(|row| row.id() == Some(id)).cloned())
    }

    async fn count(&self) -> Result<u64, StorageError> {
        let state = self.state.lock();
        Self::check_open(&state)?;
        Ok(state.rows.len() as u64)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fmt;

    /// Minimal entity with an optional surrogate key.
    #[derive(Debug, Clone, PartialEq, serde::Serialize)]
    pub(crate) struct Note {
        pub id: Option<i64>,
        pub text: String,
    }

    impl Note {
        pub(crate) fn new(text: &str) -> Self {
            Self {
                id: None,
                text: text.to_string(),
            }
        }
    }

    impl fmt::Display for Note {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self.id {
                Some(id) => write!(f, "Note(id={id}, text={})", self.text),
                None => write!(f, "Note(id=null, text={})", self.text),
            }
        }
    }

    impl Entity for Note {
        type Id = i64;

        fn id(&self) -> Option<&i64> {
            self.id.as_ref()
        }

        fn assign_surrogate_id(&mut self, id: i64) {
            self.id = Some(id);
        }

        fn surrogate_id(&self) -> Option<i64> {
            self.id
        }
    }

    #[tokio::test]
    async fn save_assigns_sequential_surrogate_ids() {
        let repo: MemoryRepository<Note> = MemoryRepository::new();
        let first = repo.save(Note::new("a")).await.unwrap();
        let second = repo.save(Note::new("b")).await.unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
    }

    #[tokio::test]
    async fn save_keeps_caller_supplied_id() {
        let repo: MemoryRepository<Note> = MemoryRepository::new();
        let note = Note {
            id: Some(42),
            text: "kept".to_string(),
        };
        let saved = repo.save(note).await.unwrap();
        assert_eq!(saved.id, Some(42));
        assert_eq!(repo.find_by_id(&42).await.unwrap(), Some(saved));
    }

    #[tokio::test]
    async fn generated_ids_skip_past_caller_supplied_ones() {
        let repo: MemoryRepository<Note> = MemoryRepository::new();
        let explicit = Note {
            id: Some(1),
            text: "explicit".to_string(),
        };
        repo.save(explicit).await.unwrap();

        let auto = repo.save(Note::new("auto")).await.unwrap();
        assert_eq!(auto.id, Some(2));

        let far = Note {
            id: Some(10),
            text: "far".to_string(),
        };
        repo.save(far).await.unwrap();
        let next = repo.save(Note::new("next")).await.unwrap();
        assert_eq!(next.id, Some(11));
        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn duplicate_id_is_a_constraint_violation() {
        let repo: MemoryRepository<Note> = MemoryRepository::new();
        let note = Note {
            id: Some(7),
            text: "x".to_string(),
        };
        repo.save(note.clone()).await.unwrap();
        let err = repo.save(note).await.unwrap_err();
        assert!(matches!(err, StorageError::Constraint(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn find_all_returns_insertion_order() {
        let repo: MemoryRepository<Note> = MemoryRepository::new();
        for text in ["one", "two", "three"] {
            repo.save(Note::new(text)).await.unwrap();
        }
        let texts: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.text)
            .collect();
        assert_eq!(texts, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn find_by_id_missing_returns_none() {
        let repo: MemoryRepository<Note> = MemoryRepository::new();
        assert_eq!(repo.find_by_id(&99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn closed_store_rejects_everything() {
        let repo: MemoryRepository<Note> = MemoryRepository::new();
        repo.save(Note::new("before")).await.unwrap();
        repo.close();

        assert!(matches!(
            repo.save(Note::new("after")).await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(matches!(
            repo.find_all().await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(matches!(repo.count().await, Err(StorageError::Unavailable(_))));
    }
}
