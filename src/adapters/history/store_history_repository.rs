//! Key-value backed history repository.
//!
//! The whole list lives under one key as a JSON array, newest first.
//! Missing or malformed values read as an empty list. A failed store read
//! aborts an append instead of overwriting the list.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode, HistoryEntryId};
use crate::domain::history::HistoryEntry;
use crate::ports::{keys, HistoryRepository, KeyValueStore, StoreError};

/// History repository persisting through a [`KeyValueStore`].
///
/// Appends are serialized within this process. Separate processes sharing
/// the same store can still lose an entry to a last-write-wins race.
pub struct StoreHistoryRepository {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl StoreHistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Reads the stored list, surfacing store failures.
    async fn read_entries(&self) -> Result<Vec<HistoryEntry>, StoreError> {
        let Some(raw) = self.store.get(keys::DIAGNOSIS_HISTORY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                tracing::warn!(error = %e, "Stored diagnosis history is malformed, ignoring");
                Ok(Vec::new())
            }
        }
    }

    async fn load(&self) -> Vec<HistoryEntry> {
        self.read_entries().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read diagnosis history");
            Vec::new()
        })
    }
}

fn storage_error(context: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::StorageError, format!("{}: {}", context, err))
}

#[async_trait]
impl HistoryRepository for StoreHistoryRepository {
    async fn append(&self, entry: HistoryEntry) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self
            .read_entries()
            .await
            .map_err(|e| storage_error("Failed to read history", e))?;
        let id = entry.id.clone();
        entries.insert(0, entry);

        let json = serde_json::to_string(&entries)
            .map_err(|e| storage_error("Failed to serialize history", e))?;
        self.store
            .set(keys::DIAGNOSIS_HISTORY, &json)
            .await
            .map_err(|e| storage_error("Failed to save history", e))?;

        tracing::debug!(entry_id = %id, total = entries.len(), "History entry appended");
        Ok(())
    }

    async fn list(&self) -> Vec<HistoryEntry> {
        self.load().await
    }

    async fn find_by_id(&self, id: &HistoryEntryId) -> Option<HistoryEntry> {
        self.load().await.into_iter().find(|e| &e.id == id)
    }

    async fn clear(&self) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;
        self.store
            .remove(keys::DIAGNOSIS_HISTORY)
            .await
            .map_err(|e| storage_error("Failed to clear history", e))?;
        tracing::info!("Diagnosis history cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::diagnosis::{AnalysisResult, DiagnosisRecord, DiagnosisUpdate};
    use crate::domain::foundation::{Confidence, Timestamp};
    use std::sync::atomic::{AtomicBool, Ordering};

    fn entry(condition: &str) -> HistoryEntry {
        let record = DiagnosisRecord::default().merged(DiagnosisUpdate::analysis(
            AnalysisResult::new(condition, Confidence::new(0.85)),
            Timestamp::now(),
        ));
        HistoryEntry::snapshot(HistoryEntryId::new(), &record, Timestamp::now())
    }

    fn repo_with(store: InMemoryKeyValueStore) -> StoreHistoryRepository {
        StoreHistoryRepository::new(Arc::new(store))
    }

    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
        async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
        async fn remove(&self, _key: &str) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    /// Wraps a working store and fails the next `get` once when armed.
    struct FlakyReadStore {
        inner: InMemoryKeyValueStore,
        fail_next_get: AtomicBool,
    }

    impl FlakyReadStore {
        fn new(inner: InMemoryKeyValueStore) -> Self {
            Self {
                inner,
                fail_next_get: AtomicBool::new(false),
            }
        }

        fn fail_next_get(&self) {
            self.fail_next_get.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl KeyValueStore for FlakyReadStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            if self.fail_next_get.swap(false, Ordering::SeqCst) {
                return Err(StoreError::Io("read interrupted".into()));
            }
            self.inner.get(key).await
        }
        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.inner.set(key, value).await
        }
        async fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key).await
        }
    }

    #[tokio::test]
    async fn list_on_empty_store_is_empty() {
        let repo = repo_with(InMemoryKeyValueStore::new());
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn append_puts_newest_first() {
        let repo = repo_with(InMemoryKeyValueStore::new());
        repo.append(entry("First")).await.unwrap();
        repo.append(entry("Second")).await.unwrap();

        let list = repo.list().await;
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].condition, "Second");
        assert_eq!(list[1].condition, "First");
    }

    #[tokio::test]
    async fn malformed_value_reads_as_empty_and_is_overwritten() {
        let store = InMemoryKeyValueStore::with_values([(keys::DIAGNOSIS_HISTORY, "{not json")]);
        let repo = repo_with(store.clone());

        assert!(repo.list().await.is_empty());
        repo.append(entry("Fresh")).await.unwrap();

        let raw = store.get(keys::DIAGNOSIS_HISTORY).await.unwrap().unwrap();
        assert!(raw.starts_with('['));
        assert_eq!(repo.list().await.len(), 1);
    }

    #[tokio::test]
    async fn find_by_id_locates_entry() {
        let repo = repo_with(InMemoryKeyValueStore::new());
        let wanted = entry("Eczema");
        let id = wanted.id.clone();
        repo.append(wanted).await.unwrap();
        repo.append(entry("Other")).await.unwrap();

        assert_eq!(repo.find_by_id(&id).await.unwrap().condition, "Eczema");
        assert!(repo.find_by_id(&HistoryEntryId::new()).await.is_none());
    }

    #[tokio::test]
    async fn clear_removes_key() {
        let store = InMemoryKeyValueStore::new();
        let repo = repo_with(store.clone());
        repo.append(entry("X")).await.unwrap();

        repo.clear().await.unwrap();

        assert!(store.get(keys::DIAGNOSIS_HISTORY).await.unwrap().is_none());
        assert!(repo.list().await.is_empty());
    }

    #[tokio::test]
    async fn concurrent_appends_in_one_process_keep_every_entry() {
        let repo = Arc::new(repo_with(InMemoryKeyValueStore::new()));
        let mut handles = Vec::new();
        for i in 0..10 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.append(entry(&format!("c{}", i))).await.unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }
        assert_eq!(repo.list().await.len(), 10);
    }

    #[tokio::test]
    async fn broken_store_reads_empty_and_fails_writes() {
        let repo = StoreHistoryRepository::new(Arc::new(BrokenStore));

        assert!(repo.list().await.is_empty());
        let err = repo.append(entry("X")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert!(repo.clear().await.is_err());
    }

    #[tokio::test]
    async fn failed_read_aborts_append_and_keeps_existing_entries() {
        let store = Arc::new(FlakyReadStore::new(InMemoryKeyValueStore::new()));
        let repo = StoreHistoryRepository::new(store.clone());
        for i in 0..5 {
            repo.append(entry(&format!("e{}", i))).await.unwrap();
        }

        store.fail_next_get();
        let err = repo.append(entry("new")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);

        let list = repo.list().await;
        assert_eq!(list.len(), 5);
        assert_eq!(list[0].condition, "e4");
        assert!(list.iter().all(|e| e.condition != "new"));
    }

    #[tokio::test]
    async fn failed_read_on_list_reads_as_empty() {
        let store = Arc::new(FlakyReadStore::new(InMemoryKeyValueStore::new()));
        let repo = StoreHistoryRepository::new(store.clone());
        repo.append(entry("kept")).await.unwrap();

        store.fail_next_get();
        assert!(repo.list().await.is_empty());
        assert_eq!(repo.list().await.len(), 1);
    }
}
