//! ClearHistoryHandler - backs the "delete all data" privacy action.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::HistoryRepository;

/// Handler removing every saved scan. Irreversible.
pub struct ClearHistoryHandler {
    history: Arc<dyn HistoryRepository>,
}

impl ClearHistoryHandler {
    pub fn new(history: Arc<dyn HistoryRepository>) -> Self {
        Self { history }
    }

    /// Returns how many entries were removed.
    pub async fn handle(&self) -> Result<usize, DomainError> {
        let removed = self.history.list().await.len();
        self.history.clear().await?;
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryKeyValueStore, StoreHistoryRepository};
    use crate::domain::diagnosis::DiagnosisRecord;
    use crate::domain::foundation::{HistoryEntryId, Timestamp};
    use crate::domain::history::HistoryEntry;

    #[tokio::test]
    async fn clears_everything() {
        let history = Arc::new(StoreHistoryRepository::new(Arc::new(
            InMemoryKeyValueStore::new(),
        )));
        for _ in 0..3 {
            history
                .append(HistoryEntry::snapshot(
                    HistoryEntryId::new(),
                    &DiagnosisRecord::default(),
                    Timestamp::now(),
                ))
                .await
                .unwrap();
        }

        let removed = ClearHistoryHandler::new(history.clone())
            .handle()
            .await
            .unwrap();

        assert_eq!(removed, 3);
        assert!(history.list().await.is_empty());
    }
}
