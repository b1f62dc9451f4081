//! History query handlers - list and scan detail.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, HistoryEntryId};
use crate::domain::history::HistoryEntry;
use crate::domain::navigation::Route;
use crate::ports::HistoryRepository;

/// Handler listing saved scans, newest first.
pub struct ListHistoryHandler {
    history: Arc<dyn HistoryRepository>,
}

impl ListHistoryHandler {
    pub fn new(history: Arc<dyn HistoryRepository>) -> Self {
        Self { history }
    }

    /// Empty when nothing was ever saved.
    pub async fn handle(&self) -> Vec<HistoryEntry> {
        self.history.list().await
    }
}

/// Query for one saved scan.
#[derive(Debug, Clone)]
pub struct GetScanQuery {
    pub id: HistoryEntryId,
}

/// Handler opening the detail screen for one saved scan.
pub struct GetScanHandler {
    history: Arc<dyn HistoryRepository>,
}

impl GetScanHandler {
    pub fn new(history: Arc<dyn HistoryRepository>) -> Self {
        Self { history }
    }

    pub async fn handle(&self, query: GetScanQuery) -> Result<Route, DomainError> {
        let scan = self.history.find_by_id(&query.id).await.ok_or_else(|| {
            DomainError::new(ErrorCode::HistoryEntryNotFound, "Scan not found")
                .with_detail("id", query.id.to_string())
        })?;
        Ok(Route::ScanDetail { scan })
    }
}
