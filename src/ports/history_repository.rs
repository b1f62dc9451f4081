//! History Repository Port - persisted list of finished scans.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, HistoryEntryId};
use crate::domain::history::HistoryEntry;

/// Repository port for history entry persistence.
///
/// Ordering is strictly newest-first: `append` inserts at index 0.
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Prepend `entry` and persist the whole list in one write.
    ///
    /// # Errors
    ///
    /// - `StorageError` if the write fails
    async fn append(&self, entry: HistoryEntry) -> Result<(), DomainError>;

    /// All entries, newest first. Empty when nothing is stored or the
    /// stored value cannot be read; never an error.
    async fn list(&self) -> Vec<HistoryEntry>;

    /// Find one entry by id.
    async fn find_by_id(&self, id: &HistoryEntryId) -> Option<HistoryEntry>;

    /// Remove the persisted list entirely. Irreversible.
    ///
    /// # Errors
    ///
    /// - `StorageError` if the delete fails
    async fn clear(&self) -> Result<(), DomainError>;
}
