//! DiagnosisStateContainer - holds the in-progress record for one session.

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::diagnosis::{DiagnosisRecord, DiagnosisUpdate, ReferralPolicy};
use crate::domain::foundation::{HistoryEntryId, Timestamp};
use crate::domain::history::HistoryEntry;
use crate::ports::HistoryRepository;

/// Owner of the current [`DiagnosisRecord`].
///
/// There is exactly one container per session; the workflow controller and
/// the result screens read and write through it.
pub struct DiagnosisStateContainer {
    record: RwLock<DiagnosisRecord>,
    history: Arc<dyn HistoryRepository>,
    policy: ReferralPolicy,
}

impl DiagnosisStateContainer {
    pub fn new(history: Arc<dyn HistoryRepository>, policy: ReferralPolicy) -> Self {
        Self {
            record: RwLock::new(DiagnosisRecord::default()),
            history,
            policy,
        }
    }

    /// Copy of the current record.
    pub async fn snapshot(&self) -> DiagnosisRecord {
        self.record.read().await.clone()
    }

    /// Shallow-merge `update` into the record. Fields left `None` keep
    /// their current value.
    pub async fn update(&self, update: DiagnosisUpdate) {
        self.record.write().await.apply(update);
    }

    /// Back to the zero-value record.
    pub async fn reset(&self) {
        self.record.write().await.reset();
    }

    pub(crate) async fn replace(&self, record: DiagnosisRecord) {
        *self.record.write().await = record;
    }

    /// `severity >= threshold || confidence < threshold` on the current
    /// record. True on a fresh record because confidence starts at zero;
    /// use [`Self::referral_decision`] when that matters.
    pub async fn needs_doctor_referral(&self) -> bool {
        self.record
            .read()
            .await
            .needs_doctor_referral_under(&self.policy)
    }

    /// Referral verdict, or `None` until an analysis has been recorded.
    pub async fn referral_decision(&self) -> Option<bool> {
        self.record.read().await.referral_decision(&self.policy)
    }

    /// Snapshot the record into history, newest first.
    ///
    /// Never fails: storage errors are logged and reported as `false`.
    pub async fn commit_to_history(&self) -> bool {
        let record = self.snapshot().await;
        let entry = HistoryEntry::snapshot(HistoryEntryId::new(), &record, Timestamp::now());
        let entry_id = entry.id.clone();

        match self.history.append(entry).await {
            Ok(()) => {
                tracing::info!(
                    entry_id = %entry_id,
                    condition = %record.condition,
                    "Scan saved to history"
                );
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save scan to history");
                false
            }
        }
    }
}
