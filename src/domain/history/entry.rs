//! Frozen snapshot of a finished scan.

use serde::{Deserialize, Serialize};

use crate::domain::diagnosis::{DiagnosisRecord, ImageRef, Progression, Recurrence};
use crate::domain::foundation::{Confidence, HistoryEntryId, SymptomLevel, Timestamp};

/// One row of the persisted `diagnosisHistory` list.
///
/// Entries are never edited after creation and hold no reference back to
/// the record they were taken from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: HistoryEntryId,
    pub condition: String,
    /// Capture time of the photo.
    pub date: Timestamp,
    pub severity: SymptomLevel,
    pub pain_level: SymptomLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub itching_level: Option<SymptomLevel>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub progression: Progression,
    #[serde(default)]
    pub is_recurring: Recurrence,
    #[serde(rename = "symptoms", default)]
    pub symptoms_text: String,
    pub confidence: Confidence,
    #[serde(rename = "imageUri", default)]
    pub image_ref: Option<ImageRef>,
}

impl HistoryEntry {
    /// Projects the record into an entry. `saved_at` stands in for the
    /// capture time when the record never saw a photo.
    pub fn snapshot(id: HistoryEntryId, record: &DiagnosisRecord, saved_at: Timestamp) -> Self {
        Self {
            id,
            condition: record.condition.clone(),
            date: record.captured_at.unwrap_or(saved_at),
            severity: record.severity,
            pain_level: record.pain_level,
            itching_level: record.itching_level,
            duration: record.duration.clone(),
            progression: record.progression,
            is_recurring: record.is_recurring,
            symptoms_text: record.symptoms_text.clone(),
            confidence: record.confidence,
            image_ref: record.image_ref.clone(),
        }
    }

    /// Badge shown on the history list.
    pub fn risk_label(&self) -> &'static str {
        self.severity.risk_label()
    }
}
