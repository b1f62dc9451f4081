//! The in-progress scan record and its merge-update.
//!
//! # Invariants
//!
//! - Applying an update only touches the fields it carries; everything else
//!   is preserved.
//! - `condition`, `confidence` and `recommendations` are meaningful only once
//!   `analyzed_at` is set. Before that the record holds the zero defaults,
//!   and the raw referral predicate reports `true` because confidence is 0.

use serde::{Deserialize, Serialize};

use super::{AnalysisResult, ImageRef, Progression, Recurrence, ReferralPolicy};
use crate::domain::foundation::{Confidence, SymptomLevel, Timestamp};

/// In-progress data for the single active scan.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosisRecord {
    #[serde(rename = "imageUri")]
    pub image_ref: Option<ImageRef>,
    pub captured_at: Option<Timestamp>,
    pub severity: SymptomLevel,
    pub pain_level: SymptomLevel,
    pub itching_level: Option<SymptomLevel>,
    pub duration: String,
    pub progression: Progression,
    pub is_recurring: Recurrence,
    #[serde(rename = "symptoms")]
    pub symptoms_text: String,
    pub condition: String,
    pub confidence: Confidence,
    pub recommendations: Vec<String>,
    pub analyzed_at: Option<Timestamp>,
    /// Display toggle for the analysis screen; never copied into history.
    pub heatmap_enabled: bool,
}

/// A partial set of fields to merge into a [`DiagnosisRecord`].
///
/// `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiagnosisUpdate {
    pub image_ref: Option<ImageRef>,
    pub captured_at: Option<Timestamp>,
    pub severity: Option<SymptomLevel>,
    pub pain_level: Option<SymptomLevel>,
    pub itching_level: Option<SymptomLevel>,
    pub duration: Option<String>,
    pub progression: Option<Progression>,
    pub is_recurring: Option<Recurrence>,
    pub symptoms_text: Option<String>,
    pub condition: Option<String>,
    pub confidence: Option<Confidence>,
    pub recommendations: Option<Vec<String>>,
    pub analyzed_at: Option<Timestamp>,
    pub heatmap_enabled: Option<bool>,
}

impl DiagnosisUpdate {
    /// Update recording a freshly acquired photo.
    pub fn image(image_ref: ImageRef, captured_at: Timestamp) -> Self {
        Self {
            image_ref: Some(image_ref),
            captured_at: Some(captured_at),
            ..Default::default()
        }
    }

    /// Update recording an inference outcome.
    pub fn analysis(result: AnalysisResult, analyzed_at: Timestamp) -> Self {
        Self {
            condition: Some(result.condition),
            confidence: Some(result.confidence),
            recommendations: Some(result.recommendations),
            analyzed_at: Some(analyzed_at),
            ..Default::default()
        }
    }

    pub fn heatmap(enabled: bool) -> Self {
        Self {
            heatmap_enabled: Some(enabled),
            ..Default::default()
        }
    }
}

impl DiagnosisRecord {
    /// Shallow-merges `update` into this record. Never fails.
    pub fn apply(&mut self, update: DiagnosisUpdate) {
        if let Some(v) = update.image_ref {
            self.image_ref = Some(v);
        }
        if let Some(v) = update.captured_at {
            self.captured_at = Some(v);
        }
        if let Some(v) = update.severity {
            self.severity = v;
        }
        if let Some(v) = update.pain_level {
            self.pain_level = v;
        }
        if let Some(v) = update.itching_level {
            self.itching_level = Some(v);
        }
        if let Some(v) = update.duration {
            self.duration = v;
        }
        if let Some(v) = update.progression {
            self.progression = v;
        }
        if let Some(v) = update.is_recurring {
            self.is_recurring = v;
        }
        if let Some(v) = update.symptoms_text {
            self.symptoms_text = v;
        }
        if let Some(v) = update.condition {
            self.condition = v;
        }
        if let Some(v) = update.confidence {
            self.confidence = v;
        }
        if let Some(v) = update.recommendations {
            self.recommendations = v;
        }
        if let Some(v) = update.analyzed_at {
            self.analyzed_at = Some(v);
        }
        if let Some(v) = update.heatmap_enabled {
            self.heatmap_enabled = v;
        }
    }

    /// Pure form of [`apply`](Self::apply).
    pub fn merged(mut self, update: DiagnosisUpdate) -> Self {
        self.apply(update);
        self
    }

    /// Replaces every field with its zero default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_analyzed(&self) -> bool {
        self.analyzed_at.is_some()
    }

    /// `severity >= 4 || confidence < 0.6`, evaluated on whatever the record
    /// holds right now. Before analysis this is always `true`.
    pub fn needs_doctor_referral(&self) -> bool {
        self.needs_doctor_referral_under(&ReferralPolicy::default())
    }

    pub fn needs_doctor_referral_under(&self, policy: &ReferralPolicy) -> bool {
        policy.requires_referral(self.severity, self.confidence)
    }

    /// Referral decision gated on analysis having run; `None` before that.
    pub fn referral_decision(&self, policy: &ReferralPolicy) -> Option<bool> {
        self.is_analyzed()
            .then(|| self.needs_doctor_referral_under(policy))
    }

    /// The analysis outcome, once inference has completed.
    pub fn analysis(&self) -> Option<AnalysisResult> {
        self.is_analyzed().then(|| AnalysisResult {
            condition: self.condition.clone(),
            confidence: self.confidence,
            recommendations: self.recommendations.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn level(v: u8) -> SymptomLevel {
        SymptomLevel::try_new(v).unwrap()
    }

    fn analyzed(severity: u8, confidence: f64) -> DiagnosisRecord {
        DiagnosisRecord::default()
            .merged(DiagnosisUpdate {
                severity: Some(level(severity)),
                ..Default::default()
            })
            .merged(DiagnosisUpdate::analysis(
                AnalysisResult::new("Test", Confidence::new(confidence)),
                Timestamp::now(),
            ))
    }

    #[test]
    fn default_record_is_zeroed() {
        let record = DiagnosisRecord::default();
        assert!(record.image_ref.is_none());
        assert_eq!(record.severity, level(1));
        assert_eq!(record.pain_level, level(1));
        assert_eq!(record.progression, Progression::Stable);
        assert_eq!(record.is_recurring, Recurrence::Unknown);
        assert_eq!(record.confidence, Confidence::ZERO);
        assert!(record.condition.is_empty());
        assert!(!record.is_analyzed());
    }

    #[test]
    fn apply_preserves_fields_not_supplied() {
        let mut record = DiagnosisRecord::default();
        record.apply(DiagnosisUpdate {
            duration: Some("3 days".into()),
            severity: Some(level(3)),
            ..Default::default()
        });
        record.apply(DiagnosisUpdate {
            symptoms_text: Some("red patch".into()),
            ..Default::default()
        });

        assert_eq!(record.duration, "3 days");
        assert_eq!(record.severity, level(3));
        assert_eq!(record.symptoms_text, "red patch");
    }

    #[test]
    fn reset_then_referral_predicate_is_true_before_analysis() {
        let mut record = analyzed(1, 0.9);
        assert!(!record.needs_doctor_referral());

        record.reset();

        // Zero confidence trips the raw predicate; the gated form reports
        // that no decision exists yet.
        assert!(record.needs_doctor_referral());
        assert_eq!(record.referral_decision(&ReferralPolicy::default()), None);
    }

    #[test]
    fn severity_dominates_high_confidence() {
        assert!(analyzed(5, 0.85).needs_doctor_referral());
    }

    #[test]
    fn low_confidence_dominates_mild_severity() {
        assert!(analyzed(1, 0.5).needs_doctor_referral());
    }

    #[test]
    fn mild_and_confident_goes_to_self_care() {
        let record = analyzed(1, 0.9);
        assert!(!record.needs_doctor_referral());
        assert_eq!(record.referral_decision(&ReferralPolicy::default()), Some(false));
    }

    #[test]
    fn analysis_is_exposed_only_after_inference() {
        assert!(DiagnosisRecord::default().analysis().is_none());
        let result = analyzed(2, 0.85).analysis().unwrap();
        assert_eq!(result.condition, "Test");
    }

    #[test]
    fn serializes_with_persisted_key_names() {
        let record = DiagnosisRecord::default().merged(DiagnosisUpdate::image(
            ImageRef::new("file:///x.jpg").unwrap(),
            Timestamp::now(),
        ));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["imageUri"], "file:///x.jpg");
        assert_eq!(json["painLevel"], 1);
        assert!(json.get("symptoms").is_some());
    }

    fn level_strategy() -> impl Strategy<Value = Option<SymptomLevel>> {
        proptest::option::of((1u8..=5).prop_map(|v| SymptomLevel::try_new(v).unwrap()))
    }

    fn update_strategy() -> impl Strategy<Value = DiagnosisUpdate> {
        (
            level_strategy(),
            level_strategy(),
            proptest::option::of("[a-z ]{0,12}"),
            proptest::option::of("[a-z ]{0,12}"),
            proptest::option::of(prop_oneof![
                Just(Progression::Better),
                Just(Progression::Stable),
                Just(Progression::Worse),
            ]),
            proptest::option::of(any::<bool>()),
        )
            .prop_map(
                |(severity, pain_level, duration, symptoms_text, progression, heatmap)| {
                    DiagnosisUpdate {
                        severity,
                        pain_level,
                        duration,
                        symptoms_text,
                        progression,
                        heatmap_enabled: heatmap,
                        ..Default::default()
                    }
                },
            )
    }

    proptest! {
        #[test]
        fn later_updates_win_per_field(u1 in update_strategy(), u2 in update_strategy()) {
            let defaults = DiagnosisRecord::default();
            let result = defaults.clone().merged(u1.clone()).merged(u2.clone());

            prop_assert_eq!(result.severity, u2.severity.or(u1.severity).unwrap_or(defaults.severity));
            prop_assert_eq!(result.pain_level, u2.pain_level.or(u1.pain_level).unwrap_or(defaults.pain_level));
            prop_assert_eq!(
                &result.duration,
                u2.duration.as_ref().or(u1.duration.as_ref()).unwrap_or(&defaults.duration)
            );
            prop_assert_eq!(
                &result.symptoms_text,
                u2.symptoms_text.as_ref().or(u1.symptoms_text.as_ref()).unwrap_or(&defaults.symptoms_text)
            );
            prop_assert_eq!(result.progression, u2.progression.or(u1.progression).unwrap_or(defaults.progression));
            prop_assert_eq!(
                result.heatmap_enabled,
                u2.heatmap_enabled.or(u1.heatmap_enabled).unwrap_or(defaults.heatmap_enabled)
            );
        }
    }
}
