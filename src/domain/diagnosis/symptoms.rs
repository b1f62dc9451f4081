//! The symptom-details step: raw form input and its validated form.

use super::{DiagnosisUpdate, Progression, Recurrence};
use crate::domain::foundation::{SymptomLevel, ValidationError};

/// Unvalidated values as entered on the details screen.
#[derive(Debug, Clone, Default)]
pub struct SymptomForm {
    pub severity: u8,
    pub pain_level: u8,
    pub itching_level: Option<u8>,
    pub duration: String,
    pub progression: Option<Progression>,
    pub is_recurring: Option<bool>,
    pub symptoms_text: String,
}

/// Validated details submission, applied to the record in one merge.
#[derive(Debug, Clone, PartialEq)]
pub struct SymptomReport {
    pub severity: SymptomLevel,
    pub pain_level: SymptomLevel,
    pub itching_level: Option<SymptomLevel>,
    pub duration: String,
    pub progression: Progression,
    pub is_recurring: Recurrence,
    pub symptoms_text: String,
}

impl SymptomForm {
    pub fn validate(self) -> Result<SymptomReport, ValidationError> {
        let itching_level = self
            .itching_level
            .map(|v| SymptomLevel::try_for_field("itching_level", v))
            .transpose()?;

        Ok(SymptomReport {
            severity: SymptomLevel::try_for_field("severity", self.severity)?,
            pain_level: SymptomLevel::try_for_field("pain_level", self.pain_level)?,
            itching_level,
            duration: self.duration.trim().to_string(),
            progression: self.progression.unwrap_or_default(),
            is_recurring: self.is_recurring.into(),
            symptoms_text: self.symptoms_text.trim().to_string(),
        })
    }
}

impl From<SymptomReport> for DiagnosisUpdate {
    fn from(report: SymptomReport) -> Self {
        DiagnosisUpdate {
            severity: Some(report.severity),
            pain_level: Some(report.pain_level),
            itching_level: report.itching_level,
            duration: Some(report.duration),
            progression: Some(report.progression),
            is_recurring: Some(report.is_recurring),
            symptoms_text: Some(report.symptoms_text),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SymptomForm {
        SymptomForm {
            severity: 3,
            pain_level: 2,
            itching_level: Some(4),
            duration: " 2 weeks ".into(),
            progression: None,
            is_recurring: Some(true),
            symptoms_text: "dry, flaky".into(),
        }
    }

    #[test]
    fn validate_normalizes_and_defaults() {
        let report = form().validate().unwrap();
        assert_eq!(report.duration, "2 weeks");
        assert_eq!(report.progression, Progression::Stable);
        assert_eq!(report.is_recurring, Recurrence::Yes);
        assert_eq!(report.itching_level.map(|l| l.value()), Some(4));
    }

    #[test]
    fn validate_rejects_out_of_range_slider() {
        let err = SymptomForm {
            pain_level: 0,
            ..form()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.field(), "pain_level");
    }

    #[test]
    fn itching_is_optional() {
        let report = SymptomForm {
            itching_level: None,
            ..form()
        }
        .validate()
        .unwrap();
        assert!(report.itching_level.is_none());
    }

    #[test]
    fn report_becomes_single_update_with_all_fields() {
        let update: DiagnosisUpdate = form().validate().unwrap().into();
        assert!(update.severity.is_some());
        assert!(update.pain_level.is_some());
        assert!(update.duration.is_some());
        assert!(update.progression.is_some());
        assert!(update.is_recurring.is_some());
        assert!(update.symptoms_text.is_some());
        assert!(update.condition.is_none());
    }
}
