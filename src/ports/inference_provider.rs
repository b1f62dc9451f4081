//! Inference Provider Port - turns a photo plus symptoms into an assessment.
//!
//! The workflow only depends on this trait, so a real model can replace the
//! rule-based placeholder without touching workflow logic.

use async_trait::async_trait;

use crate::domain::diagnosis::{AnalysisResult, DiagnosisRecord, ImageRef, SymptomReport};

/// Input to one analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    pub image: Option<ImageRef>,
    pub symptoms: SymptomReport,
}

impl InferenceRequest {
    /// Builds a request from the fields currently on the record.
    pub fn from_record(record: &DiagnosisRecord) -> Self {
        Self {
            image: record.image_ref.clone(),
            symptoms: SymptomReport {
                severity: record.severity,
                pain_level: record.pain_level,
                itching_level: record.itching_level,
                duration: record.duration.clone(),
                progression: record.progression,
                is_recurring: record.is_recurring,
                symptoms_text: record.symptoms_text.clone(),
            },
        }
    }
}

/// Errors an inference backend can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    #[error("no image supplied")]
    MissingImage,

    #[error("model unavailable: {0}")]
    Unavailable(String),

    #[error("could not analyze image: {0}")]
    Unprocessable(String),
}

/// Port for skin-condition inference.
#[async_trait]
pub trait InferenceProvider: Send + Sync {
    /// Assess one scan.
    async fn analyze(&self, request: &InferenceRequest) -> Result<AnalysisResult, InferenceError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnosis::DiagnosisUpdate;
    use crate::domain::foundation::{SymptomLevel, Timestamp};

    #[test]
    fn request_from_record_copies_symptoms_and_image() {
        let record = DiagnosisRecord::default()
            .merged(DiagnosisUpdate::image(
                ImageRef::new("file:///a.jpg").unwrap(),
                Timestamp::now(),
            ))
            .merged(DiagnosisUpdate {
                severity: Some(SymptomLevel::try_new(4).unwrap()),
                symptoms_text: Some("burning".into()),
                ..Default::default()
            });

        let request = InferenceRequest::from_record(&record);
        assert_eq!(request.image.unwrap().as_str(), "file:///a.jpg");
        assert_eq!(request.symptoms.severity.value(), 4);
        assert_eq!(request.symptoms.symptoms_text, "burning");
    }
}
