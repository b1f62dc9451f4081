//! Rule-based inference placeholder.
//!
//! Labels a scan from the reported severity alone. It stands in for a real
//! model behind the same port and never looks at the image pixels.

use async_trait::async_trait;

use crate::domain::diagnosis::AnalysisResult;
use crate::domain::foundation::Confidence;
use crate::ports::{InferenceError, InferenceProvider, InferenceRequest};

/// Severity at or above which the severe label is assigned.
const SEVERE_FROM: u8 = 4;

const MILD_CONDITION: &str = "Contact Dermatitis";
const MILD_CONFIDENCE: f64 = 0.85;
const SEVERE_CONDITION: &str = "Severe Skin Condition";
const SEVERE_CONFIDENCE: f64 = 0.55;

const RECOMMENDATIONS: [&str; 3] = [
    "Keep the affected area clean and dry",
    "Avoid scratching or irritating the area",
    "Apply gentle moisturizer",
];

/// Placeholder provider: severity below 4 is contact dermatitis at 85%,
/// anything else is a severe condition at 55%.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedInferenceProvider {
    require_image: bool,
}

impl RuleBasedInferenceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `MissingImage` when the request carries no photo.
    pub fn requiring_image(mut self) -> Self {
        self.require_image = true;
        self
    }
}

#[async_trait]
impl InferenceProvider for RuleBasedInferenceProvider {
    async fn analyze(&self, request: &InferenceRequest) -> Result<AnalysisResult, InferenceError> {
        if self.require_image && request.image.is_none() {
            return Err(InferenceError::MissingImage);
        }

        let (condition, confidence) = if request.symptoms.severity.value() < SEVERE_FROM {
            (MILD_CONDITION, MILD_CONFIDENCE)
        } else {
            (SEVERE_CONDITION, SEVERE_CONFIDENCE)
        };

        Ok(AnalysisResult::new(condition, Confidence::new(confidence))
            .with_recommendations(RECOMMENDATIONS))
    }

    fn name(&self) -> &'static str {
        "rule-based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::diagnosis::SymptomForm;

    fn request(severity: u8) -> InferenceRequest {
        InferenceRequest {
            image: None,
            symptoms: SymptomForm {
                severity,
                pain_level: 1,
                ..Default::default()
            }
            .validate()
            .unwrap(),
        }
    }

    #[tokio::test]
    async fn low_severity_is_contact_dermatitis() {
        let result = RuleBasedInferenceProvider::new()
            .analyze(&request(3))
            .await
            .unwrap();
        assert_eq!(result.condition, "Contact Dermatitis");
        assert_eq!(result.confidence.value(), 0.85);
        assert_eq!(result.recommendations.len(), 3);
    }

    #[tokio::test]
    async fn high_severity_is_severe_condition() {
        let result = RuleBasedInferenceProvider::new()
            .analyze(&request(4))
            .await
            .unwrap();
        assert_eq!(result.condition, "Severe Skin Condition");
        assert_eq!(result.confidence.value(), 0.55);
    }

    #[tokio::test]
    async fn requiring_image_rejects_missing_photo() {
        let err = RuleBasedInferenceProvider::new()
            .requiring_image()
            .analyze(&request(1))
            .await
            .unwrap_err();
        assert_eq!(err, InferenceError::MissingImage);
    }
}
