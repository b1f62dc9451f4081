//! Assessment produced by an inference provider.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Confidence;

/// Condition label, confidence and advice returned for one scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub condition: String,
    pub confidence: Confidence,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    pub fn new(condition: impl Into<String>, confidence: Confidence) -> Self {
        Self {
            condition: condition.into(),
            confidence,
            recommendations: Vec::new(),
        }
    }

    pub fn with_recommendations<I, S>(mut self, recommendations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommendations = recommendations.into_iter().map(Into::into).collect();
        self
    }
}
