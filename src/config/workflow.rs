//! Scan workflow configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::ScanTiming;

/// Simulated delays and the capture quality gate
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowConfig {
    /// Wait on the processing screen before inference
    #[serde(default = "default_processing_delay_ms")]
    pub processing_delay_ms: u64,

    /// Wait on the analysis screen before the result appears
    #[serde(default = "default_analysis_delay_ms")]
    pub analysis_delay_ms: u64,

    /// Wait between acquiring a photo and grading it
    #[serde(default)]
    pub capture_check_delay_ms: u64,

    /// Probability that the random gate reports a photo as blurry
    #[serde(default = "default_blur_failure_rate")]
    pub blur_failure_rate: f64,

    #[serde(default)]
    pub quality_gate: QualityGateKind,
}

/// Which capture quality gate to install
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum QualityGateKind {
    #[default]
    Random,
    AlwaysSharp,
}

impl WorkflowConfig {
    pub fn timing(&self) -> ScanTiming {
        ScanTiming {
            processing_delay: Duration::from_millis(self.processing_delay_ms),
            analysis_delay: Duration::from_millis(self.analysis_delay_ms),
            capture_check_delay: Duration::from_millis(self.capture_check_delay_ms),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.blur_failure_rate) {
            return Err(ValidationError::InvalidFailureRate(self.blur_failure_rate));
        }
        Ok(())
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            processing_delay_ms: default_processing_delay_ms(),
            analysis_delay_ms: default_analysis_delay_ms(),
            capture_check_delay_ms: 0,
            blur_failure_rate: default_blur_failure_rate(),
            quality_gate: QualityGateKind::default(),
        }
    }
}

fn default_processing_delay_ms() -> u64 {
    3000
}

fn default_analysis_delay_ms() -> u64 {
    2000
}

fn default_blur_failure_rate() -> f64 {
    0.3
}
