//! Capture quality gates.
//!
//! Neither gate inspects pixels. `RandomQualityGate` simulates blur with a
//! fixed failure rate; `FixedQualityGate` always returns one verdict.

use async_trait::async_trait;
use rand::Rng;

use crate::domain::diagnosis::ImageRef;
use crate::domain::workflow::CaptureQuality;
use crate::ports::CaptureQualityGate;

/// Reports a photo as blurry with probability `failure_rate`.
#[derive(Debug, Clone, Copy)]
pub struct RandomQualityGate {
    failure_rate: f64,
}

impl RandomQualityGate {
    /// The rate is clamped into [0, 1].
    pub fn new(failure_rate: f64) -> Self {
        let failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };
        Self { failure_rate }
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }
}

#[async_trait]
impl CaptureQualityGate for RandomQualityGate {
    async fn assess(&self, image: &ImageRef) -> CaptureQuality {
        let blurry = rand::thread_rng().gen_bool(self.failure_rate);
        tracing::debug!(image = image.as_str(), blurry, "Capture quality assessed");
        if blurry {
            CaptureQuality::Blurry
        } else {
            CaptureQuality::Sharp
        }
    }
}

/// Always returns the same verdict.
#[derive(Debug, Clone, Copy)]
pub struct FixedQualityGate(CaptureQuality);

impl FixedQualityGate {
    pub fn sharp() -> Self {
        Self(CaptureQuality::Sharp)
    }

    pub fn blurry() -> Self {
        Self(CaptureQuality::Blurry)
    }
}

#[async_trait]
impl CaptureQualityGate for FixedQualityGate {
    async fn assess(&self, _image: &ImageRef) -> CaptureQuality {
        self.0
    }
}
