//! Capture Quality Gate Port - decides whether a photo is usable.

use async_trait::async_trait;

use crate::domain::diagnosis::ImageRef;
use crate::domain::workflow::CaptureQuality;

/// Port grading a freshly acquired photo as sharp or blurry.
#[async_trait]
pub trait CaptureQualityGate: Send + Sync {
    async fn assess(&self, image: &ImageRef) -> CaptureQuality;
}
