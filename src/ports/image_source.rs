//! Image Source Port - camera and gallery access.

use async_trait::async_trait;

use crate::domain::diagnosis::ImageRef;
use crate::domain::workflow::CaptureError;

/// Where the photo comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureSource {
    Camera,
    Gallery,
}

/// Port for acquiring a photo from the device.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Acquire one photo.
    ///
    /// Returns `Ok(None)` when the user dismissed the picker without
    /// choosing anything.
    ///
    /// # Errors
    ///
    /// - `PermissionDenied` when camera or library access is refused
    /// - `DeviceFailure` for any other device error
    async fn acquire(&self, source: CaptureSource) -> Result<Option<ImageRef>, CaptureError>;
}
