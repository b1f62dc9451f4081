//! Image source backed by a file on disk.
//!
//! Used by the command-line driver in place of the device camera and photo
//! library. With no path configured it behaves like a dismissed picker.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::diagnosis::ImageRef;
use crate::domain::workflow::CaptureError;
use crate::ports::{CaptureSource, ImageSource};

/// Hands out a `file://` reference to a single image file.
#[derive(Debug, Clone, Default)]
pub struct FileImageSource {
    path: Option<PathBuf>,
}

impl FileImageSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: Some(path.as_ref().to_path_buf()),
        }
    }

    /// A source whose picker is always dismissed.
    pub fn cancelled() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ImageSource for FileImageSource {
    async fn acquire(&self, source: CaptureSource) -> Result<Option<ImageRef>, CaptureError> {
        let Some(path) = &self.path else {
            tracing::debug!(?source, "Image picker dismissed");
            return Ok(None);
        };

        let absolute = fs::canonicalize(path).await.map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => CaptureError::PermissionDenied,
            _ => CaptureError::device(format!("{}: {}", path.display(), e)),
        })?;

        let metadata = fs::metadata(&absolute)
            .await
            .map_err(|e| CaptureError::device(e.to_string()))?;
        if !metadata.is_file() {
            return Err(CaptureError::device(format!(
                "{} is not a file",
                absolute.display()
            )));
        }

        let uri = format!("file://{}", absolute.display());
        tracing::debug!(?source, uri = %uri, "Image acquired");
        ImageRef::new(uri)
            .map(Some)
            .map_err(|e| CaptureError::device(e.to_string()))
    }
}
