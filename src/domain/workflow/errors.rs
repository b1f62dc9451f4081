//! Workflow-specific error types.

use thiserror::Error;

use super::WorkflowStage;
use crate::domain::foundation::{DomainError, ErrorCode, InvalidTransition, ValidationError};

/// Device or capability failure while acquiring a photo.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("Camera permission was denied")]
    PermissionDenied,

    #[error("Failed to capture image: {0}")]
    DeviceFailure(String),
}

impl CaptureError {
    pub fn device(message: impl Into<String>) -> Self {
        CaptureError::DeviceFailure(message.into())
    }
}

/// Errors raised while driving a scan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    #[error("Cannot {action} while {stage}")]
    InvalidAction {
        stage: WorkflowStage,
        action: &'static str,
    },

    #[error("{0}")]
    InvalidTransition(#[from] InvalidTransition<WorkflowStage>),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("Analysis failed: {0}")]
    Inference(String),

    #[error("Failed to save scan to history")]
    SaveFailed,
}

impl WorkflowError {
    pub fn invalid_action(stage: WorkflowStage, action: &'static str) -> Self {
        WorkflowError::InvalidAction { stage, action }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            WorkflowError::InvalidAction { .. } | WorkflowError::InvalidTransition(_) => {
                ErrorCode::InvalidStateTransition
            }
            WorkflowError::Validation(_) => ErrorCode::ValidationFailed,
            WorkflowError::Capture(_) => ErrorCode::CaptureFailed,
            WorkflowError::Inference(_) => ErrorCode::InferenceFailed,
            WorkflowError::SaveFailed => ErrorCode::StorageError,
        }
    }
}

impl From<WorkflowError> for DomainError {
    fn from(err: WorkflowError) -> Self {
        DomainError::new(err.code(), err.to_string())
    }
}
