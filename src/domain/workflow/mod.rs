//! Scan workflow domain module.
//!
//! `Idle → Capturing → DetailsEntry → Inferring → Resolved{CareAdvice |
//! DoctorReferral}`, with `CaptureFailed` offering a retake. Transitions are
//! a pure reducer over [`WorkflowState`]; the application layer runs the
//! side effects and feeds their outcomes back in as events.

mod errors;
mod reducer;
mod stage;

pub use errors::{CaptureError, WorkflowError};
pub use reducer::{CaptureQuality, WorkflowEvent, WorkflowReducer, WorkflowState};
pub use stage::{CareBranch, WorkflowStage};
