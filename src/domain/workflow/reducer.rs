//! Pure transition function for the scan workflow.
//!
//! Side effects (camera, quality check, inference, persistence) happen
//! outside; their results come back in as [`WorkflowEvent`]s and the
//! reducer folds them into a new [`WorkflowState`].

use super::{CareBranch, WorkflowError, WorkflowStage};
use crate::domain::diagnosis::{
    AnalysisResult, DiagnosisRecord, DiagnosisUpdate, ImageRef, ReferralPolicy, SymptomReport,
};
use crate::domain::foundation::{StateMachine, Timestamp};

/// Result of the capture-quality gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureQuality {
    Sharp,
    Blurry,
}

/// Stage plus the in-progress record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorkflowState {
    pub stage: WorkflowStage,
    pub record: DiagnosisRecord,
}

/// Everything that can move a scan forward.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// User starts a new scan; the record is reset first.
    StartScan,
    /// A photo was acquired and graded.
    ImageAssessed {
        image: ImageRef,
        captured_at: Timestamp,
        quality: CaptureQuality,
    },
    /// Back to the camera from the error screen or the details form.
    Retake,
    /// Details form submitted; merged in a single update.
    SymptomsSubmitted(SymptomReport),
    AnalysisCompleted {
        result: AnalysisResult,
        analyzed_at: Timestamp,
    },
    /// Inference did not produce a result; the user may resubmit.
    AnalysisFailed,
    /// From the referral screen, open the self-care plan anyway.
    ViewCarePlan,
    ToggleHeatmap(bool),
    /// Scan was saved; clear the record and return to idle.
    Finished,
    /// Navigate away mid-flow. The record is left as is.
    Abandon,
}

impl WorkflowEvent {
    fn action(&self) -> &'static str {
        match self {
            WorkflowEvent::StartScan => "start a scan",
            WorkflowEvent::ImageAssessed { .. } => "accept an image",
            WorkflowEvent::Retake => "retake the photo",
            WorkflowEvent::SymptomsSubmitted(_) => "submit symptoms",
            WorkflowEvent::AnalysisCompleted { .. } => "complete analysis",
            WorkflowEvent::AnalysisFailed => "fail analysis",
            WorkflowEvent::ViewCarePlan => "view the care plan",
            WorkflowEvent::ToggleHeatmap(_) => "toggle the heatmap",
            WorkflowEvent::Finished => "finish",
            WorkflowEvent::Abandon => "abandon",
        }
    }
}

/// Applies events under a fixed referral policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowReducer {
    policy: ReferralPolicy,
}

impl WorkflowReducer {
    pub fn new(policy: ReferralPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ReferralPolicy {
        &self.policy
    }

    pub fn reduce(
        &self,
        state: WorkflowState,
        event: WorkflowEvent,
    ) -> Result<WorkflowState, WorkflowError> {
        use WorkflowStage::*;

        let WorkflowState { stage, mut record } = state;
        let action = event.action();

        let next = match event {
            WorkflowEvent::StartScan => {
                record.reset();
                Capturing
            }
            WorkflowEvent::ImageAssessed {
                image,
                captured_at,
                quality,
            } => {
                if stage != Capturing {
                    return Err(WorkflowError::invalid_action(stage, action));
                }
                // The photo is kept even when rejected; the retake overwrites it.
                record.apply(DiagnosisUpdate::image(image, captured_at));
                match quality {
                    CaptureQuality::Sharp => stage.transition_to(DetailsEntry)?,
                    CaptureQuality::Blurry => stage.transition_to(CaptureFailed)?,
                }
            }
            WorkflowEvent::Retake => match stage {
                CaptureFailed | DetailsEntry => stage.transition_to(Capturing)?,
                _ => return Err(WorkflowError::invalid_action(stage, action)),
            },
            WorkflowEvent::SymptomsSubmitted(report) => {
                if stage != DetailsEntry {
                    return Err(WorkflowError::invalid_action(stage, action));
                }
                record.apply(report.into());
                stage.transition_to(Inferring)?
            }
            WorkflowEvent::AnalysisCompleted {
                result,
                analyzed_at,
            } => {
                if stage != Inferring {
                    return Err(WorkflowError::invalid_action(stage, action));
                }
                record.apply(DiagnosisUpdate::analysis(result, analyzed_at));
                let branch =
                    CareBranch::from_referral(record.needs_doctor_referral_under(&self.policy));
                stage.transition_to(Resolved(branch))?
            }
            WorkflowEvent::AnalysisFailed => {
                if stage != Inferring {
                    return Err(WorkflowError::invalid_action(stage, action));
                }
                stage.transition_to(DetailsEntry)?
            }
            WorkflowEvent::ViewCarePlan => match stage {
                Resolved(CareBranch::CareAdvice) => stage,
                Resolved(CareBranch::DoctorReferral) => {
                    stage.transition_to(Resolved(CareBranch::CareAdvice))?
                }
                _ => return Err(WorkflowError::invalid_action(stage, action)),
            },
            WorkflowEvent::ToggleHeatmap(enabled) => {
                if !stage.is_resolved() {
                    return Err(WorkflowError::invalid_action(stage, action));
                }
                record.apply(DiagnosisUpdate::heatmap(enabled));
                stage
            }
            WorkflowEvent::Finished => {
                if !stage.is_resolved() {
                    return Err(WorkflowError::invalid_action(stage, action));
                }
                record.reset();
                stage.transition_to(Idle)?
            }
            WorkflowEvent::Abandon => {
                if stage == Idle {
                    Idle
                } else {
                    stage.transition_to(Idle)?
                }
            }
        };

        Ok(WorkflowState {
            stage: next,
            record,
        })
    }
}
