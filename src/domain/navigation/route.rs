//! Typed navigation targets.
//!
//! Every screen transition names one of these variants; screens that need
//! input carry it as typed fields instead of an untyped parameter bag.

use serde::Serialize;

use crate::domain::history::HistoryEntry;
use crate::domain::workflow::{CareBranch, WorkflowStage};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "screen", content = "params")]
pub enum Route {
    Landing,
    SignIn,
    SignUp,
    Dashboard,
    Camera,
    CaptureError,
    SymptomDetails,
    AiProcessing,
    Analysis,
    SelfCarePlan,
    DoctorAlert,
    History,
    #[serde(rename_all = "camelCase")]
    ScanDetail {
        scan: HistoryEntry,
    },
    Guide,
    Profile,
    #[serde(rename_all = "camelCase")]
    EditProfile {
        user_name: String,
        user_email: String,
        is_new_user: bool,
    },
    Privacy,
}

impl Route {
    /// Screen shown for a workflow stage.
    pub fn for_stage(stage: WorkflowStage) -> Self {
        match stage {
            WorkflowStage::Idle => Route::Dashboard,
            WorkflowStage::Capturing => Route::Camera,
            WorkflowStage::CaptureFailed => Route::CaptureError,
            WorkflowStage::DetailsEntry => Route::SymptomDetails,
            WorkflowStage::Inferring => Route::AiProcessing,
            WorkflowStage::Resolved(CareBranch::CareAdvice) => Route::SelfCarePlan,
            WorkflowStage::Resolved(CareBranch::DoctorReferral) => Route::DoctorAlert,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Route::Landing => "Landing",
            Route::SignIn => "SignIn",
            Route::SignUp => "SignUp",
            Route::Dashboard => "Dashboard",
            Route::Camera => "Camera",
            Route::CaptureError => "CaptureError",
            Route::SymptomDetails => "SymptomDetails",
            Route::AiProcessing => "AIProcessing",
            Route::Analysis => "Analysis",
            Route::SelfCarePlan => "SelfCarePlan",
            Route::DoctorAlert => "DoctorAlert",
            Route::History => "History",
            Route::ScanDetail { .. } => "ScanDetail",
            Route::Guide => "Guide",
            Route::Profile => "Profile",
            Route::EditProfile { .. } => "EditProfile",
            Route::Privacy => "Privacy",
        }
    }
}
