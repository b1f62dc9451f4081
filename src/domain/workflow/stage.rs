//! WorkflowStage enum for tracking where a scan is in its lifecycle.

use std::fmt;

use crate::domain::foundation::StateMachine;

/// Which resolution screen a finished analysis routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CareBranch {
    /// Self-care plan.
    CareAdvice,
    /// Nearby-clinician guidance.
    DoctorReferral,
}

impl CareBranch {
    pub fn from_referral(needs_doctor: bool) -> Self {
        if needs_doctor {
            CareBranch::DoctorReferral
        } else {
            CareBranch::CareAdvice
        }
    }
}

/// Position of the scan in `Idle → Capturing → DetailsEntry → Inferring →
/// Resolved`, with `CaptureFailed` as the retry detour for blurry photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WorkflowStage {
    #[default]
    Idle,
    Capturing,
    CaptureFailed,
    DetailsEntry,
    Inferring,
    Resolved(CareBranch),
}

impl WorkflowStage {
    pub fn is_resolved(&self) -> bool {
        matches!(self, WorkflowStage::Resolved(_))
    }

    /// Stages during which a scan is underway.
    pub fn is_in_progress(&self) -> bool {
        !matches!(self, WorkflowStage::Idle)
    }
}

impl StateMachine for WorkflowStage {
    fn can_transition_to(&self, target: &Self) -> bool {
        self.valid_transitions().contains(target)
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use CareBranch::*;
        use WorkflowStage::*;
        match self {
            Idle => vec![Capturing],
            Capturing => vec![DetailsEntry, CaptureFailed, Idle],
            CaptureFailed => vec![Capturing, Idle],
            DetailsEntry => vec![Inferring, Capturing, Idle],
            Inferring => vec![
                Resolved(CareAdvice),
                Resolved(DoctorReferral),
                DetailsEntry,
                Idle,
            ],
            Resolved(DoctorReferral) => vec![Resolved(CareAdvice), Idle],
            Resolved(CareAdvice) => vec![Idle],
        }
    }
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkflowStage::Idle => "Idle",
            WorkflowStage::Capturing => "Capturing",
            WorkflowStage::CaptureFailed => "CaptureFailed",
            WorkflowStage::DetailsEntry => "DetailsEntry",
            WorkflowStage::Inferring => "Inferring",
            WorkflowStage::Resolved(CareBranch::CareAdvice) => "Resolved(CareAdvice)",
            WorkflowStage::Resolved(CareBranch::DoctorReferral) => "Resolved(DoctorReferral)",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use CareBranch::*;
    use WorkflowStage::*;

    const ALL: [WorkflowStage; 7] = [
        Idle,
        Capturing,
        CaptureFailed,
        DetailsEntry,
        Inferring,
        Resolved(CareAdvice),
        Resolved(DoctorReferral),
    ];

    #[test]
    fn default_is_idle() {
        assert_eq!(WorkflowStage::default(), Idle);
    }

    #[test]
    fn happy_path_is_linear() {
        let stage = Idle
            .transition_to(Capturing)
            .and_then(|s| s.transition_to(DetailsEntry))
            .and_then(|s| s.transition_to(Inferring))
            .and_then(|s| s.transition_to(Resolved(CareAdvice)))
            .and_then(|s| s.transition_to(Idle));
        assert_eq!(stage, Ok(Idle));
    }

    #[test]
    fn cannot_skip_details() {
        assert!(!Capturing.can_transition_to(&Inferring));
        assert!(!Idle.can_transition_to(&DetailsEntry));
    }

    #[test]
    fn blurry_capture_offers_retry() {
        assert!(Capturing.can_transition_to(&CaptureFailed));
        assert!(CaptureFailed.can_transition_to(&Capturing));
        assert!(!CaptureFailed.can_transition_to(&DetailsEntry));
    }

    #[test]
    fn referral_may_fall_through_to_care_plan_but_not_back() {
        assert!(Resolved(DoctorReferral).can_transition_to(&Resolved(CareAdvice)));
        assert!(!Resolved(CareAdvice).can_transition_to(&Resolved(DoctorReferral)));
    }

    #[test]
    fn every_stage_but_idle_can_be_abandoned() {
        for stage in ALL.iter().filter(|s| s.is_in_progress()) {
            assert!(stage.can_transition_to(&Idle), "{} should reach Idle", stage);
        }
    }

    #[test]
    fn no_stage_is_terminal() {
        assert!(ALL.iter().all(|s| !s.is_terminal()));
    }

    #[test]
    fn branch_from_referral_flag() {
        assert_eq!(CareBranch::from_referral(true), DoctorReferral);
        assert_eq!(CareBranch::from_referral(false), CareAdvice);
    }
}
