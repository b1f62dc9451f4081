//! Diagnosis domain module.
//!
//! The in-progress scan record, the merge-update applied by each workflow
//! step, the symptom form, the assessment returned by inference and the
//! referral rule that picks the care branch.

mod analysis;
mod record;
mod referral;
mod symptoms;
mod values;

pub use analysis::AnalysisResult;
pub use record::{DiagnosisRecord, DiagnosisUpdate};
pub use referral::ReferralPolicy;
pub use symptoms::{SymptomForm, SymptomReport};
pub use values::{ImageRef, Progression, Recurrence};
