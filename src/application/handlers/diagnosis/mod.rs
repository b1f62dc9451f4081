//! Diagnosis state handling.

mod state_container;

pub use state_container::DiagnosisStateContainer;
