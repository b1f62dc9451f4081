//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the scan workflow.

mod confidence;
mod errors;
mod ids;
mod state_machine;
mod symptom_level;
mod timestamp;

pub use confidence::Confidence;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{HistoryEntryId, UserId};
pub use state_machine::{InvalidTransition, StateMachine};
pub use symptom_level::SymptomLevel;
pub use timestamp::Timestamp;
