//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod account;
pub mod diagnosis;
pub mod history;
pub mod scan;

pub use account::{
    GetCurrentUserHandler, RegisterUserCommand, RegisterUserHandler, RegisterUserResult,
    SignInCommand, SignInHandler, SignInResult, SignOutHandler, UpdateProfileCommand,
    UpdateProfileHandler, UpdateProfileResult,
};
pub use diagnosis::DiagnosisStateContainer;
pub use history::{ClearHistoryHandler, GetScanHandler, GetScanQuery, ListHistoryHandler};
pub use scan::{ScanTiming, ScanWorkflowController};
