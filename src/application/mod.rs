//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Commands (register, save a scan) are kept apart from queries (history,
//! current user).

pub mod handlers;

pub use handlers::{
    // Scan workflow
    DiagnosisStateContainer, ScanTiming, ScanWorkflowController,
    // History
    ClearHistoryHandler, GetScanHandler, GetScanQuery, ListHistoryHandler,
    // Accounts
    GetCurrentUserHandler, RegisterUserCommand, RegisterUserHandler, RegisterUserResult,
    SignInCommand, SignInHandler, SignInResult, SignOutHandler, UpdateProfileCommand,
    UpdateProfileHandler, UpdateProfileResult,
};
