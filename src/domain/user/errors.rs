//! Account-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by sign-up, sign-in and profile editing.
///
/// `Display` gives the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Please fill in all required fields")]
    MissingRequiredFields,

    #[error("Please fill in name and email")]
    MissingNameOrEmail,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("An account with this email already exists. Please sign in.")]
    DuplicateEmail,

    #[error("Please enter your phone number to complete your profile")]
    PhoneRequired,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("No user is signed in")]
    NotSignedIn,

    #[error("Something went wrong. Please try again.")]
    Storage(String),
}

impl AccountError {
    pub fn storage(message: impl Into<String>) -> Self {
        AccountError::Storage(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::MissingRequiredFields
            | AccountError::MissingNameOrEmail
            | AccountError::PhoneRequired => ErrorCode::ValidationFailed,
            AccountError::PasswordMismatch => ErrorCode::PasswordMismatch,
            AccountError::PasswordTooShort { .. } => ErrorCode::PasswordTooShort,
            AccountError::DuplicateEmail => ErrorCode::DuplicateEmail,
            AccountError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AccountError::NotSignedIn => ErrorCode::NotSignedIn,
            AccountError::Storage(_) => ErrorCode::StorageError,
        }
    }

    /// Validation failures abort before anything is written.
    pub fn is_validation(&self) -> bool {
        !matches!(self, AccountError::Storage(_))
    }
}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DuplicateEmail => AccountError::DuplicateEmail,
            ErrorCode::NotSignedIn => AccountError::NotSignedIn,
            _ => AccountError::Storage(err.to_string()),
        }
    }
}
