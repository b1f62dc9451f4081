//! User Repository Port - account list plus the single session slot.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::user::UserRecord;

/// Repository port for user accounts and the current session.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Case-insensitive lookup by email. Read failures yield `None`.
    async fn find_by_email(&self, email: &str) -> Option<UserRecord>;

    /// Add a new user.
    ///
    /// # Errors
    ///
    /// - `DuplicateEmail` if any stored user has the same email, ignoring case
    /// - `StorageError` if the write fails
    async fn insert(&self, user: &UserRecord) -> Result<(), DomainError>;

    /// Replace the stored user with the same id.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if no stored user has that id
    /// - `StorageError` if the write fails
    async fn update(&self, user: &UserRecord) -> Result<(), DomainError>;

    /// The signed-in user, if any. Read failures yield `None`.
    async fn current_session(&self) -> Option<UserRecord>;

    /// Store a copy of `user` as the signed-in user.
    async fn set_session(&self, user: &UserRecord) -> Result<(), DomainError>;

    /// Sign out.
    async fn clear_session(&self) -> Result<(), DomainError>;
}
