//! UpdateProfileHandler - Command handler for editing the signed-in profile.

use std::sync::Arc;

use crate::domain::foundation::ErrorCode;
use crate::domain::navigation::Route;
use crate::domain::user::{AccountError, ProfileForm, UserRecord};
use crate::ports::UserRepository;

/// Command to edit the signed-in user's profile.
#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub form: ProfileForm,
    /// Completing the profile right after registration; phone is required.
    pub is_new_user: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateProfileResult {
    pub user: UserRecord,
    pub next: Route,
}

/// Handler for profile edits.
pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        cmd: UpdateProfileCommand,
    ) -> Result<UpdateProfileResult, AccountError> {
        // 1. Validate before touching storage
        let edit = cmd.form.validate(cmd.is_new_user)?;

        let mut user = self
            .users
            .current_session()
            .await
            .ok_or(AccountError::NotSignedIn)?;

        // 2. A changed email must not collide with another account
        if let Some(other) = self.users.find_by_email(&edit.email).await {
            if other.id != user.id {
                return Err(AccountError::DuplicateEmail);
            }
        }

        user.apply_profile(edit);

        // 3. Stored list first so a failed write leaves the session untouched
        match self.users.update(&user).await {
            Ok(()) => {}
            Err(e) if e.code == ErrorCode::UserNotFound => {
                tracing::warn!(user_id = %user.id, "Signed-in user missing from user list");
            }
            Err(e) => return Err(e.into()),
        }
        self.users.set_session(&user).await?;

        tracing::info!(user_id = %user.id, is_new_user = cmd.is_new_user, "Profile updated");

        let next = if cmd.is_new_user {
            Route::Dashboard
        } else {
            Route::Profile
        };
        Ok(UpdateProfileResult { user, next })
    }
}
