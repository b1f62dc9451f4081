//! RegisterUserHandler - Command handler for creating an account.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::navigation::Route;
use crate::domain::user::{AccountError, SignUpForm, UserRecord};
use crate::ports::UserRepository;

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub form: SignUpForm,
}

/// Result of a successful registration.
#[derive(Debug, Clone)]
pub struct RegisterUserResult {
    pub user: UserRecord,
    /// Profile completion screen for the new account.
    pub next: Route,
}

/// Handler for registering users.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
}

impl RegisterUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<RegisterUserResult, AccountError> {
        // 1. Validate the form
        let user = cmd.form.into_user(Timestamp::now())?;

        // 2. Reject an email already on file, ignoring case
        if self.users.find_by_email(&user.email).await.is_some() {
            return Err(AccountError::DuplicateEmail);
        }

        // 3. Persist and open the session
        self.users.insert(&user).await?;
        self.users.set_session(&user).await?;

        tracing::info!(user_id = %user.id, "User registered");

        let next = Route::EditProfile {
            user_name: user.full_name.clone(),
            user_email: user.email.clone(),
            is_new_user: true,
        };
        Ok(RegisterUserResult { user, next })
    }
}
