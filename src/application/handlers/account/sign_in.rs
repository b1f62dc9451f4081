//! SignInHandler and SignOutHandler - session management.

use std::sync::Arc;

use crate::domain::navigation::Route;
use crate::domain::user::{AccountError, UserRecord};
use crate::ports::UserRepository;

/// Command to sign in with email and password.
#[derive(Debug, Clone)]
pub struct SignInCommand {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct SignInResult {
    pub user: UserRecord,
    pub next: Route,
}

/// Handler for signing in.
pub struct SignInHandler {
    users: Arc<dyn UserRepository>,
}

impl SignInHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: SignInCommand) -> Result<SignInResult, AccountError> {
        let user = self
            .users
            .find_by_email(&cmd.email)
            .await
            .filter(|u| u.password_matches(&cmd.password))
            .ok_or(AccountError::InvalidCredentials)?;

        self.users.set_session(&user).await?;
        tracing::info!(user_id = %user.id, "User signed in");

        Ok(SignInResult {
            user,
            next: Route::Dashboard,
        })
    }
}

/// Handler for signing out.
pub struct SignOutHandler {
    users: Arc<dyn UserRepository>,
}

impl SignOutHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Clears the session and returns the landing screen.
    pub async fn handle(&self) -> Result<Route, AccountError> {
        self.users.clear_session().await?;
        tracing::info!("User signed out");
        Ok(Route::Landing)
    }
}
