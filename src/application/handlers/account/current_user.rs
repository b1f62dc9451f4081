//! GetCurrentUserHandler - Query handler for the signed-in user.

use std::sync::Arc;

use crate::domain::user::{UserRecord, DEFAULT_GREETING_NAME};
use crate::ports::UserRepository;

/// Handler for reading the session.
pub struct GetCurrentUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetCurrentUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self) -> Option<UserRecord> {
        self.users.current_session().await
    }

    /// Name for the dashboard greeting.
    pub async fn greeting_name(&self) -> String {
        self.handle()
            .await
            .map(|u| u.greeting_name().to_string())
            .unwrap_or_else(|| DEFAULT_GREETING_NAME.to_string())
    }
}
