//! Key-value backed user repository.
//!
//! Accounts are kept as a JSON array under `users`; the signed-in user is a
//! copy stored under `currentUser`. Lookups treat a failed read as absent;
//! inserts and updates abort on it so the stored list is never overwritten
//! from a partial view.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::user::UserRecord;
use crate::ports::{keys, KeyValueStore, StoreError, UserRepository};

/// User repository persisting through a [`KeyValueStore`].
pub struct StoreUserRepository {
    store: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl StoreUserRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Reads and decodes `key`. Malformed values read as `None`; store
    /// failures are returned.
    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "Stored value is malformed, ignoring");
                Ok(None)
            }
        }
    }

    /// Like [`Self::read_json`] but logs store failures and reads them as `None`.
    async fn read_json_lenient<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.read_json(key).await.unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Failed to read from store");
            None
        })
    }

    /// User list for a read-modify-write; a failed read aborts the write.
    async fn load_users_for_write(&self) -> Result<Vec<UserRecord>, DomainError> {
        self.read_json::<Vec<UserRecord>>(keys::USERS)
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| storage_error("Failed to read users", e))
    }

    async fn save_users(&self, users: &[UserRecord]) -> Result<(), DomainError> {
        let json = serde_json::to_string(users)
            .map_err(|e| storage_error("Failed to serialize users", e))?;
        self.store
            .set(keys::USERS, &json)
            .await
            .map_err(|e| storage_error("Failed to save users", e))
    }
}

fn storage_error(context: &str, err: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::StorageError, format!("{}: {}", context, err))
}

#[async_trait]
impl UserRepository for StoreUserRepository {
    async fn find_by_email(&self, email: &str) -> Option<UserRecord> {
        self.read_json_lenient::<Vec<UserRecord>>(keys::USERS)
            .await
            .unwrap_or_default()
            .into_iter()
            .find(|u| u.has_email(email))
    }

    async fn insert(&self, user: &UserRecord) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.load_users_for_write().await?;
        if users.iter().any(|u| u.has_email(&user.email)) {
            return Err(DomainError::new(
                ErrorCode::DuplicateEmail,
                "An account with this email already exists",
            )
            .with_detail("email", user.email.clone()));
        }
        users.push(user.clone());
        self.save_users(&users).await
    }

    async fn update(&self, user: &UserRecord) -> Result<(), DomainError> {
        let _guard = self.write_lock.lock().await;

        let mut users = self.load_users_for_write().await?;
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::UserNotFound, "User not found")
                    .with_detail("user_id", user.id.to_string())
            })?;
        *slot = user.clone();
        self.save_users(&users).await
    }

    async fn current_session(&self) -> Option<UserRecord> {
        self.read_json_lenient(keys::CURRENT_USER).await
    }

    async fn set_session(&self, user: &UserRecord) -> Result<(), DomainError> {
        let json = serde_json::to_string(user)
            .map_err(|e| storage_error("Failed to serialize session", e))?;
        self.store
            .set(keys::CURRENT_USER, &json)
            .await
            .map_err(|e| storage_error("Failed to save session", e))
    }

    async fn clear_session(&self) -> Result<(), DomainError> {
        self.store
            .remove(keys::CURRENT_USER)
            .await
            .map_err(|e| storage_error("Failed to clear session", e))
    }
}
