//! Key-Value Store Port - the device-local persistence collaborator.
//!
//! One string value per key, with no transactions, no locking and no
//! timeouts. Callers decide how to bound waits and how to treat failures.

use async_trait::async_trait;

/// Keys used by the app.
pub mod keys {
    /// JSON array of history entries, newest first.
    pub const DIAGNOSIS_HISTORY: &str = "diagnosisHistory";
    /// JSON array of user records.
    pub const USERS: &str = "users";
    /// JSON object for the signed-in user; absent when signed out.
    pub const CURRENT_USER: &str = "currentUser";
}

/// Errors that can occur during store operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Port for the opaque string store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the value under `key`; `None` when nothing was ever written.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
