//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to the device and to storage:
//! - `storage` - Key-value stores (file, in-memory)
//! - `history` - History repository over a key-value store
//! - `accounts` - User repository over a key-value store
//! - `inference` - Rule-based inference placeholder
//! - `capture` - File-backed image source and quality gates

pub mod accounts;
pub mod capture;
pub mod history;
pub mod inference;
pub mod storage;

pub use accounts::StoreUserRepository;
pub use capture::{FileImageSource, FixedQualityGate, RandomQualityGate};
pub use history::StoreHistoryRepository;
pub use inference::RuleBasedInferenceProvider;
pub use storage::{FileKeyValueStore, InMemoryKeyValueStore};
