//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence Ports
//!
//! - `KeyValueStore` - Opaque device-local string store
//! - `HistoryRepository` - Newest-first list of finished scans
//! - `UserRepository` - Account list and session slot
//!
//! ## Device and Model Ports
//!
//! - `ImageSource` - Camera and gallery
//! - `CaptureQualityGate` - Sharp/blurry decision for a photo
//! - `InferenceProvider` - Condition assessment

mod capture_quality_gate;
mod history_repository;
mod image_source;
mod inference_provider;
mod key_value_store;
mod user_repository;

pub use capture_quality_gate::CaptureQualityGate;
pub use history_repository::HistoryRepository;
pub use image_source::{CaptureSource, ImageSource};
pub use inference_provider::{InferenceError, InferenceProvider, InferenceRequest};
pub use key_value_store::{keys, KeyValueStore, StoreError};
pub use user_repository::UserRepository;
