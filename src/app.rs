//! Composition root.
//!
//! Builds the store, repositories and handlers from an [`AppConfig`] so
//! drivers and integration tests wire things the same way.

use std::sync::Arc;

use crate::adapters::{
    FileKeyValueStore, FixedQualityGate, InMemoryKeyValueStore, RandomQualityGate,
    RuleBasedInferenceProvider, StoreHistoryRepository, StoreUserRepository,
};
use crate::application::{
    ClearHistoryHandler, DiagnosisStateContainer, GetCurrentUserHandler, GetScanHandler,
    ListHistoryHandler, RegisterUserHandler, ScanWorkflowController, SignInHandler,
    SignOutHandler, UpdateProfileHandler,
};
use crate::config::{AppConfig, QualityGateKind, StorageBackend};
use crate::domain::workflow::WorkflowReducer;
use crate::ports::{
    CaptureQualityGate, HistoryRepository, ImageSource, InferenceProvider, KeyValueStore,
    UserRepository,
};

/// Shared collaborators for one running instance.
#[derive(Clone)]
pub struct App {
    config: AppConfig,
    history: Arc<dyn HistoryRepository>,
    users: Arc<dyn UserRepository>,
    inference: Arc<dyn InferenceProvider>,
    quality_gate: Arc<dyn CaptureQualityGate>,
}

impl App {
    /// Wire everything from configuration.
    pub fn from_config(config: AppConfig) -> Self {
        let store: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::File => Arc::new(FileKeyValueStore::new(&config.storage.data_dir)),
            StorageBackend::Memory => Arc::new(InMemoryKeyValueStore::new()),
        };
        Self::with_store(config, store)
    }

    /// Wire everything on top of an existing store.
    pub fn with_store(config: AppConfig, store: Arc<dyn KeyValueStore>) -> Self {
        let quality_gate: Arc<dyn CaptureQualityGate> = match config.workflow.quality_gate {
            QualityGateKind::Random => {
                Arc::new(RandomQualityGate::new(config.workflow.blur_failure_rate))
            }
            QualityGateKind::AlwaysSharp => Arc::new(FixedQualityGate::sharp()),
        };

        tracing::debug!(
            backend = ?config.storage.backend,
            quality_gate = ?config.workflow.quality_gate,
            "Application wired"
        );

        Self {
            history: Arc::new(StoreHistoryRepository::new(store.clone())),
            users: Arc::new(StoreUserRepository::new(store)),
            inference: Arc::new(RuleBasedInferenceProvider::new()),
            quality_gate,
            config,
        }
    }

    /// Replace the capture quality gate.
    pub fn with_quality_gate(mut self, gate: Arc<dyn CaptureQualityGate>) -> Self {
        self.quality_gate = gate;
        self
    }

    /// Replace the inference provider.
    pub fn with_inference(mut self, inference: Arc<dyn InferenceProvider>) -> Self {
        self.inference = inference;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn history(&self) -> Arc<dyn HistoryRepository> {
        self.history.clone()
    }

    pub fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    /// A fresh state container bound to this app's history.
    pub fn state_container(&self) -> Arc<DiagnosisStateContainer> {
        Arc::new(DiagnosisStateContainer::new(
            self.history.clone(),
            self.config.referral,
        ))
    }

    /// A workflow controller for one session, reading photos from `image_source`.
    pub fn scan_controller(&self, image_source: Arc<dyn ImageSource>) -> ScanWorkflowController {
        ScanWorkflowController::new(
            WorkflowReducer::new(self.config.referral),
            self.state_container(),
            image_source,
            self.quality_gate.clone(),
            self.inference.clone(),
        )
        .with_timing(self.config.workflow.timing())
    }

    pub fn register_user(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(self.users.clone())
    }

    pub fn sign_in(&self) -> SignInHandler {
        SignInHandler::new(self.users.clone())
    }

    pub fn sign_out(&self) -> SignOutHandler {
        SignOutHandler::new(self.users.clone())
    }

    pub fn update_profile(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.users.clone())
    }

    pub fn current_user(&self) -> GetCurrentUserHandler {
        GetCurrentUserHandler::new(self.users.clone())
    }

    pub fn list_history(&self) -> ListHistoryHandler {
        ListHistoryHandler::new(self.history.clone())
    }

    pub fn get_scan(&self) -> GetScanHandler {
        GetScanHandler::new(self.history.clone())
    }

    pub fn clear_history(&self) -> ClearHistoryHandler {
        ClearHistoryHandler::new(self.history.clone())
    }
}
