//! End-to-end scan workflow through the composition root with in-memory
//! storage and immediate timing.

use std::sync::Arc;

use async_trait::async_trait;

use derma_scan::adapters::{FixedQualityGate, InMemoryKeyValueStore};
use derma_scan::app::App;
use derma_scan::application::ScanTiming;
use derma_scan::config::AppConfig;
use derma_scan::domain::diagnosis::{ImageRef, Progression, SymptomForm};
use derma_scan::domain::navigation::Route;
use derma_scan::domain::workflow::{CaptureError, CareBranch, WorkflowError, WorkflowStage};
use derma_scan::ports::{keys, CaptureSource, ImageSource, KeyValueStore};

struct StaticImageSource(&'static str);

#[async_trait]
impl ImageSource for StaticImageSource {
    async fn acquire(&self, _source: CaptureSource) -> Result<Option<ImageRef>, CaptureError> {
        Ok(Some(ImageRef::new(self.0).unwrap()))
    }
}

fn app(store: InMemoryKeyValueStore) -> App {
    App::with_store(AppConfig::default(), Arc::new(store))
        .with_quality_gate(Arc::new(FixedQualityGate::sharp()))
}

fn form(severity: u8, text: &str) -> SymptomForm {
    SymptomForm {
        severity,
        pain_level: 2,
        itching_level: Some(3),
        duration: "1 week".into(),
        progression: Some(Progression::Worse),
        is_recurring: Some(true),
        symptoms_text: text.into(),
    }
}

#[tokio::test]
async fn two_scans_are_listed_newest_first() {
    let store = InMemoryKeyValueStore::new();
    let app = app(store.clone());

    for (severity, text) in [(2, "first"), (5, "second")] {
        let controller = app
            .scan_controller(Arc::new(StaticImageSource("file:///arm.jpg")))
            .with_timing(ScanTiming::immediate());
        controller.start_scan().await.unwrap();
        controller.capture(CaptureSource::Camera).await.unwrap();
        controller.submit_symptoms(form(severity, text)).await.unwrap();
        controller.run_inference().await.unwrap();
        controller.save_and_finish().await.unwrap();
    }

    let entries = app.list_history().handle().await;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].symptoms_text, "second");
    assert_eq!(entries[0].condition, "Severe Skin Condition");
    assert_eq!(entries[1].symptoms_text, "first");
    assert_eq!(entries[1].condition, "Contact Dermatitis");

    let raw = store.get(keys::DIAGNOSIS_HISTORY).await.unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let newest = &json[0];
    assert_eq!(newest["imageUri"], "file:///arm.jpg");
    assert_eq!(newest["painLevel"], 2);
    assert_eq!(newest["itchingLevel"], 3);
    assert_eq!(newest["progression"], "worse");
    assert_eq!(newest["isRecurring"], true);
    assert_eq!(newest["symptoms"], "second");
    assert!(newest.get("heatmapEnabled").is_none());
}

#[tokio::test]
async fn referral_branch_follows_severity_and_confidence() {
    let app = app(InMemoryKeyValueStore::new());
    let controller = app
        .scan_controller(Arc::new(StaticImageSource("file:///leg.jpg")))
        .with_timing(ScanTiming::immediate());

    controller.start_scan().await.unwrap();
    controller.capture(CaptureSource::Gallery).await.unwrap();
    controller.submit_symptoms(form(4, "spreading")).await.unwrap();

    assert_eq!(controller.run_inference().await.unwrap(), Route::DoctorAlert);
    assert_eq!(
        controller.stage().await,
        WorkflowStage::Resolved(CareBranch::DoctorReferral)
    );
    assert_eq!(controller.view_care_plan().await.unwrap(), Route::SelfCarePlan);
}

#[tokio::test]
async fn steps_out_of_order_are_rejected() {
    let app = app(InMemoryKeyValueStore::new());
    let controller = app
        .scan_controller(Arc::new(StaticImageSource("file:///leg.jpg")))
        .with_timing(ScanTiming::immediate());

    let err = controller.capture(CaptureSource::Camera).await.unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidAction { .. }));

    let err = controller.run_inference().await.unwrap_err();
    assert!(matches!(err, WorkflowError::InvalidAction { .. }));
    assert_eq!(controller.stage().await, WorkflowStage::Idle);
}

#[tokio::test]
async fn history_is_empty_on_a_fresh_store_and_after_clear() {
    let app = app(InMemoryKeyValueStore::new());
    assert!(app.list_history().handle().await.is_empty());

    let controller = app
        .scan_controller(Arc::new(StaticImageSource("file:///arm.jpg")))
        .with_timing(ScanTiming::immediate());
    controller.start_scan().await.unwrap();
    controller.capture(CaptureSource::Camera).await.unwrap();
    controller.submit_symptoms(form(1, "dry")).await.unwrap();
    controller.run_inference().await.unwrap();
    controller.save_and_finish().await.unwrap();

    assert_eq!(app.clear_history().handle().await.unwrap(), 1);
    assert!(app.list_history().handle().await.is_empty());
}
