//! ScanWorkflowController - drives capture, details, inference and the care
//! branch for one session.
//!
//! Every step runs its side effect (camera, quality gate, inference,
//! persistence) first and then folds the outcome through the pure
//! [`WorkflowReducer`]. The stage lock is held for the whole step so user
//! actions apply in submission order.

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::application::handlers::diagnosis::DiagnosisStateContainer;
use crate::domain::diagnosis::{DiagnosisRecord, SymptomForm};
use crate::domain::foundation::Timestamp;
use crate::domain::navigation::Route;
use crate::domain::workflow::{
    WorkflowError, WorkflowEvent, WorkflowReducer, WorkflowStage, WorkflowState,
};
use crate::ports::{
    CaptureQualityGate, CaptureSource, ImageSource, InferenceProvider, InferenceRequest,
};

/// Simulated waits between workflow steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanTiming {
    /// Pause on the processing screen before inference starts.
    pub processing_delay: Duration,
    /// Pause on the analysis screen before the result is shown.
    pub analysis_delay: Duration,
    /// Pause between acquiring a photo and grading it.
    pub capture_check_delay: Duration,
}

impl ScanTiming {
    /// No waits at all. Used by tests and scripted runs.
    pub fn immediate() -> Self {
        Self {
            processing_delay: Duration::ZERO,
            analysis_delay: Duration::ZERO,
            capture_check_delay: Duration::ZERO,
        }
    }
}

impl Default for ScanTiming {
    fn default() -> Self {
        Self {
            processing_delay: Duration::from_millis(3000),
            analysis_delay: Duration::from_millis(2000),
            capture_check_delay: Duration::ZERO,
        }
    }
}

/// Controller for the scan workflow of a single session.
pub struct ScanWorkflowController {
    reducer: WorkflowReducer,
    state: Arc<DiagnosisStateContainer>,
    stage: Mutex<WorkflowStage>,
    image_source: Arc<dyn ImageSource>,
    quality_gate: Arc<dyn CaptureQualityGate>,
    inference: Arc<dyn InferenceProvider>,
    timing: ScanTiming,
}

impl ScanWorkflowController {
    pub fn new(
        reducer: WorkflowReducer,
        state: Arc<DiagnosisStateContainer>,
        image_source: Arc<dyn ImageSource>,
        quality_gate: Arc<dyn CaptureQualityGate>,
        inference: Arc<dyn InferenceProvider>,
    ) -> Self {
        Self {
            reducer,
            state,
            stage: Mutex::new(WorkflowStage::Idle),
            image_source,
            quality_gate,
            inference,
            timing: ScanTiming::default(),
        }
    }

    pub fn with_timing(mut self, timing: ScanTiming) -> Self {
        self.timing = timing;
        self
    }

    pub async fn stage(&self) -> WorkflowStage {
        *self.stage.lock().await
    }

    /// Screen for the current stage.
    pub async fn route(&self) -> Route {
        Route::for_stage(self.stage().await)
    }

    pub async fn record(&self) -> DiagnosisRecord {
        self.state.snapshot().await
    }

    /// Reset the record and open the camera. Allowed from any stage.
    pub async fn start_scan(&self) -> Result<Route, WorkflowError> {
        let mut stage = self.stage.lock().await;
        self.dispatch(&mut stage, WorkflowEvent::StartScan).await
    }

    /// Acquire a photo and grade it.
    ///
    /// A dismissed picker or a device error leaves the stage and the record
    /// untouched; device errors are returned for the user to retry.
    pub async fn capture(&self, source: CaptureSource) -> Result<Route, WorkflowError> {
        let mut stage = self.stage.lock().await;
        if *stage != WorkflowStage::Capturing {
            return Err(WorkflowError::invalid_action(*stage, "capture a photo"));
        }

        let image = match self.image_source.acquire(source).await {
            Ok(Some(image)) => image,
            Ok(None) => return Ok(Route::for_stage(*stage)),
            Err(e) => {
                tracing::warn!(?source, error = %e, "Image acquisition failed");
                return Err(e.into());
            }
        };
        let captured_at = Timestamp::now();

        sleep_for(self.timing.capture_check_delay).await;
        let quality = self.quality_gate.assess(&image).await;

        self.dispatch(
            &mut stage,
            WorkflowEvent::ImageAssessed {
                image,
                captured_at,
                quality,
            },
        )
        .await
    }

    /// Back to the camera from the capture error screen or the details form.
    pub async fn retake(&self) -> Result<Route, WorkflowError> {
        let mut stage = self.stage.lock().await;
        self.dispatch(&mut stage, WorkflowEvent::Retake).await
    }

    /// Validate the details form and merge it into the record in one step.
    pub async fn submit_symptoms(&self, form: SymptomForm) -> Result<Route, WorkflowError> {
        let mut stage = self.stage.lock().await;
        if *stage != WorkflowStage::DetailsEntry {
            return Err(WorkflowError::invalid_action(*stage, "submit symptoms"));
        }
        let report = form.validate()?;
        self.dispatch(&mut stage, WorkflowEvent::SymptomsSubmitted(report))
            .await
    }

    /// Run inference on the submitted scan and pick the care branch.
    ///
    /// On failure the workflow returns to the details form.
    pub async fn run_inference(&self) -> Result<Route, WorkflowError> {
        let mut stage = self.stage.lock().await;
        if *stage != WorkflowStage::Inferring {
            return Err(WorkflowError::invalid_action(*stage, "run analysis"));
        }

        sleep_for(self.timing.processing_delay).await;
        let request = InferenceRequest::from_record(&self.state.snapshot().await);
        let outcome = self.inference.analyze(&request).await;
        sleep_for(self.timing.analysis_delay).await;

        match outcome {
            Ok(result) => {
                tracing::debug!(
                    provider = self.inference.name(),
                    condition = %result.condition,
                    confidence = %result.confidence,
                    "Analysis completed"
                );
                self.dispatch(
                    &mut stage,
                    WorkflowEvent::AnalysisCompleted {
                        result,
                        analyzed_at: Timestamp::now(),
                    },
                )
                .await
            }
            Err(e) => {
                tracing::warn!(provider = self.inference.name(), error = %e, "Analysis failed");
                self.dispatch(&mut stage, WorkflowEvent::AnalysisFailed)
                    .await?;
                Err(WorkflowError::Inference(e.to_string()))
            }
        }
    }

    /// From the referral screen, show the self-care plan anyway.
    pub async fn view_care_plan(&self) -> Result<Route, WorkflowError> {
        let mut stage = self.stage.lock().await;
        self.dispatch(&mut stage, WorkflowEvent::ViewCarePlan).await
    }

    pub async fn toggle_heatmap(&self, enabled: bool) -> Result<Route, WorkflowError> {
        let mut stage = self.stage.lock().await;
        self.dispatch(&mut stage, WorkflowEvent::ToggleHeatmap(enabled))
            .await
    }

    /// Commit the scan to history and return to idle.
    ///
    /// A failed save keeps the stage and the record so the user can try
    /// again.
    pub async fn save_and_finish(&self) -> Result<Route, WorkflowError> {
        let mut stage = self.stage.lock().await;
        if !stage.is_resolved() {
            return Err(WorkflowError::invalid_action(*stage, "save the scan"));
        }
        if !self.state.commit_to_history().await {
            return Err(WorkflowError::SaveFailed);
        }
        self.dispatch(&mut stage, WorkflowEvent::Finished).await
    }

    /// Navigate away mid-flow. The record is not cleared.
    pub async fn abandon(&self) -> Result<Route, WorkflowError> {
        let mut stage = self.stage.lock().await;
        self.dispatch(&mut stage, WorkflowEvent::Abandon).await
    }

    async fn dispatch(
        &self,
        stage: &mut WorkflowStage,
        event: WorkflowEvent,
    ) -> Result<Route, WorkflowError> {
        let from = *stage;
        let current = WorkflowState {
            stage: from,
            record: self.state.snapshot().await,
        };

        let next = self.reducer.reduce(current, event)?;
        *stage = next.stage;
        self.state.replace(next.record).await;

        tracing::debug!(from = %from, to = %next.stage, "Workflow transition");
        Ok(Route::for_stage(next.stage))
    }
}

async fn sleep_for(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
