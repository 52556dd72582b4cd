//! End-to-end measurement attempt
//!
//! CAPTURING → DETECTING → CONFIRMING → SUBMITTING → COMPLETED | FAILED
//!
//! The state lives in an [`AttemptSession`] owned by [`MeasurementPipeline::run`],
//! so nothing carries over between attempts.

use crate::error::PipelineError;
use crate::models::{
    AttemptOutcome, AttemptReport, AttemptSession, FailureReason, MeasurementAttempt,
    QuestionRouteArgs,
};
use crate::services::{HttpObjectDetector, MeasurementClient, ObjectDetector};
use crate::workflow::detection_orchestrator::DetectionOrchestrator;
use crate::workflow::presentation::Presentation;
use crate::workflow::submission_coordinator::SubmissionCoordinator;
use chrono::Utc;
use gm_common::config::{BackendConfig, TomlConfig};
use gm_common::{AttemptState, EventBus, MeasureEvent};
use std::sync::Arc;

pub struct MeasurementPipeline {
    orchestrator: DetectionOrchestrator,
    coordinator: SubmissionCoordinator,
    presentation: Presentation,
    event_bus: EventBus,
}

impl MeasurementPipeline {
    /// Assemble a pipeline around an injected detector and backend endpoint
    pub fn new(
        detector: Arc<dyn ObjectDetector>,
        presentation: Presentation,
        backend: &BackendConfig,
        event_bus: EventBus,
    ) -> Result<Self, PipelineError> {
        let orchestrator = DetectionOrchestrator::new(
            detector,
            Arc::clone(&presentation.prompt),
            presentation.liveness.clone(),
            event_bus.clone(),
        );
        let client = MeasurementClient::from_config(backend)
            .map_err(|e| PipelineError::ClientSetup(e.to_string()))?;
        let coordinator = SubmissionCoordinator::new(client);

        Ok(Self {
            orchestrator,
            coordinator,
            presentation,
            event_bus,
        })
    }

    /// Backend detector and submission client from configuration
    ///
    /// Environment overrides for the backend endpoint are applied here.
    pub fn from_config(
        config: &TomlConfig,
        presentation: Presentation,
        event_bus: EventBus,
    ) -> Result<Self, PipelineError> {
        let backend = gm_common::config::resolve_backend_config(config)?;
        let detector = HttpObjectDetector::from_config(&backend, &config.detection)
            .map_err(|e| PipelineError::ClientSetup(e.to_string()))?;
        Self::new(Arc::new(detector), presentation, &backend, event_bus)
    }

    pub fn coordinator(&self) -> &SubmissionCoordinator {
        &self.coordinator
    }

    /// Run one attempt to a terminal state
    ///
    /// Precondition failures (missing photo) are returned as `Err` and no
    /// state transition happens. Every other ending is an [`AttemptReport`].
    pub async fn run(&self, attempt: MeasurementAttempt) -> Result<AttemptReport, PipelineError> {
        let mut session = AttemptSession::new(attempt.attempt_id());

        tracing::info!(
            attempt_id = %attempt.attempt_id(),
            measurement_type = %attempt.measurement_type(),
            value = attempt.raw_value(),
            photo = %attempt.photo().display(),
            "Starting measurement attempt"
        );

        let confirmed = match self.orchestrator.confirm(&attempt, &mut session).await? {
            Some(confirmed) => confirmed,
            None => {
                return Ok(AttemptReport {
                    session,
                    outcome: AttemptOutcome::Cancelled,
                })
            }
        };

        super::advance(&mut session, &self.event_bus, AttemptState::Submitting)?;

        let outcome = match self.coordinator.submit(&attempt, &confirmed).await {
            Ok(response) => {
                super::advance(&mut session, &self.event_bus, AttemptState::Completed)?;
                self.event_bus.emit_lossy(MeasureEvent::SubmissionCompleted {
                    attempt_id: attempt.attempt_id(),
                    measurement_id: response.measurement_id.clone(),
                    timestamp: Utc::now(),
                });

                let args = QuestionRouteArgs::from_response(attempt.measurement_type(), response);
                if self.presentation.liveness.is_alive() {
                    self.presentation.navigator.to_questions(args.clone());
                } else {
                    tracing::debug!(
                        attempt_id = %attempt.attempt_id(),
                        "View disposed, skipping navigation to questions"
                    );
                }
                AttemptOutcome::Completed(args)
            }
            Err(e) => {
                let message = e.user_message();
                tracing::error!(attempt_id = %attempt.attempt_id(), error = %e, "Measurement submission failed");

                let transition = session.fail(FailureReason::Submission(e.to_string()))?;
                super::announce(&self.event_bus, &transition);
                self.event_bus.emit_lossy(MeasureEvent::SubmissionFailed {
                    attempt_id: attempt.attempt_id(),
                    message: message.clone(),
                    timestamp: Utc::now(),
                });

                if self.presentation.liveness.is_alive() {
                    self.presentation.notifier.show_error(&message);
                }
                AttemptOutcome::Failed { message }
            }
        };

        Ok(AttemptReport { session, outcome })
    }
}
