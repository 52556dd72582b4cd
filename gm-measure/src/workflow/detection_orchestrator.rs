//! Detection and confirmation stage
//!
//! Turns a captured measurement into a [`ConfirmedObject`]. Detection is
//! fail-open: any detector error becomes the "Other" suggestion, and the
//! user always sees exactly one confirmation before anything is submitted.

use crate::error::PipelineError;
use crate::models::{
    AttemptSession, ConfirmationOutcome, ConfirmationRequest, ConfirmedObject, DetectionResult,
    FailureReason, MeasurementAttempt,
};
use crate::services::ObjectDetector;
use crate::workflow::presentation::{ConfirmationPrompt, ViewLiveness};
use chrono::Utc;
use gm_common::{AttemptState, EventBus, MeasureEvent};
use std::io;
use std::path::Path;
use std::sync::Arc;

pub struct DetectionOrchestrator {
    detector: Arc<dyn ObjectDetector>,
    prompt: Arc<dyn ConfirmationPrompt>,
    liveness: ViewLiveness,
    event_bus: EventBus,
}

impl DetectionOrchestrator {
    pub fn new(
        detector: Arc<dyn ObjectDetector>,
        prompt: Arc<dyn ConfirmationPrompt>,
        liveness: ViewLiveness,
        event_bus: EventBus,
    ) -> Self {
        Self {
            detector,
            prompt,
            liveness,
            event_bus,
        }
    }

    /// Photo must exist and be a readable regular file
    pub async fn check_photo(photo: &Path) -> Result<(), PipelineError> {
        let metadata = match tokio::fs::metadata(photo).await {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(PipelineError::PhotoMissing(photo.to_path_buf()))
            }
            Err(source) => {
                return Err(PipelineError::PhotoUnreadable {
                    path: photo.to_path_buf(),
                    source,
                })
            }
        };

        if !metadata.is_file() {
            return Err(PipelineError::PhotoUnreadable {
                path: photo.to_path_buf(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"),
            });
        }

        tokio::fs::File::open(photo)
            .await
            .map_err(|source| PipelineError::PhotoUnreadable {
                path: photo.to_path_buf(),
                source,
            })?;

        Ok(())
    }

    /// Ask the detector once; substitute the fallback on any failure
    ///
    /// A blank label counts as a malformed answer. Returns the suggestion and
    /// whether it is the fallback.
    pub async fn suggest(&self, attempt: &MeasurementAttempt) -> (DetectionResult, bool) {
        let reason = match self.detector.detect(attempt.photo()).await {
            Ok(result) if !result.suggested_label.trim().is_empty() => return (result, false),
            Ok(_) => "detector returned an empty label".to_string(),
            Err(e) => e.to_string(),
        };

        tracing::warn!(
            attempt_id = %attempt.attempt_id(),
            detector = self.detector.name(),
            error = %reason,
            "Object detection failed, falling back to manual selection"
        );
        self.event_bus.emit_lossy(MeasureEvent::DetectionFallback {
            attempt_id: attempt.attempt_id(),
            reason,
            timestamp: Utc::now(),
        });
        (DetectionResult::fallback(), true)
    }

    /// Run detection and confirmation for a session in CAPTURING
    ///
    /// `Ok(None)` means the user cancelled; the session is then FAILED.
    /// A missing photo is returned as an error before DETECTING is entered.
    pub async fn confirm(
        &self,
        attempt: &MeasurementAttempt,
        session: &mut AttemptSession,
    ) -> Result<Option<ConfirmedObject>, PipelineError> {
        Self::check_photo(attempt.photo()).await?;

        super::advance(session, &self.event_bus, AttemptState::Detecting)?;
        let (suggestion, detection_failed) = self.suggest(attempt).await;

        super::advance(session, &self.event_bus, AttemptState::Confirming)?;

        if !self.liveness.is_alive() {
            tracing::debug!(
                attempt_id = %attempt.attempt_id(),
                "View disposed before confirmation, abandoning attempt"
            );
            self.cancel(session)?;
            return Ok(None);
        }

        let request = ConfirmationRequest {
            attempt_id: attempt.attempt_id(),
            measurement_type: attempt.measurement_type(),
            value: attempt.raw_value(),
            unit: attempt.unit().to_string(),
            suggested_label: suggestion.suggested_label.clone(),
            confidence: suggestion.confidence,
            detection_failed,
        };

        self.event_bus.emit_lossy(MeasureEvent::ConfirmationRequested {
            attempt_id: attempt.attempt_id(),
            suggested_label: request.suggested_label.clone(),
            confidence: request.confidence,
            timestamp: Utc::now(),
        });

        let outcome = self.prompt.confirm(request).await;

        match ConfirmedObject::from_outcome(&suggestion, &outcome) {
            Some(confirmed) => {
                tracing::info!(
                    attempt_id = %attempt.attempt_id(),
                    label = confirmed.label(),
                    overridden = confirmed.was_manually_overridden(),
                    "Object confirmed"
                );
                Ok(Some(confirmed))
            }
            None => {
                debug_assert_eq!(outcome, ConfirmationOutcome::Cancelled);
                tracing::info!(attempt_id = %attempt.attempt_id(), "Confirmation cancelled by user");
                self.cancel(session)?;
                Ok(None)
            }
        }
    }

    fn cancel(&self, session: &mut AttemptSession) -> Result<(), PipelineError> {
        let transition = session.fail(FailureReason::Cancelled)?;
        super::announce(&self.event_bus, &transition);
        Ok(())
    }
}
