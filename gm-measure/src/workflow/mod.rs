//! Measurement attempt workflow
//!
//! [`MeasurementPipeline`] runs one attempt end to end:
//! 1. [`DetectionOrchestrator`]: photo check, detection (or fallback), confirmation
//! 2. [`SubmissionCoordinator`]: multipart upload guarded by a busy flag
//! 3. Handoff to the questions route, or an error message
//!
//! Stages run strictly in sequence; each awaits its collaborator.

pub mod busy;
pub mod detection_orchestrator;
pub mod pipeline;
pub mod presentation;
pub mod submission_coordinator;

pub use busy::{BusyFlag, BusyGuard};
pub use detection_orchestrator::DetectionOrchestrator;
pub use pipeline::MeasurementPipeline;
pub use presentation::{ConfirmationPrompt, Navigator, Notifier, Presentation, ViewLiveness};
pub use submission_coordinator::SubmissionCoordinator;

use crate::error::PipelineError;
use crate::models::AttemptSession;
use gm_common::{AttemptState, EventBus, MeasureEvent};

/// Transition the session, log it and broadcast it
pub(crate) fn advance(
    session: &mut AttemptSession,
    event_bus: &EventBus,
    new_state: AttemptState,
) -> Result<(), PipelineError> {
    let transition = session.transition_to(new_state)?;
    announce(event_bus, &transition);
    Ok(())
}

pub(crate) fn announce(event_bus: &EventBus, transition: &crate::models::StateTransition) {
    tracing::info!(
        attempt_id = %transition.attempt_id,
        old_state = %transition.old_state,
        new_state = %transition.new_state,
        "Attempt state changed"
    );
    event_bus.emit_lossy(MeasureEvent::AttemptStateChanged {
        attempt_id: transition.attempt_id,
        old_state: transition.old_state,
        new_state: transition.new_state,
        timestamp: transition.transitioned_at,
    });
}
