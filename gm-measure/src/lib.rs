//! gm-measure: headless measurement capture pipeline
//!
//! Drives one measurement attempt through detection, user confirmation and
//! backend submission, then hands the issued measurement id to the
//! questions stage. Rendering is left to the caller; the camera result,
//! dialog, snack bar and router reach this crate through the traits in
//! [`workflow::presentation`].

pub mod error;
pub mod models;
pub mod services;
pub mod workflow;

pub use crate::error::{DetectionError, PipelineError, SubmissionError};
pub use crate::models::{
    AttemptOutcome, AttemptReport, AttemptSession, ConfirmationOutcome, ConfirmationRequest,
    ConfirmedObject, DetectionResult, MeasurementAttempt, MeasurementType, QuestionRouteArgs,
    SubmissionRecord, SubmissionResponse,
};
pub use crate::services::{HttpObjectDetector, MeasurementClient, ObjectDetector};
pub use crate::workflow::{
    ConfirmationPrompt, DetectionOrchestrator, MeasurementPipeline, Navigator, Notifier,
    Presentation, SubmissionCoordinator, ViewLiveness,
};
pub use gm_common::{AttemptState, EventBus, MeasureEvent};
