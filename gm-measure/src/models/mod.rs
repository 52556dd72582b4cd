//! Data models for gm-measure
//!
//! Measurement attempts, detection/confirmation results, submission records
//! and the per-attempt state machine.

pub mod attempt;
pub mod detection;
pub mod measurement;
pub mod submission;

pub use attempt::{AttemptOutcome, AttemptReport, AttemptSession, FailureReason, StateTransition};
pub use detection::{
    ConfirmationOutcome, ConfirmationRequest, ConfirmedObject, DetectionResult, FALLBACK_LABEL,
};
pub use measurement::{MeasurementAttempt, MeasurementType};
pub use submission::{
    QuestionRouteArgs, SubmissionRecord, SubmissionResponse, MEASUREMENT_METHOD, QUESTIONS_ROUTE,
};
