//! Error types for gm-measure
//!
//! - Precondition errors ([`PipelineError`]) stop an attempt before detection.
//! - [`DetectionError`] never reaches the user; the pipeline falls back to a
//!   default label.
//! - [`SubmissionError`] is shown to the user and the attempt is discarded.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Object detection failures
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Detection timed out after {0:?}")]
    Timeout(Duration),

    #[error("API error {0}: {1}")]
    ApiError(u16, String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Photo read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Measurement submission failures
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Another submission is still in flight on this coordinator
    #[error("A submission is already in progress")]
    Busy,

    #[error("Network error: {0}")]
    NetworkError(String),

    /// Backend answered with something other than 200/201
    #[error("Server returned {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Photo read failed: {0}")]
    Io(#[from] std::io::Error),
}

impl SubmissionError {
    /// Text for the user-facing error message
    pub fn user_message(&self) -> String {
        format!("Failed to save measurement: {}", self)
    }
}

/// Errors that prevent an attempt from running at all
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Captured value is not a positive finite number
    #[error("Invalid measurement value: {0}")]
    InvalidMeasurement(String),

    #[error("Photo not found: {}", .0.display())]
    PhotoMissing(PathBuf),

    #[error("Photo unreadable: {}: {source}", .path.display())]
    PhotoUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Illegal state transition {from} -> {to}")]
    IllegalTransition {
        from: gm_common::AttemptState,
        to: gm_common::AttemptState,
    },

    /// HTTP client construction failed
    #[error("Client setup failed: {0}")]
    ClientSetup(String),

    #[error("Common error: {0}")]
    Common(#[from] gm_common::Error),
}
