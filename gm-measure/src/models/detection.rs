//! Detection results and user confirmation

use crate::models::MeasurementType;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label offered when the detector gives no answer
pub const FALLBACK_LABEL: &str = "Other";

/// Best-guess object label from the detector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub suggested_label: String,
    /// Detector confidence (0.0-1.0)
    pub confidence: f64,
}

impl DetectionResult {
    /// Create detection result with clamped confidence (0.0-1.0)
    pub fn new(suggested_label: impl Into<String>, confidence: f64) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            suggested_label: suggested_label.into(),
            confidence,
        }
    }

    /// Default suggestion used after a failed detection
    pub fn fallback() -> Self {
        Self::new(FALLBACK_LABEL, 0.0)
    }
}

/// What the confirmation dialog is asked to show
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmationRequest {
    pub attempt_id: Uuid,
    pub measurement_type: MeasurementType,
    pub value: f64,
    pub unit: String,
    pub suggested_label: String,
    pub confidence: f64,
    /// True when the suggestion is the fallback rather than a detector answer
    pub detection_failed: bool,
}

/// User's answer to the confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationOutcome {
    /// Accept with the given label (the suggestion or a replacement)
    Accepted { label: String },
    /// Dialog dismissed; the attempt is abandoned
    Cancelled,
}

impl ConfirmationOutcome {
    pub fn accepted(label: impl Into<String>) -> Self {
        ConfirmationOutcome::Accepted {
            label: label.into(),
        }
    }
}

/// Object label after the user has confirmed it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmedObject {
    label: String,
    was_manually_overridden: bool,
    original_confidence: f64,
}

impl ConfirmedObject {
    /// Build from the dialog outcome; `None` when the user cancelled
    ///
    /// A blank accepted label counts as accepting the suggestion.
    pub fn from_outcome(suggestion: &DetectionResult, outcome: &ConfirmationOutcome) -> Option<Self> {
        let chosen = match outcome {
            ConfirmationOutcome::Accepted { label } => label.trim(),
            ConfirmationOutcome::Cancelled => return None,
        };

        let (label, was_manually_overridden) =
            if chosen.is_empty() || chosen == suggestion.suggested_label {
                (suggestion.suggested_label.clone(), false)
            } else {
                (chosen.to_string(), true)
            };

        Some(Self {
            label,
            was_manually_overridden,
            original_confidence: suggestion.confidence,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn was_manually_overridden(&self) -> bool {
        self.was_manually_overridden
    }

    pub fn original_confidence(&self) -> f64 {
        self.original_confidence
    }
}
