//! Submission payload, backend response and the questions handoff

use crate::models::{ConfirmedObject, MeasurementAttempt, MeasurementType};
use serde::{Deserialize, Deserializer, Serialize};

/// Fixed `measurement_method` form value
pub const MEASUREMENT_METHOD: &str = "ar_camera";

/// Named route of the question-generation screen
pub const QUESTIONS_ROUTE: &str = "/questions";

/// Everything sent to `POST /api/measurements` besides the photo
///
/// Only constructible from a confirmed object, so no record exists for an
/// attempt the user has not confirmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRecord {
    pub measurement_type: MeasurementType,
    pub value: f64,
    pub unit: String,
    pub object_label: String,
    pub confidence: f64,
    pub manually_corrected: bool,
    pub session_id: String,
    pub method: &'static str,
}

impl SubmissionRecord {
    pub fn new(
        attempt: &MeasurementAttempt,
        confirmed: &ConfirmedObject,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            measurement_type: attempt.measurement_type(),
            value: attempt.raw_value(),
            unit: attempt.unit().to_string(),
            object_label: confirmed.label().to_string(),
            confidence: confirmed.original_confidence(),
            manually_corrected: confirmed.was_manually_overridden(),
            session_id: session_id.into(),
            method: MEASUREMENT_METHOD,
        }
    }

    /// Multipart text fields in wire order
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("measurement_type", self.measurement_type.as_str().to_string()),
            ("value", decimal(self.value)),
            ("unit", self.unit.clone()),
            ("object_name", self.object_label.clone()),
            ("detection_confidence", decimal(self.confidence)),
            ("manually_corrected", self.manually_corrected.to_string()),
            ("session_id", self.session_id.clone()),
            ("measurement_method", self.method.to_string()),
        ]
    }
}

/// Wire text of a form number; whole values keep their ".0"
fn decimal(value: f64) -> String {
    format!("{:?}", value)
}

/// Success body of `POST /api/measurements`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub measurement_id: String,
    pub value: f64,
    pub object_name: String,
    pub unit: String,
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Text(s) => Ok(s),
        RawId::Number(n) => Ok(n.to_string()),
    }
}

/// Arguments handed to the questions route; the only state that crosses over
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionRouteArgs {
    pub measurement_id: String,
    pub measurement_type: MeasurementType,
    pub value: f64,
    pub object_name: String,
    pub unit: String,
}

impl QuestionRouteArgs {
    /// Use the server-echoed fields, not the locally captured ones
    pub fn from_response(measurement_type: MeasurementType, response: SubmissionResponse) -> Self {
        Self {
            measurement_id: response.measurement_id,
            measurement_type,
            value: response.value,
            object_name: response.object_name,
            unit: response.unit,
        }
    }
}
