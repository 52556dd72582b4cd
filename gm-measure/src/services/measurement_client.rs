//! Measurement submission client
//!
//! One multipart `POST /api/measurements` per confirmed measurement. No
//! request timeout is set here; the caller owns that guard.

use crate::error::SubmissionError;
use crate::models::{SubmissionRecord, SubmissionResponse};
use gm_common::config::BackendConfig;
use reqwest::multipart::Form;
use reqwest::StatusCode;
use std::path::Path;

pub const MEASUREMENTS_PATH: &str = "/api/measurements";

/// Backend measurements API client
pub struct MeasurementClient {
    http_client: reqwest::Client,
    endpoint: String,
}

impl MeasurementClient {
    pub fn new(base_url: &str) -> Result<Self, SubmissionError> {
        let http_client = reqwest::Client::builder()
            .user_agent(super::USER_AGENT)
            .build()
            .map_err(|e| SubmissionError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: super::endpoint(base_url, MEASUREMENTS_PATH),
        })
    }

    pub fn from_config(backend: &BackendConfig) -> Result<Self, SubmissionError> {
        Self::new(&backend.base_url())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload the record fields plus the photo
    ///
    /// Only 200 and 201 count as success.
    pub async fn submit(
        &self,
        record: &SubmissionRecord,
        photo: &Path,
    ) -> Result<SubmissionResponse, SubmissionError> {
        let form = record
            .form_fields()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value))
            .part("photo", super::photo_part(photo).await?);

        tracing::debug!(
            endpoint = %self.endpoint,
            session_id = %record.session_id,
            object_name = %record.object_label,
            "Submitting measurement"
        );

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| SubmissionError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubmissionError::NetworkError(e.to_string()))?;

        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: SubmissionResponse = serde_json::from_str(&body)
            .map_err(|e| SubmissionError::ParseError(format!("{}: {}", e, body)))?;

        if parsed.measurement_id.trim().is_empty() {
            return Err(SubmissionError::ParseError(
                "response has empty measurement_id".to_string(),
            ));
        }

        tracing::info!(
            measurement_id = %parsed.measurement_id,
            status = status.as_u16(),
            "Measurement saved"
        );

        Ok(parsed)
    }
}
