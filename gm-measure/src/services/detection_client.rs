//! Object detection client
//!
//! Sends the measurement photo to the backend detector and returns its best
//! guess. Callers treat every error the same way: no suggestion.

use crate::error::DetectionError;
use crate::models::DetectionResult;
use async_trait::async_trait;
use gm_common::config::{BackendConfig, DetectionConfig};
use reqwest::multipart::Form;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const DETECT_OBJECT_PATH: &str = "/api/detect-object";

/// Source of object label suggestions for a photo
#[async_trait]
pub trait ObjectDetector: Send + Sync {
    /// Detector name for logging
    fn name(&self) -> &'static str;

    async fn detect(&self, photo: &Path) -> Result<DetectionResult, DetectionError>;
}

#[derive(Debug, Deserialize)]
struct DetectObjectResponse {
    #[serde(alias = "label", alias = "detected_object")]
    object_name: String,
    confidence: f64,
}

impl DetectObjectResponse {
    fn into_result(self) -> Result<DetectionResult, DetectionError> {
        let label = self.object_name.trim();
        if label.is_empty() {
            return Err(DetectionError::ParseError("empty object_name".to_string()));
        }
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(DetectionError::ParseError(format!(
                "confidence out of range: {}",
                self.confidence
            )));
        }
        Ok(DetectionResult::new(label, self.confidence))
    }
}

/// Backend detector reached over HTTP multipart
pub struct HttpObjectDetector {
    http_client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpObjectDetector {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DetectionError> {
        let http_client = reqwest::Client::builder()
            .user_agent(super::USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| DetectionError::NetworkError(e.to_string()))?;

        Ok(Self {
            http_client,
            endpoint: super::endpoint(base_url, DETECT_OBJECT_PATH),
            timeout,
        })
    }

    pub fn from_config(
        backend: &BackendConfig,
        detection: &DetectionConfig,
    ) -> Result<Self, DetectionError> {
        Self::new(
            &backend.base_url(),
            Duration::from_secs(detection.timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ObjectDetector for HttpObjectDetector {
    fn name(&self) -> &'static str {
        "backend"
    }

    async fn detect(&self, photo: &Path) -> Result<DetectionResult, DetectionError> {
        let form = Form::new().part("image", super::photo_part(photo).await?);

        tracing::debug!(endpoint = %self.endpoint, photo = %photo.display(), "Requesting object detection");

        let response = self
            .http_client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DetectionError::Timeout(self.timeout)
                } else {
                    DetectionError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(DetectionError::ApiError(status.as_u16(), error_text));
        }

        let body: DetectObjectResponse = response
            .json()
            .await
            .map_err(|e| DetectionError::ParseError(e.to_string()))?;

        let result = body.into_result()?;

        tracing::info!(
            label = %result.suggested_label,
            confidence = result.confidence,
            "Object detection successful"
        );

        Ok(result)
    }
}
