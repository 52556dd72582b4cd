//! Captured measurements

use crate::error::PipelineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use uuid::Uuid;

/// Kind of quantity being measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementType {
    Length,
    Area,
    Capacity,
    Weight,
}

impl MeasurementType {
    /// Wire name used in form fields and route arguments
    pub fn as_str(self) -> &'static str {
        match self {
            MeasurementType::Length => "length",
            MeasurementType::Area => "area",
            MeasurementType::Capacity => "capacity",
            MeasurementType::Weight => "weight",
        }
    }

    /// Unit the capture widget reports values in
    pub fn unit(self) -> &'static str {
        match self {
            MeasurementType::Length => "cm",
            MeasurementType::Area => "cm²",
            MeasurementType::Capacity => "ml",
            MeasurementType::Weight => "g",
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementType {
    type Err = gm_common::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length" => Ok(MeasurementType::Length),
            "area" => Ok(MeasurementType::Area),
            "capacity" => Ok(MeasurementType::Capacity),
            "weight" => Ok(MeasurementType::Weight),
            other => Err(gm_common::Error::InvalidInput(format!(
                "Unknown measurement type: {}",
                other
            ))),
        }
    }
}

/// One capture result: value plus the photo it was taken with
///
/// Immutable once created. The photo path is only checked for existence
/// when detection starts.
#[derive(Debug, Clone)]
pub struct MeasurementAttempt {
    attempt_id: Uuid,
    measurement_type: MeasurementType,
    raw_value: f64,
    photo: PathBuf,
    captured_at: DateTime<Utc>,
}

impl MeasurementAttempt {
    pub fn new(
        measurement_type: MeasurementType,
        raw_value: f64,
        photo: impl Into<PathBuf>,
    ) -> Result<Self, PipelineError> {
        if !raw_value.is_finite() || raw_value <= 0.0 {
            return Err(PipelineError::InvalidMeasurement(format!(
                "{} must be greater than zero, got {}",
                measurement_type, raw_value
            )));
        }

        let photo = photo.into();
        if photo.as_os_str().is_empty() {
            return Err(PipelineError::PhotoMissing(photo));
        }

        Ok(Self {
            attempt_id: Uuid::new_v4(),
            measurement_type,
            raw_value,
            photo,
            captured_at: Utc::now(),
        })
    }

    pub fn attempt_id(&self) -> Uuid {
        self.attempt_id
    }

    pub fn measurement_type(&self) -> MeasurementType {
        self.measurement_type
    }

    pub fn raw_value(&self) -> f64 {
        self.raw_value
    }

    pub fn unit(&self) -> &'static str {
        self.measurement_type.unit()
    }

    pub fn photo(&self) -> &Path {
        &self.photo
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }
}
