//! Submission stage
//!
//! Packages a confirmed measurement and uploads it once. Failed submissions
//! are not queued or retried; the user restarts capture instead.

use crate::error::SubmissionError;
use crate::models::{ConfirmedObject, MeasurementAttempt, SubmissionRecord, SubmissionResponse};
use crate::services::MeasurementClient;
use crate::workflow::busy::BusyFlag;

pub struct SubmissionCoordinator {
    client: MeasurementClient,
    busy: BusyFlag,
}

impl SubmissionCoordinator {
    pub fn new(client: MeasurementClient) -> Self {
        Self {
            client,
            busy: BusyFlag::new(),
        }
    }

    /// True while a request is in flight (drives the progress indicator)
    pub fn is_busy(&self) -> bool {
        self.busy.is_busy()
    }

    /// Handle to the busy flag for presentation layers
    pub fn busy_flag(&self) -> BusyFlag {
        self.busy.clone()
    }

    /// Build the record with a fresh session id and upload it
    ///
    /// Fails with [`SubmissionError::Busy`] if another submission is still
    /// running on this coordinator.
    pub async fn submit(
        &self,
        attempt: &MeasurementAttempt,
        confirmed: &ConfirmedObject,
    ) -> Result<SubmissionResponse, SubmissionError> {
        let _guard = self.busy.try_acquire().ok_or(SubmissionError::Busy)?;

        let record = SubmissionRecord::new(attempt, confirmed, gm_common::time::session_id_now());

        tracing::info!(
            attempt_id = %attempt.attempt_id(),
            session_id = %record.session_id,
            measurement_type = %record.measurement_type,
            value = record.value,
            manually_corrected = record.manually_corrected,
            "Submitting measurement"
        );

        self.client.submit(&record, attempt.photo()).await
    }
}
